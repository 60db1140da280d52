//! Account dashboard route handler.
//!
//! This route requires authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use pharmacart_core::Order;
use tracing::instrument;

use super::NavView;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Shown when the shopper has no orders yet.
pub const NO_ORDERS: &str = "No orders found. Start shopping to see your orders here!";

const DATE_FORMAT: &str = "%-d %B %Y";

/// Profile display data for templates.
#[derive(Clone)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// One order line for templates.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub total: String,
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub ordered_on: String,
    pub estimated_delivery: String,
    pub total: String,
    pub badge: &'static str,
    pub tracking: &'static str,
    pub lines: Vec<OrderLineView>,
    pub customer_name: String,
    pub address: String,
}

impl OrderView {
    fn new(index: usize, order: &Order, now: DateTime<Utc>) -> Self {
        let stage = order.tracking_stage(now);
        Self {
            number: order_number(index, &order.payment_details.id),
            ordered_on: order.date.format(DATE_FORMAT).to_string(),
            estimated_delivery: order.estimated_delivery().format(DATE_FORMAT).to_string(),
            total: order.total_price().display(),
            badge: stage.badge(),
            tracking: stage.label(),
            lines: order
                .items
                .iter()
                .map(|line| OrderLineView {
                    name: line.item.name.clone(),
                    quantity: line.quantity,
                    total: line.line_price().display(),
                })
                .collect(),
            customer_name: order.customer_info.full_name(),
            address: order.customer_info.address.clone(),
        }
    }
}

/// Last eight characters of the payment id, or the position in the history.
fn order_number(index: usize, payment_id: &str) -> String {
    let chars: Vec<char> = payment_id.chars().collect();
    if chars.is_empty() {
        return (index + 1).to_string();
    }
    let start = chars.len().saturating_sub(8);
    chars.get(start..).unwrap_or_default().iter().collect()
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavView,
    pub profile: ProfileView,
    pub orders: Vec<OrderView>,
    pub empty_message: &'static str,
}

/// Display the profile and order history.
#[instrument(skip_all, fields(user_id = %identity.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> impl IntoResponse {
    let stores = state.stores();
    let now = Utc::now();

    DashboardTemplate {
        nav: NavView::from_stores(&stores),
        profile: ProfileView {
            name: identity.name,
            email: identity.email.to_string(),
            role: identity.role.to_string(),
        },
        orders: stores
            .orders
            .orders()
            .iter()
            .enumerate()
            .map(|(index, order)| OrderView::new(index, order, now))
            .collect(),
        empty_message: NO_ORDERS,
    }
}
