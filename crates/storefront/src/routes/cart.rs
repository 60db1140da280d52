//! Cart route handlers.
//!
//! Every mutation is a form post that redirects back to a page, so a reload
//! never repeats it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use pharmacart_core::{CartLineItem, OrderTotals, Price, ProductId, catalog};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use super::catalog::CATALOG_PATH;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id().as_i64(),
            name: line.item.name.clone(),
            image: line.item.image.clone(),
            quantity: line.quantity,
            price: line.item.unit_price().display(),
            line_price: line.line_price().display(),
        }
    }
}

/// Formatted order totals for templates.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub delivery: String,
    pub total: String,
}

impl From<OrderTotals> for TotalsView {
    fn from(totals: OrderTotals) -> Self {
        Self {
            subtotal: Price::inr(totals.subtotal).display(),
            delivery: Price::inr(totals.delivery).display(),
            total: Price::inr(totals.total).display(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    /// Catalog filter to return to.
    #[serde(default)]
    pub q: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub error: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub error: Option<&'static str>,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(query): Query<CartQuery>) -> impl IntoResponse {
    let stores = state.stores();
    let error = query.error.as_deref().map(|code| match code {
        "quantity" => "Quantity must be at least 1.",
        _ => "That item is no longer in your cart.",
    });

    CartShowTemplate {
        nav: NavView::from_stores(&stores),
        items: stores.cart.cart().lines().iter().map(CartItemView::from).collect(),
        totals: stores.cart.totals().into(),
        error,
    }
}

/// Add one unit of a medicine to the cart.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let item = catalog::find(ProductId::new(form.product_id))
        .ok_or_else(|| AppError::NotFound(format!("medicine {}", form.product_id)))?;
    state.stores().cart.add_item(item);

    let mut target = format!("{CATALOG_PATH}?added={}", form.product_id);
    if !form.q.trim().is_empty() {
        target.push_str("&q=");
        target.push_str(&urlencoding::encode(form.q.trim()));
    }
    Ok(Redirect::to(&target))
}

/// Update a cart line quantity.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let result = state
        .stores()
        .cart
        .set_quantity(ProductId::new(form.product_id), form.quantity);

    match result {
        Ok(()) => Redirect::to("/cart").into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Cart update rejected");
            let code = match e {
                pharmacart_core::CartError::InvalidQuantity(_) => "quantity",
                _ => "missing",
            };
            Redirect::to(&format!("/cart?error={code}")).into_response()
        }
    }
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveFromCartForm>) -> Redirect {
    state.stores().cart.remove_item(ProductId::new(form.product_id));
    Redirect::to("/cart")
}
