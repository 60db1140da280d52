//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use pharmacart_core::{CatalogItem, ProductId, catalog};
use serde::Deserialize;
use tracing::instrument;

use super::NavView;
use crate::filters;
use crate::state::AppState;

/// Path of the catalog page.
pub const CATALOG_PATH: &str = "/medicines";

/// Medicine display data for templates.
#[derive(Clone)]
pub struct MedicineView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub dosage: String,
    pub quantity_available: u32,
}

impl From<&CatalogItem> for MedicineView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.unit_price().display(),
            image: item.image.clone(),
            category: item.category.clone(),
            dosage: item.dosage.clone(),
            quantity_available: item.quantity_available,
        }
    }
}

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free-text filter on name or category.
    #[serde(default)]
    pub q: String,
    /// Id of the item just added to the cart.
    pub added: Option<i64>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "medicines/index.html")]
pub struct CatalogTemplate {
    pub nav: NavView,
    pub query: String,
    pub medicines: Vec<MedicineView>,
    pub added: Option<String>,
}

/// Display the catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> impl IntoResponse {
    let medicines = catalog::search(&query.q).map(MedicineView::from).collect();
    let added = query
        .added
        .and_then(|id| catalog::find(ProductId::new(id)))
        .map(|item| format!("{} added to cart successfully!", item.name));

    CatalogTemplate {
        nav: NavView::from_state(&state),
        query: query.q.trim().to_string(),
        medicines,
        added,
    }
}
