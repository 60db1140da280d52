//! The fixed medicine catalog.
//!
//! The catalog is a read-only constant table. Nothing in the storefront adds,
//! edits, or restocks items; `quantity_available` is informational only.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A medicine offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in rupees.
    pub price: Decimal,
    /// Path of the product image under `/static`.
    pub image: String,
    pub category: String,
    pub dosage: String,
    /// Units in stock, shown to the shopper but never decremented.
    pub quantity_available: u32,
}

impl CatalogItem {
    /// Unit price with currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// Whether the item matches a free-text search.
    ///
    /// Matches case-insensitively on name or category. An empty query
    /// matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    name: &str,
    description: &str,
    paise: i64,
    image: &str,
    category: &str,
    dosage: &str,
    quantity_available: u32,
) -> CatalogItem {
    CatalogItem {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(paise, 2),
        image: image.to_owned(),
        category: category.to_owned(),
        dosage: dosage.to_owned(),
        quantity_available,
    }
}

static CATALOG: LazyLock<Vec<CatalogItem>> = LazyLock::new(|| {
    vec![
        item(
            1,
            "Paracetamol",
            "Pain reliever and fever reducer. Effective for headaches, muscle aches, arthritis, backaches, toothaches, colds, and fevers.",
            44_925,
            "/static/images/paracetamol.svg",
            "Pain Relief",
            "500mg",
            100,
        ),
        item(
            2,
            "Amoxicillin",
            "Antibiotic medication used to treat bacterial infections. Effective against respiratory tract, ear, nose, throat infections.",
            97_425,
            "/static/images/amoxicillin.svg",
            "Antibiotics",
            "250mg",
            50,
        ),
        item(
            3,
            "Vitamin C",
            "Essential nutrient for immune system support. Helps maintain healthy skin, blood vessels, bones and cartilage.",
            67_425,
            "/static/images/vitamin-c.svg",
            "Vitamins",
            "1000mg",
            200,
        ),
        item(
            4,
            "Aspirin",
            "Blood-thinning pain reliever. Used for pain, fever, and inflammation. Also prescribed for heart attack prevention.",
            52_425,
            "/static/images/aspirin.svg",
            "Pain Relief",
            "325mg",
            150,
        ),
        item(
            5,
            "Omeprazole",
            "Reduces stomach acid production. Treats heartburn, acid reflux, and gastroesophageal reflux disease (GERD).",
            119_925,
            "/static/images/omeprazole.svg",
            "Digestive Health",
            "20mg",
            75,
        ),
        item(
            6,
            "Ibuprofen",
            "Nonsteroidal anti-inflammatory drug (NSAID) used to reduce fever and treat pain or inflammation.",
            59_925,
            "/static/images/ibuprofen.svg",
            "Pain Relief",
            "200mg",
            120,
        ),
        item(
            7,
            "Cetirizine",
            "Antihistamine used to relieve allergy symptoms such as watery eyes, runny nose, itching eyes/nose, and sneezing.",
            74_925,
            "/static/images/cetirizine.svg",
            "Allergy Relief",
            "10mg",
            90,
        ),
        item(
            8,
            "Metformin",
            "Oral diabetes medicine that helps control blood sugar levels in patients with type 2 diabetes.",
            89_925,
            "/static/images/metformin.svg",
            "Diabetes",
            "500mg",
            60,
        ),
    ]
});

/// Every catalog item, in display order.
#[must_use]
pub fn all() -> &'static [CatalogItem] {
    &CATALOG
}

/// Look up a catalog item by id.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Catalog items matching a free-text query, in display order.
pub fn search(query: &str) -> impl Iterator<Item = &'static CatalogItem> + '_ {
    CATALOG.iter().filter(move |item| item.matches(query))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|item| item.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
        assert_eq!(all().len(), 8);
    }

    #[test]
    fn test_find() {
        let item = find(ProductId::new(2)).unwrap();
        assert_eq!(item.name, "Amoxicillin");
        assert_eq!(item.price, Decimal::new(97_425, 2));
        assert!(find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_search_by_name_and_category() {
        let names: Vec<_> = search("pain").map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Paracetamol", "Aspirin", "Ibuprofen"]);

        let names: Vec<_> = search("OMEP").map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Omeprazole"]);

        assert_eq!(search("   ").count(), 8);
        assert_eq!(search("antacid").count(), 0);
    }

    #[test]
    fn test_unit_price_display() {
        assert_eq!(find(ProductId::new(5)).unwrap().unit_price().display(), "₹1,199.25");
    }
}
