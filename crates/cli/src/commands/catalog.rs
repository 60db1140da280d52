//! Catalog listing.

use pharmacart_core::catalog;

/// One row per medicine: id, name, dosage, price, and stock.
#[must_use]
pub fn list() -> String {
    catalog::all()
        .iter()
        .map(|item| {
            format!(
                "{:>3}  {:<20} {:<8} {:>10}  {} in stock\n",
                item.id,
                item.name,
                item.dosage,
                item.unit_price().display(),
                item.quantity_available
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_medicine() {
        let out = list();
        assert_eq!(out.lines().count(), catalog::all().len());
        assert!(out.contains("Paracetamol"));
        assert!(out.contains("₹"));
    }
}
