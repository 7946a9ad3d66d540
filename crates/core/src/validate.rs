//! Pre-submission validation for inventory rows.
//!
//! Rules are checked independently and all violations are collected,
//! so the UI can highlight every offending field at once. Validation
//! runs entirely locally: a batch containing any invalid row is
//! rejected before a single network call is issued.

use crate::row::InventoryRow;

/// Smallest accepted monetary amount for either price field.
pub const MIN_PRICE: f64 = 0.01;

/// Validate one row's numeric fields against the business rules.
///
/// Returns the ordered list of violation messages; an empty list means
/// the row is valid. Pure — the row is not touched.
pub fn validate_row(row: &InventoryRow) -> Vec<String> {
    let mut violations = Vec::new();
    if row.selling_price < MIN_PRICE {
        violations.push(format!("price must be at least {MIN_PRICE}"));
    }
    if row.cost_price < MIN_PRICE {
        violations.push(format!("cost price must be at least {MIN_PRICE}"));
    }
    if row.quantity < 0 {
        violations.push("quantity cannot be negative".to_string());
    }
    violations
}

/// Screen every submittable row in the slice before a save.
///
/// Violating rows get their `validation_errors` populated for UI
/// highlighting; rows that pass have it cleared. Returns `true` only
/// when every submittable row passed — the save gate is all-or-nothing
/// at the batch level, so a `false` here means nothing may be
/// submitted, including the rows that individually passed.
///
/// Placeholder rows (no product bound) and clean rows are skipped;
/// they are not part of the batch.
pub fn screen_batch(rows: &mut [InventoryRow]) -> bool {
    let mut all_valid = true;
    for row in rows.iter_mut().filter(|r| r.is_submittable()) {
        let violations = validate_row(row);
        if !violations.is_empty() {
            all_valid = false;
        }
        row.validation_errors = violations;
    }
    all_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::ProductBinding;
    use crate::types::{ProductRef, VariantRef};

    fn bound_row(quantity: i64, cost: f64, selling: f64) -> InventoryRow {
        let mut row = InventoryRow::new();
        row.bind_product(ProductBinding {
            product: ProductRef::new("p"),
            variant: VariantRef::new("v"),
            product_name: "White Cap".to_string(),
            variant_name: "330ml".to_string(),
            warehouse: None,
        });
        row.quantity = quantity;
        row.cost_price = cost;
        row.selling_price = selling;
        row
    }

    #[test]
    fn valid_row_has_no_violations() {
        let row = bound_row(10, 150.0, 200.0);
        assert!(validate_row(&row).is_empty());
    }

    #[test]
    fn zero_selling_price_rejected() {
        let row = bound_row(10, 150.0, 0.0);
        assert_eq!(validate_row(&row), vec!["price must be at least 0.01"]);
    }

    #[test]
    fn zero_cost_price_rejected() {
        let row = bound_row(10, 0.0, 200.0);
        assert_eq!(validate_row(&row), vec!["cost price must be at least 0.01"]);
    }

    #[test]
    fn negative_quantity_rejected() {
        let row = bound_row(-1, 150.0, 200.0);
        assert_eq!(validate_row(&row), vec!["quantity cannot be negative"]);
    }

    #[test]
    fn minimum_price_is_accepted() {
        let row = bound_row(0, MIN_PRICE, MIN_PRICE);
        assert!(validate_row(&row).is_empty());
    }

    #[test]
    fn all_violations_collected_in_order() {
        let row = bound_row(-5, 0.0, 0.0);
        assert_eq!(
            validate_row(&row),
            vec![
                "price must be at least 0.01",
                "cost price must be at least 0.01",
                "quantity cannot be negative",
            ]
        );
    }

    #[test]
    fn screen_batch_annotates_only_violating_rows() {
        let mut rows = vec![bound_row(10, 150.0, 200.0), bound_row(-2, 150.0, 200.0)];
        assert!(!screen_batch(&mut rows));
        assert!(rows[0].validation_errors.is_empty());
        assert_eq!(rows[1].validation_errors, vec!["quantity cannot be negative"]);
    }

    #[test]
    fn screen_batch_clears_stale_errors_on_pass() {
        let mut rows = vec![bound_row(10, 150.0, 200.0)];
        rows[0].validation_errors = vec!["quantity cannot be negative".to_string()];
        assert!(screen_batch(&mut rows));
        assert!(rows[0].validation_errors.is_empty());
    }

    #[test]
    fn screen_batch_skips_placeholders_and_clean_rows() {
        let mut placeholder = InventoryRow::new();
        placeholder.set_quantity(-9); // dirty but unbound
        let mut clean = bound_row(-3, 150.0, 200.0);
        clean.is_dirty = false;

        let mut rows = vec![placeholder, clean];
        assert!(screen_batch(&mut rows));
        assert!(rows.iter().all(|r| r.validation_errors.is_empty()));
    }
}
