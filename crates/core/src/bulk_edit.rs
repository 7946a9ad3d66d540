//! Bulk price editing across selected rows.
//!
//! A purely local transformation: given a target price field, an
//! operation, and a numeric operand, compute a new value per selected
//! row, round it to the nearest whole currency unit, and mark the row
//! dirty. Nothing here touches the network — edited rows enter the
//! two-phase sync path on the next save.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::round_to_unit;
use crate::row::InventoryRow;
use crate::types::RowId;

/// Which price field a bulk edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    CostPrice,
    SellingPrice,
}

/// How the operand is applied to the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkPriceOp {
    /// New value = operand.
    Set,
    /// New value = current x (1 + operand/100).
    IncreasePercent,
    /// New value = current x (1 - operand/100).
    DecreasePercent,
    /// Derive one price from the other at a margin of operand percent:
    /// selling = cost x (1 + operand/100), cost = selling / (1 + operand/100).
    MarginPercent,
}

/// Compute the rounded new value for one row, or `None` when the
/// result is not positive (the row must be left untouched).
pub fn compute_price(
    field: PriceField,
    op: BulkPriceOp,
    operand: f64,
    cost_price: f64,
    selling_price: f64,
) -> Option<f64> {
    let current = match field {
        PriceField::CostPrice => cost_price,
        PriceField::SellingPrice => selling_price,
    };
    let raw = match op {
        BulkPriceOp::Set => operand,
        BulkPriceOp::IncreasePercent => current * (1.0 + operand / 100.0),
        BulkPriceOp::DecreasePercent => current * (1.0 - operand / 100.0),
        BulkPriceOp::MarginPercent => {
            let factor = 1.0 + operand / 100.0;
            match field {
                PriceField::SellingPrice => cost_price * factor,
                // Deriving cost from selling needs a positive factor.
                PriceField::CostPrice if factor > 0.0 => selling_price / factor,
                PriceField::CostPrice => return None,
            }
        }
    };
    let rounded = round_to_unit(raw);
    (rounded > 0.0).then_some(rounded)
}

/// Apply a bulk edit to every selected, product-bound row.
///
/// Rows whose computed value is not positive are skipped; updated rows
/// are marked dirty. Returns the number of rows changed.
pub fn apply_bulk_edit(
    rows: &mut [InventoryRow],
    selected: &[RowId],
    field: PriceField,
    op: BulkPriceOp,
    operand: f64,
) -> Result<usize, CoreError> {
    if !operand.is_finite() {
        return Err(CoreError::Validation(format!(
            "bulk edit operand must be a finite number, got {operand}"
        )));
    }

    let mut changed = 0;
    for row in rows.iter_mut() {
        // Placeholder rows are not eligible for bulk edit.
        if row.product.is_none() || !selected.contains(&row.id) {
            continue;
        }
        let Some(new_value) = compute_price(field, op, operand, row.cost_price, row.selling_price)
        else {
            continue;
        };
        match field {
            PriceField::CostPrice => row.set_cost_price(new_value),
            PriceField::SellingPrice => row.set_selling_price(new_value),
        }
        changed += 1;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::ProductBinding;
    use crate::types::{ProductRef, VariantRef};

    fn bound_row(cost: f64, selling: f64) -> InventoryRow {
        let mut row = InventoryRow::new();
        row.bind_product(ProductBinding {
            product: ProductRef::new("p"),
            variant: VariantRef::new("v"),
            product_name: "Kenya Cane".to_string(),
            variant_name: "750ml".to_string(),
            warehouse: None,
        });
        row.cost_price = cost;
        row.selling_price = selling;
        row.is_dirty = false;
        row
    }

    // -- compute_price --------------------------------------------------------

    #[test]
    fn set_replaces_value() {
        let v = compute_price(PriceField::SellingPrice, BulkPriceOp::Set, 250.0, 100.0, 200.0);
        assert_eq!(v, Some(250.0));
    }

    #[test]
    fn increase_percent() {
        let v = compute_price(
            PriceField::SellingPrice,
            BulkPriceOp::IncreasePercent,
            10.0,
            100.0,
            200.0,
        );
        assert_eq!(v, Some(220.0));
    }

    #[test]
    fn decrease_percent() {
        // Selling 150, decrease 10% -> 135.
        let v = compute_price(
            PriceField::SellingPrice,
            BulkPriceOp::DecreasePercent,
            10.0,
            100.0,
            150.0,
        );
        assert_eq!(v, Some(135.0));
    }

    #[test]
    fn margin_derives_selling_from_cost() {
        // Cost 100, margin 20% -> selling 120.
        let v = compute_price(
            PriceField::SellingPrice,
            BulkPriceOp::MarginPercent,
            20.0,
            100.0,
            150.0,
        );
        assert_eq!(v, Some(120.0));
    }

    #[test]
    fn margin_derives_cost_from_selling() {
        let v = compute_price(
            PriceField::CostPrice,
            BulkPriceOp::MarginPercent,
            20.0,
            100.0,
            120.0,
        );
        assert_eq!(v, Some(100.0));
    }

    #[test]
    fn margin_to_cost_with_degenerate_factor_is_none() {
        let v = compute_price(
            PriceField::CostPrice,
            BulkPriceOp::MarginPercent,
            -100.0,
            100.0,
            120.0,
        );
        assert_eq!(v, None);
    }

    #[test]
    fn result_is_rounded_to_whole_unit() {
        // 150 x 1.033 = 154.95 -> 155.
        let v = compute_price(
            PriceField::SellingPrice,
            BulkPriceOp::IncreasePercent,
            3.3,
            100.0,
            150.0,
        );
        assert_eq!(v, Some(155.0));
    }

    #[test]
    fn non_positive_result_is_none() {
        let v = compute_price(
            PriceField::SellingPrice,
            BulkPriceOp::DecreasePercent,
            100.0,
            100.0,
            150.0,
        );
        assert_eq!(v, None);

        let v = compute_price(PriceField::SellingPrice, BulkPriceOp::Set, 0.0, 100.0, 150.0);
        assert_eq!(v, None);
    }

    // -- apply_bulk_edit ------------------------------------------------------

    #[test]
    fn applies_to_selected_rows_and_marks_dirty() {
        let mut rows = vec![bound_row(100.0, 150.0), bound_row(200.0, 300.0)];
        let selected = vec![rows[0].id];

        let changed = apply_bulk_edit(
            &mut rows,
            &selected,
            PriceField::SellingPrice,
            BulkPriceOp::IncreasePercent,
            10.0,
        )
        .unwrap();

        assert_eq!(changed, 1);
        assert_eq!(rows[0].selling_price, 165.0);
        assert!(rows[0].is_dirty);
        assert_eq!(rows[1].selling_price, 300.0);
        assert!(!rows[1].is_dirty);
    }

    #[test]
    fn skips_rows_whose_result_would_not_be_positive() {
        let mut rows = vec![bound_row(100.0, 150.0)];
        let selected = vec![rows[0].id];

        let changed = apply_bulk_edit(
            &mut rows,
            &selected,
            PriceField::SellingPrice,
            BulkPriceOp::Set,
            0.0,
        )
        .unwrap();

        assert_eq!(changed, 0);
        assert_eq!(rows[0].selling_price, 150.0);
        assert!(!rows[0].is_dirty);
    }

    #[test]
    fn skips_placeholder_rows() {
        let mut rows = vec![InventoryRow::new()];
        let selected = vec![rows[0].id];

        let changed = apply_bulk_edit(
            &mut rows,
            &selected,
            PriceField::CostPrice,
            BulkPriceOp::Set,
            100.0,
        )
        .unwrap();

        assert_eq!(changed, 0);
    }

    #[test]
    fn non_finite_operand_is_rejected() {
        let mut rows = vec![bound_row(100.0, 150.0)];
        let selected = vec![rows[0].id];

        let result = apply_bulk_edit(
            &mut rows,
            &selected,
            PriceField::SellingPrice,
            BulkPriceOp::Set,
            f64::NAN,
        );
        assert!(result.is_err());
    }
}
