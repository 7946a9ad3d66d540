//! Money helpers.
//!
//! Prices live in memory as `f64` in a single currency unit. They are
//! rendered to two decimal places only at the mutation wire boundary,
//! and the bulk editor rounds computed values to the nearest whole
//! unit before writing them back to a row.

/// Format a monetary amount to two decimal places for the wire.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Round an amount to the nearest whole currency unit.
pub fn round_to_unit(amount: f64) -> f64 {
    amount.round()
}
