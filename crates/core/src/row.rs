//! Editable inventory row model.
//!
//! One [`InventoryRow`] represents one line in the batch-edit surface.
//! Rows start as empty placeholders, get bound to a catalog variant via
//! product search, and accumulate edits until the user saves. The sync
//! engine clears the dirty flag only after a confirmed two-phase
//! success, so failed rows are re-submitted on the next save.

use serde::{Deserialize, Serialize};

use crate::types::{ProductRef, RowId, VariantRef, WarehouseRef};

/// The catalog selection attached to a row.
///
/// Produced from a product-search hit. `warehouse` is the variant's
/// existing stock location, if the backend reported one; rows without
/// it fall back to the session's configured default warehouse at save
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBinding {
    pub product: ProductRef,
    pub variant: VariantRef,
    pub product_name: String,
    pub variant_name: String,
    pub warehouse: Option<WarehouseRef>,
}

/// One editable line in the inventory spreadsheet.
///
/// Exactly one warehouse/channel pair is active per row per save; the
/// channel is session-constant and supplied by configuration, not
/// stored on the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Stable client-generated id, never reused.
    pub id: RowId,

    /// `None` while the row is a placeholder awaiting product search.
    pub product: Option<ProductBinding>,

    /// Intended on-hand stock count. Edits may drive this negative;
    /// validation rejects negative values before submission.
    pub quantity: i64,

    /// Purchase cost per unit.
    pub cost_price: f64,

    /// Sale price per unit on the active channel.
    pub selling_price: f64,

    /// True after any user edit; cleared only on confirmed sync success.
    pub is_dirty: bool,

    /// True for rows added this session that have never been saved.
    /// Cosmetic only.
    pub is_newly_added: bool,

    /// Messages from the last failed validation screen. Empty when the
    /// row passed its most recent validation.
    pub validation_errors: Vec<String>,
}

impl InventoryRow {
    /// Create a blank placeholder row.
    ///
    /// Placeholders are not dirty: they carry nothing worth saving
    /// until a product is bound.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            id: RowId::new(),
            product: None,
            quantity: 0,
            cost_price: 0.0,
            selling_price: 0.0,
            is_dirty: false,
            is_newly_added: true,
            validation_errors: Vec::new(),
        }
    }

    /// Attach a catalog selection to the row and mark it dirty.
    pub fn bind_product(&mut self, binding: ProductBinding) {
        self.product = Some(binding);
        self.is_dirty = true;
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.is_dirty = true;
    }

    pub fn set_cost_price(&mut self, cost_price: f64) {
        self.cost_price = cost_price;
        self.is_dirty = true;
    }

    pub fn set_selling_price(&mut self, selling_price: f64) {
        self.selling_price = selling_price;
        self.is_dirty = true;
    }

    /// Whether the row belongs in a save batch: product bound and
    /// carrying unsaved edits. Placeholder rows are never submittable.
    pub fn is_submittable(&self) -> bool {
        self.product.is_some() && self.is_dirty
    }

    /// The warehouse this row's quantity applies to, if the bound
    /// variant has an existing stock location.
    pub fn warehouse(&self) -> Option<&WarehouseRef> {
        self.product.as_ref().and_then(|p| p.warehouse.as_ref())
    }

    /// Variant handle, if a product is bound.
    pub fn variant(&self) -> Option<&VariantRef> {
        self.product.as_ref().map(|p| &p.variant)
    }

    /// Human-readable `"<product> - <variant>"` label used in failure
    /// summaries.
    pub fn display_name(&self) -> String {
        match &self.product {
            Some(p) => format!("{} - {}", p.product_name, p.variant_name),
            None => "(no product)".to_string(),
        }
    }

    /// Record a confirmed two-phase sync success: the row no longer
    /// carries unsaved edits and is no longer "new".
    pub fn mark_synchronized(&mut self) {
        self.is_dirty = false;
        self.is_newly_added = false;
    }
}
