//! Opaque identifier types shared across the workspace.
//!
//! Catalog references (`ProductRef`, `VariantRef`, `WarehouseRef`,
//! `ChannelRef`) are handles minted by the remote backend and treated
//! as opaque strings on this side. `RowId` is generated client-side
//! when a spreadsheet row is created and is never reused.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! opaque_ref {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_ref!(
    /// Handle to a catalog product.
    ProductRef
);
opaque_ref!(
    /// Handle to a sellable variant (SKU) of a product.
    VariantRef
);
opaque_ref!(
    /// Handle to a stock-holding location.
    WarehouseRef
);
opaque_ref!(
    /// Handle to a sales channel (storefront / price list).
    ChannelRef
);

/// Stable identifier for one spreadsheet row, minted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Uuid);

impl RowId {
    /// Mint a fresh row id. Ids are never reused.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
