//! The mutation gateway seam.
//!
//! The sync engine depends on exactly three remote operations. They
//! are modeled as typed request records and a trait so the engine can
//! be exercised against a test double without any network.

use async_trait::async_trait;
use serde::Serialize;

use soko_core::money::format_amount;
use soko_core::types::{ChannelRef, VariantRef, WarehouseRef};

use crate::error::GatewayError;

/// Channel price update for one variant.
///
/// Amounts travel as strings pre-formatted to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceUpdateRequest {
    pub variant: VariantRef,
    pub channel: ChannelRef,
    pub price: String,
    pub cost_price: String,
}

impl PriceUpdateRequest {
    /// Build a request from in-memory amounts, applying the wire
    /// formatting.
    pub fn new(variant: VariantRef, channel: ChannelRef, selling_price: f64, cost_price: f64) -> Self {
        Self {
            variant,
            channel,
            price: format_amount(selling_price),
            cost_price: format_amount(cost_price),
        }
    }
}

/// Update the on-hand quantity of an existing stock record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockUpdateRequest {
    pub variant: VariantRef,
    pub warehouse: WarehouseRef,
    pub quantity: i64,
}

/// Create a stock record where none exists yet. Same tuple as
/// [`StockUpdateRequest`] — the fallback path reuses the exact values
/// the update attempted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCreateRequest {
    pub variant: VariantRef,
    pub warehouse: WarehouseRef,
    pub quantity: i64,
}

impl From<StockUpdateRequest> for StockCreateRequest {
    fn from(req: StockUpdateRequest) -> Self {
        Self {
            variant: req.variant,
            warehouse: req.warehouse,
            quantity: req.quantity,
        }
    }
}

/// The three remote mutations the sync engine drives.
#[async_trait]
pub trait MutationGateway: Send + Sync {
    async fn update_price(&self, req: PriceUpdateRequest) -> Result<(), GatewayError>;

    /// Update an existing stock record. Must return
    /// [`GatewayError::NotFound`] when no record exists for the
    /// variant at the warehouse, so the caller can fall back to
    /// [`create_stock`](Self::create_stock).
    async fn update_stock(&self, req: StockUpdateRequest) -> Result<(), GatewayError>;

    async fn create_stock(&self, req: StockCreateRequest) -> Result<(), GatewayError>;
}
