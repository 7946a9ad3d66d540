//! Shared test double for the mutation gateway.
//!
//! `MockGateway` lets tests script per-variant outcomes for each of
//! the three operations, records every request it receives, and
//! tracks how many calls are in flight at once so bounded-concurrency
//! tests can assert the cap.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use soko_core::row::{InventoryRow, ProductBinding};
use soko_core::types::{ChannelRef, ProductRef, VariantRef, WarehouseRef};
use soko_gateway::{
    GatewayError, MutationGateway, PriceUpdateRequest, StockCreateRequest, StockUpdateRequest,
};
use soko_sync::{BatchSynchronizer, ProgressBus, SyncConfig};

#[derive(Default)]
pub struct MockGateway {
    price_failures: Mutex<HashMap<String, GatewayError>>,
    stock_update_failures: Mutex<HashMap<String, GatewayError>>,
    stock_create_failures: Mutex<HashMap<String, GatewayError>>,

    pub price_requests: Mutex<Vec<PriceUpdateRequest>>,
    pub stock_update_requests: Mutex<Vec<StockUpdateRequest>>,
    pub stock_create_requests: Mutex<Vec<StockCreateRequest>>,

    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    call_delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fixed delay to every call so concurrent calls overlap.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = Some(delay);
        self
    }

    pub fn fail_price(&self, variant: &str, err: GatewayError) {
        self.price_failures
            .lock()
            .unwrap()
            .insert(variant.to_string(), err);
    }

    pub fn fail_stock_update(&self, variant: &str, err: GatewayError) {
        self.stock_update_failures
            .lock()
            .unwrap()
            .insert(variant.to_string(), err);
    }

    pub fn fail_stock_create(&self, variant: &str, err: GatewayError) {
        self.stock_create_failures
            .lock()
            .unwrap()
            .insert(variant.to_string(), err);
    }

    pub fn total_calls(&self) -> usize {
        self.price_requests.lock().unwrap().len()
            + self.stock_update_requests.lock().unwrap().len()
            + self.stock_create_requests.lock().unwrap().len()
    }

    pub fn stock_calls_for(&self, variant: &str) -> usize {
        let updates = self
            .stock_update_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.variant.as_str() == variant)
            .count();
        let creates = self
            .stock_create_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.variant.as_str() == variant)
            .count();
        updates + creates
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn scripted(
        failures: &Mutex<HashMap<String, GatewayError>>,
        variant: &str,
    ) -> Result<(), GatewayError> {
        match failures.lock().unwrap().get(variant) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MutationGateway for MockGateway {
    async fn update_price(&self, req: PriceUpdateRequest) -> Result<(), GatewayError> {
        self.enter().await;
        let result = Self::scripted(&self.price_failures, req.variant.as_str());
        self.price_requests.lock().unwrap().push(req);
        self.leave();
        result
    }

    async fn update_stock(&self, req: StockUpdateRequest) -> Result<(), GatewayError> {
        self.enter().await;
        let result = Self::scripted(&self.stock_update_failures, req.variant.as_str());
        self.stock_update_requests.lock().unwrap().push(req);
        self.leave();
        result
    }

    async fn create_stock(&self, req: StockCreateRequest) -> Result<(), GatewayError> {
        self.enter().await;
        let result = Self::scripted(&self.stock_create_failures, req.variant.as_str());
        self.stock_create_requests.lock().unwrap().push(req);
        self.leave();
        result
    }
}

/// A dirty, product-bound row ready for submission.
pub fn dirty_row(
    product_name: &str,
    variant_name: &str,
    variant: &str,
    warehouse: Option<&str>,
    quantity: i64,
    cost: f64,
    selling: f64,
) -> InventoryRow {
    let mut row = InventoryRow::new();
    row.bind_product(ProductBinding {
        product: ProductRef::new(format!("prod-{variant}")),
        variant: VariantRef::new(variant),
        product_name: product_name.to_string(),
        variant_name: variant_name.to_string(),
        warehouse: warehouse.map(WarehouseRef::new),
    });
    row.set_quantity(quantity);
    row.set_cost_price(cost);
    row.set_selling_price(selling);
    row
}

/// Test config: session channel `ch-test`, no default warehouse.
pub fn test_config() -> SyncConfig {
    SyncConfig::new(ChannelRef::new("ch-test"))
}

/// Build a synchronizer over the given mock and config, returning the
/// progress bus alongside so tests can subscribe.
pub fn build_synchronizer(
    gateway: std::sync::Arc<MockGateway>,
    config: SyncConfig,
) -> (BatchSynchronizer, std::sync::Arc<ProgressBus>) {
    let bus = std::sync::Arc::new(ProgressBus::default());
    let synchronizer = BatchSynchronizer::new(gateway, config, std::sync::Arc::clone(&bus));
    (synchronizer, bus)
}
