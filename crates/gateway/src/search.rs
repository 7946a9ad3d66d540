//! Product search client.
//!
//! The batch-edit surface binds rows to catalog variants via a hosted
//! search index. The orchestrator never touches this — search feeds
//! the row model's product/variant/warehouse handles before a save
//! ever happens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use soko_core::row::{InventoryRow, ProductBinding};
use soko_core::types::{ProductRef, VariantRef, WarehouseRef};

use crate::error::GatewayError;

/// One search request against a named index.
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub index: String,
    pub query: String,
    pub attributes_to_retrieve: Vec<String>,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl SearchQuery {
    /// A query with the attribute set the row-binding UI needs.
    pub fn for_products(index: impl Into<String>, query: impl Into<String>, limit: usize) -> Self {
        Self {
            index: index.into(),
            query: query.into(),
            attributes_to_retrieve: vec![
                "productId".to_string(),
                "variantId".to_string(),
                "productName".to_string(),
                "variantName".to_string(),
                "warehouseId".to_string(),
                "sellingPrice".to_string(),
                "costPrice".to_string(),
            ],
            limit,
            offset: None,
            sort: None,
        }
    }
}

/// One hit from the search index, carrying everything a row needs to
/// bind and prefill.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub product_id: String,
    pub variant_id: String,
    pub product_name: String,
    pub variant_name: String,
    /// Warehouse of the variant's existing stock record, when one
    /// exists. Absent for variants that have never been stocked.
    #[serde(default)]
    pub warehouse_id: Option<String>,
    #[serde(default)]
    pub selling_price: Option<f64>,
    #[serde(default)]
    pub cost_price: Option<f64>,
}

impl SearchHit {
    /// Bind this hit to a row and prefill its prices, marking it dirty.
    pub fn bind_to(&self, row: &mut InventoryRow) {
        row.bind_product(ProductBinding {
            product: ProductRef::new(self.product_id.clone()),
            variant: VariantRef::new(self.variant_id.clone()),
            product_name: self.product_name.clone(),
            variant_name: self.variant_name.clone(),
            warehouse: self.warehouse_id.clone().map(WarehouseRef::new),
        });
        if let Some(p) = self.selling_price {
            row.set_selling_price(p);
        }
        if let Some(p) = self.cost_price {
            row.set_cost_price(p);
        }
    }
}

/// Search capability consumed by the row-binding UI.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    async fn search(&self, query: SearchQuery) -> Result<Vec<SearchHit>, GatewayError>;
}

/// HTTP client for the hosted search index.
pub struct SearchIndexClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SearchIndexClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl ProductSearch for SearchIndexClient {
    async fn search(&self, query: SearchQuery) -> Result<Vec<SearchHit>, GatewayError> {
        let url = format!("{}/indexes/{}/query", self.base_url, query.index);
        let body = json!({
            "query": query.query,
            "attributesToRetrieve": query.attributes_to_retrieve,
            "limit": query.limit,
            "offset": query.offset,
            "sort": query.sort,
        });

        let response = self
            .client
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "search index returned {status}: {body}"
            )));
        }

        #[derive(Deserialize)]
        struct SearchResponse {
            hits: Vec<SearchHit>,
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("malformed search response: {e}")))?;

        tracing::debug!(
            index = %query.index,
            hits = parsed.hits.len(),
            "Search query completed",
        );
        Ok(parsed.hits)
    }
}
