//! GraphQL-over-HTTP implementation of the mutation gateway.
//!
//! Wraps the backend's GraphQL endpoint with [`reqwest`]. Transport
//! failures and non-2xx statuses become [`GatewayError::Transport`];
//! error entries inside an otherwise-successful response become
//! [`GatewayError::Business`], except entries carrying the backend's
//! `NOT_FOUND` code, which map to [`GatewayError::NotFound`].

use serde_json::{json, Value};

use soko_core::types::{VariantRef, WarehouseRef};

use crate::error::GatewayError;
use crate::mutation::{
    MutationGateway, PriceUpdateRequest, StockCreateRequest, StockUpdateRequest,
};

/// Error code the backend uses for missing records.
const CODE_NOT_FOUND: &str = "NOT_FOUND";

const PRICE_UPDATE_DOC: &str = "\
mutation VariantChannelPriceUpdate($id: ID!, $input: [ProductVariantChannelListingAddInput!]!) {
  productVariantChannelListingUpdate(id: $id, input: $input) {
    errors { message code }
  }
}";

const STOCK_UPDATE_DOC: &str = "\
mutation VariantStocksUpdate($variantId: ID!, $stocks: [StockInput!]!) {
  productVariantStocksUpdate(variantId: $variantId, stocks: $stocks) {
    errors { message code }
  }
}";

const STOCK_CREATE_DOC: &str = "\
mutation VariantStocksCreate($variantId: ID!, $stocks: [StockInput!]!) {
  productVariantStocksCreate(variantId: $variantId, stocks: $stocks) {
    errors { message code }
  }
}";

/// HTTP client for the backend GraphQL endpoint.
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl GraphqlClient {
    /// Create a client for the given endpoint URL.
    pub fn new(endpoint: String, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            auth_token,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with the search client).
    pub fn with_client(
        client: reqwest::Client,
        endpoint: String,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            auth_token,
        }
    }

    /// Execute one GraphQL document and return the `data` object.
    ///
    /// Top-level `errors` entries (query-level failures) are reported
    /// as [`GatewayError::Business`]; the caller inspects
    /// mutation-payload errors itself via [`mutation_errors`].
    pub async fn execute(&self, document: &str, variables: Value) -> Result<Value, GatewayError> {
        let body = json!({
            "query": document,
            "variables": variables,
        });

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "GraphQL endpoint returned {status}: {body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("malformed response body: {e}")))?;

        if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return Err(GatewayError::Business(join_messages(errors)));
            }
        }

        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }
}

/// Inspect a mutation payload's `errors` list and classify it.
///
/// `field` is the mutation's response field name (e.g.
/// `"productVariantStocksUpdate"`). Returns `Ok(())` when the list is
/// absent or empty.
pub fn mutation_errors(data: &Value, field: &str) -> Result<(), GatewayError> {
    let Some(errors) = data
        .get(field)
        .and_then(|f| f.get("errors"))
        .and_then(Value::as_array)
    else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }

    let not_found = errors
        .iter()
        .any(|e| e.get("code").and_then(Value::as_str) == Some(CODE_NOT_FOUND));
    let message = join_messages(errors);
    if not_found {
        Err(GatewayError::NotFound(message))
    } else {
        Err(GatewayError::Business(message))
    }
}

fn join_messages(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// [`MutationGateway`] backed by the GraphQL endpoint.
pub struct GraphqlGateway {
    client: GraphqlClient,
}

impl GraphqlGateway {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    fn stock_variables(variant: &VariantRef, warehouse: &WarehouseRef, quantity: i64) -> Value {
        json!({
            "variantId": variant.as_str(),
            "stocks": [{
                "warehouse": warehouse.as_str(),
                "quantity": quantity,
            }],
        })
    }
}

#[async_trait::async_trait]
impl MutationGateway for GraphqlGateway {
    async fn update_price(&self, req: PriceUpdateRequest) -> Result<(), GatewayError> {
        let variables = json!({
            "id": req.variant.as_str(),
            "input": [{
                "channelId": req.channel.as_str(),
                "price": req.price,
                "costPrice": req.cost_price,
            }],
        });

        let data = self.client.execute(PRICE_UPDATE_DOC, variables).await?;
        let result = mutation_errors(&data, "productVariantChannelListingUpdate");
        if let Err(e) = &result {
            tracing::warn!(variant = %req.variant, error = %e, "Price update rejected");
        }
        result
    }

    async fn update_stock(&self, req: StockUpdateRequest) -> Result<(), GatewayError> {
        let variables = Self::stock_variables(&req.variant, &req.warehouse, req.quantity);
        let data = self.client.execute(STOCK_UPDATE_DOC, variables).await?;
        let result = mutation_errors(&data, "productVariantStocksUpdate");
        if let Err(e) = &result {
            tracing::debug!(variant = %req.variant, error = %e, "Stock update rejected");
        }
        result
    }

    async fn create_stock(&self, req: StockCreateRequest) -> Result<(), GatewayError> {
        let variables = Self::stock_variables(&req.variant, &req.warehouse, req.quantity);
        let data = self.client.execute(STOCK_CREATE_DOC, variables).await?;
        let result = mutation_errors(&data, "productVariantStocksCreate");
        if let Err(e) = &result {
            tracing::warn!(variant = %req.variant, error = %e, "Stock create rejected");
        }
        result
    }
}
