//! Remote collaborators for the inventory sync engine.
//!
//! Defines the mutation gateway trait the orchestrator drives (price
//! update, stock update, stock create), its GraphQL-over-HTTP
//! implementation, the product-search client used by the row-binding
//! UI, and the error taxonomy for remote calls.

pub mod error;
pub mod graphql;
pub mod mutation;
pub mod search;

pub use error::GatewayError;
pub use mutation::{MutationGateway, PriceUpdateRequest, StockCreateRequest, StockUpdateRequest};
