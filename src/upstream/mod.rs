pub mod client;
pub mod endpoints;

pub use client::{decode_records, BigCommerceClient, JsonFetcher};
pub use endpoints::OrdersEndpoint;
