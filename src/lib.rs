pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;
pub mod upstream;

pub use config::AppConfig;
pub use error::{InputError, ReportError, SinkError, UpstreamError};
pub use service::{ReportRequest, SellThroughService};
