//! HTTP adapters for the domain ports.

pub mod http_metrics_client;
pub mod http_operation_client;

pub use http_metrics_client::HttpMetricsClient;
pub use http_operation_client::HttpOperationClient;
