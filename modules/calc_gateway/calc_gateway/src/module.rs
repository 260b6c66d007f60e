//! Calc Gateway module definition
//!
//! Builds the HTTP adapters from configuration, wires them into the domain
//! service and registers the REST routes.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use calc_gateway_sdk::CalcGatewayClient;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api::rest::routes;
use crate::config::CalcGatewayConfig;
use crate::domain::Service;
use crate::domain::metrics::MetricsReporter;
use crate::infra::{HttpMetricsClient, HttpOperationClient};
use crate::local_client::CalcGatewayLocalClient;

/// Largest accepted expression body.
const MAX_EXPRESSION_BYTES: usize = 64 * 1024;

/// Calc gateway module.
///
/// Holds the domain `Service`; configuration is consumed once in [`CalcGateway::init`].
pub struct CalcGateway {
    service: Arc<Service>,
}

impl CalcGateway {
    /// Build the module from its configuration.
    ///
    /// # Errors
    /// Returns an error if an endpoint URL is invalid or the HTTP client cannot be built.
    pub fn init(config: &CalcGatewayConfig) -> Result<Self> {
        tracing::info!("Initializing calc_gateway module");

        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        let operations =
            HttpOperationClient::new(http.clone(), &config.operations, config.operation_timeout())
                .context("invalid operation service URL")?;

        let reporter = if config.metrics.enabled {
            let metrics = HttpMetricsClient::new(http, &config.metrics.url, config.metrics.timeout())
                .context("invalid metrics collector URL")?;
            MetricsReporter::new(Arc::new(metrics), config.metrics.delivery)
        } else {
            tracing::info!("Metrics reporting disabled");
            MetricsReporter::disabled()
        };

        let service = Arc::new(Service::new(Arc::new(operations), reporter));

        tracing::info!(
            operation_timeout_ms = config.operation_timeout_ms,
            metrics_enabled = config.metrics.enabled,
            "calc_gateway module initialized"
        );
        Ok(Self { service })
    }

    /// Wrap an already built service, e.g. one wired with in-memory ports.
    #[must_use]
    pub fn from_service(service: Arc<Service>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for other components.
    #[must_use]
    pub fn client(&self) -> Arc<dyn CalcGatewayClient> {
        Arc::new(CalcGatewayLocalClient::new(self.service()))
    }

    /// Register the module's routes on `router`, with request tracing and a body size limit.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        tracing::info!("Registering calc_gateway REST routes");

        routes::register_routes(router, self.service())
            .layer(RequestBodyLimitLayer::new(MAX_EXPRESSION_BYTES))
            .layer(TraceLayer::new_for_http())
    }
}
