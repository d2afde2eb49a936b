//! Application state

use caffeine_core::{Catalog, ServiceInstanceBindingService, ServiceInstanceService};
use caffeine_proxy::CaffeineClient;
use std::sync::Arc;

/// Prometheus handle used to render the `/metrics` endpoint
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub instances: Arc<ServiceInstanceService>,
    pub bindings: Arc<ServiceInstanceBindingService>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        instances: Arc<ServiceInstanceService>,
        bindings: Arc<ServiceInstanceBindingService>,
    ) -> Self {
        Self {
            catalog,
            instances,
            bindings,
        }
    }

    /// Build the state around a single shared backend client
    pub fn with_client(client: Arc<CaffeineClient>) -> Self {
        Self::new(
            Arc::new(Catalog::new()),
            Arc::new(ServiceInstanceService::new(client.clone())),
            Arc::new(ServiceInstanceBindingService::new(client)),
        )
    }
}
