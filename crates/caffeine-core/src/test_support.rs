//! Shared fixtures for backend-facing tests

use caffeine_proxy::{CaffeineClient, CaffeineClientConfig};
use std::sync::Arc;
use wiremock::MockServer;

pub const USERNAME: &str = "broker";
pub const PASSWORD: &str = "s3cr3t";

/// Client for the backend at `url`
pub fn client_at(url: &str) -> Arc<CaffeineClient> {
    let client = CaffeineClient::new(CaffeineClientConfig {
        url: url.to_string(),
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
        skip_tls_verify: false,
        timeout: None,
    })
    .unwrap();

    Arc::new(client)
}

/// Start a mock backend and a client pointed at it
pub async fn backend() -> (MockServer, Arc<CaffeineClient>) {
    let server = MockServer::start().await;
    let client = client_at(&server.uri());

    (server, client)
}
