//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use customer_api::config::ApiConfig;
use customer_api::{HttpServer, Shutdown};
use tokio::net::TcpListener;

#[allow(dead_code)]
pub const ADMIN_USER: &str = "root";
#[allow(dead_code)]
pub const ADMIN_PASSWORD: &str = "s3cret";

/// A server running on an ephemeral port. Dropping it drops the
/// shutdown handle, which stops the server.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Config with a known admin account.
pub fn test_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.admin.username = ADMIN_USER.into();
    config.admin.password = ADMIN_PASSWORD.into();
    config
}

/// Bind an ephemeral port and serve `config` on it.
pub async fn start_server(config: ApiConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let signal = shutdown.signal();

    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    // The listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        _shutdown: shutdown,
    }
}

/// A client that never reuses connections, so shutdown is not held up.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
