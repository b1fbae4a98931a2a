//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mta_hosting_optimizer::{OptimizerConfig, Service, Shutdown};
use tokio::net::TcpListener;

/// A service running on an ephemeral local port.
pub struct RunningService {
    pub addr: SocketAddr,
    pub shutdown: Arc<Shutdown>,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with a threshold variable no real environment sets.
pub fn test_config(variable: &str) -> OptimizerConfig {
    let mut config = OptimizerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.threshold.variable = variable.into();
    config.threshold.env_file = None;
    config
}

/// Start the service and wait until it answers.
pub async fn start_service(config: OptimizerConfig) -> RunningService {
    let service = Service::from_config(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Shutdown::new());

    let server_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let _ = service.serve(listener, &server_shutdown).await;
    });

    let running = RunningService { addr, shutdown };
    let client = client();
    for _ in 0..50 {
        if client.get(running.url("/healthz")).send().await.is_ok() {
            return running;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("service did not start on {}", addr);
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
