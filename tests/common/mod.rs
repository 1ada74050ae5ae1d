//! Shared utilities for integration tests.

use std::sync::Arc;

use match_tracker::config::ServiceConfig;
use match_tracker::http::HttpServer;
use match_tracker::lifecycle::Shutdown;
use match_tracker::store::{MemoryStore, StoreKind};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a match and return the created record.
    #[allow(dead_code)]
    pub async fn create(&self, home: &str, away: &str, date: &str) -> Value {
        let res = self
            .client
            .post(self.url("/api/matches"))
            .json(&json!({ "homeTeam": home, "awayTeam": away, "matchDate": date }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        res.json().await.unwrap()
    }

    #[allow(dead_code)]
    pub async fn patch(&self, path: &str) -> reqwest::Response {
        self.client.patch(self.url(path)).send().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the full HTTP stack over an empty in-memory store.
pub async fn spawn_server() -> TestServer {
    let mut config = ServiceConfig::default();
    config.store.backend = StoreKind::Memory;
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(MemoryStore::new()));
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        shutdown,
    }
}
