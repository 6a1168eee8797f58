//! Fixtures shared by client and route tests.

use std::sync::{Arc, Mutex};

use axum::Router;

use crate::core::config::BackendConfig;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// Stands in for the remote REST backend in HTTP client tests.
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        api_base_url: base_url.to_string(),
        timeout: Some(std::time::Duration::from_secs(5)),
    }
}

/// Request bodies captured by a mock backend route
#[derive(Clone, Default)]
pub struct Recorded(pub Arc<Mutex<Vec<serde_json::Value>>>);

impl Recorded {
    pub fn push(&self, value: serde_json::Value) {
        self.0.lock().unwrap().push(value);
    }

    pub fn all(&self) -> Vec<serde_json::Value> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> serde_json::Value {
        self.all().pop().expect("no request was recorded")
    }
}
