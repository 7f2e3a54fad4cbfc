//! Integration tests for Deskfront.
//!
//! Each test starts the storefront service in-process on an ephemeral port,
//! backed by file storage in its own temporary directory, and talks to it
//! over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p deskfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart API tests
//! - `storefront_wishlist` - Wishlist API and persistence tests

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use deskfront_storefront::catalog::Catalog;
use deskfront_storefront::config::StorefrontConfig;
use deskfront_storefront::routes;
use deskfront_storefront::state::AppState;
use deskfront_storefront::storage::{FileStorage, StorageError};
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How long to wait for a stopped server's connections to release the data
/// directory lock.
const LOCK_WAIT: Duration = Duration::from_secs(5);

/// Open `data_dir`, waiting while a previous server in the same test still
/// owns it.
async fn open_storage(data_dir: &Path) -> std::io::Result<FileStorage> {
    let deadline = tokio::time::Instant::now() + LOCK_WAIT;
    loop {
        match FileStorage::open(data_dir) {
            Err(StorageError::Locked { .. }) if tokio::time::Instant::now() < deadline => {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            result => return result.map_err(std::io::Error::other),
        }
    }
}

/// A storefront service running on a background task.
///
/// The server stops when this value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    client: Client,
}

impl TestServer {
    /// Start a server whose file storage lives in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be opened or the
    /// listener cannot bind.
    pub async fn start(data_dir: &Path, persist_cart: bool) -> std::io::Result<Self> {
        let config = StorefrontConfig {
            port: 0,
            data_dir: data_dir.to_path_buf(),
            persist_cart,
            ..StorefrontConfig::default()
        };
        let storage = open_storage(data_dir).await?;
        let state = AppState::with_storage(config, Catalog::sample(), Arc::new(storage));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = routes::app(state);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            handle,
            client: Client::new(),
        })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> reqwest::Result<(reqwest::StatusCode, serde_json::Value)> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }

    /// POST a JSON body to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> reqwest::Result<(reqwest::StatusCode, serde_json::Value)> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
