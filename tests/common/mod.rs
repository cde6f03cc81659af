//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

use task_api::{Database, HttpServer, ServiceConfig, Shutdown};

/// A running server on an ephemeral port with its own database file.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub db: Arc<Database>,
    shutdown: Shutdown,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Boot a server against a fresh temp database.
pub async fn start_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("db.json");

    let mut config = ServiceConfig::default();
    config.storage.path = db_path.to_string_lossy().into_owned();
    config.listener.bind_address = "127.0.0.1:0".into();

    let db = Arc::new(Database::open(&db_path).await);
    let server = HttpServer::new(&config, db.clone()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.triggered();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // let the accept loop start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        db_path,
        db,
        shutdown,
        _dir: dir,
    }
}

/// HTTP client that never goes through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
