//! Shared test utilities for advtrack-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use advtrack_core::{AdvancementStore, NewAdvancement, TursoStore, seed};
use advtrack_server::{AdvtrackServer, AppState, ServerConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server plus the handles a test needs to inspect it
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<TursoStore>,
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Build an advancement row with an empty description
#[allow(dead_code)]
pub fn advancement(id: i64, name: &str, tab_id: i64, parent_id: Option<i64>) -> NewAdvancement {
    NewAdvancement {
        id,
        name: name.to_string(),
        tab_id,
        description: String::new(),
        parent_id,
        rewards: None,
        resource_path: None,
        completed: false,
    }
}

/// Seed a fresh database and serve it on an ephemeral port
pub async fn spawn_server(rows: &[NewAdvancement]) -> TestServer {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(
        TursoStore::new_local(&dir.path().join("it.db"))
            .await
            .unwrap(),
    );
    let world = store.add_world(seed::DEFAULT_WORLD_NAME).await.unwrap();
    store.insert_tabs(&seed::default_tabs(world.id)).await.unwrap();
    store.import_advancements(rows).await.unwrap();

    let state = Arc::new(AppState::new(store.clone()));
    let server = AdvtrackServer::with_state(ServerConfig::default(), state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    TestServer { addr, store, dir }
}

/// HTTP client that reports redirects instead of following them
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
