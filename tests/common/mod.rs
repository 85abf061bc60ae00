//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rollcall::auth::{Role, Session};
use rollcall::config::ClientConfig;
use rollcall::Client;
use tempfile::TempDir;
use wiremock::MockServer;

/// A client talking to a wiremock server with its session file in a
/// temporary directory.
pub struct TestEnv {
    pub server: MockServer,
    pub client: Client,
    pub dir: TempDir,
}

impl TestEnv {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let client = connect(&server, &dir).await;
        Self {
            server,
            client,
            dir,
        }
    }

    /// Start already logged in as `role` with token `tok-live`.
    pub async fn logged_in(role: Role) -> Self {
        let env = Self::start().await;
        env.client
            .session()
            .save(Session::new("tok-live", "Ann", "S1", role))
            .await
            .expect("save session");
        env
    }

    pub fn session_file(&self) -> std::path::PathBuf {
        self.dir.path().join("session.json")
    }

    /// A fresh client over the same server and session file.
    pub async fn reconnect(&self) -> Client {
        connect(&self.server, &self.dir).await
    }
}

async fn connect(server: &MockServer, dir: &TempDir) -> Client {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_session_path(dir.path().join("session.json"));
    Client::connect(config).await.expect("connect")
}

pub fn dashboard_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": [{
            "_id": "1",
            "className": "Math",
            "section": "A",
            "schedule": {"days": ["Mon", "Wed"]},
            "students": ["s1", "s2"],
            "teacher": "t1",
            "createdAt": "2024-01-01"
        }]
    })
}
