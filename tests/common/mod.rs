#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use datagate::database::MemoryRepository;

pub struct TestServer {
    pub base_url: String,
    pub repo: Arc<MemoryRepository>,
    pub client: reqwest::Client,
}

/// Serve the real router over a fresh in-memory repository on an unused port.
/// The server lives as long as the test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let (state, repo) = datagate::testing::memory_state();
    let app = datagate::app(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        repo,
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
                "role": role,
            }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    /// Register an account and return a fresh token for it
    pub async fn token_for(&self, username: &str, role: &str) -> Result<String> {
        let email = format!("{}@example.com", username);
        let res = self.register(username, &email, "password", role).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(&email, "password").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    pub async fn create_record(&self, token: &str, title: &str, description: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/admin/data"))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }

    pub async fn list(&self, path: &str, token: &str) -> Result<Response> {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", token)
            .send()
            .await?;
        Ok(res)
    }
}
