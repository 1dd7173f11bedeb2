use std::sync::Arc;

use auth::AccessTokenCodec;
use auth::Authenticator;
use chirpy::domain::account::service::AccountService;
use chirpy::domain::metrics::HitCounter;
use chirpy::domain::platform::Platform;
use chirpy::domain::session::service::SessionService;
use chirpy::inbound::http::router::create_router;
use chirpy::outbound::repositories::InMemoryRefreshTokenRepository;
use chirpy::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub codec: AccessTokenCodec,
}

/// Tokens returned by a successful login
pub struct LoggedIn {
    pub user_id: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application on the production platform
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Production).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryRefreshTokenRepository::with_users(Arc::clone(
            &users,
        )));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let account_service = Arc::new(AccountService::new(Arc::clone(&users)));
        let session_service = Arc::new(SessionService::new(
            users,
            tokens,
            authenticator,
            platform,
        ));

        let router = create_router(account_service, session_service, Arc::new(HitCounter::new()));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            codec: AccessTokenCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued tokens
    pub async fn login(&self, email: &str, password: &str) -> LoggedIn {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");

        LoggedIn {
            user_id: body["data"]["id"].as_str().unwrap().to_string(),
            token: body["data"]["token"].as_str().unwrap().to_string(),
            refresh_token: body["data"]["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}
