use std::sync::Arc;

use auth::Algorithm;
use auth::TokenCodec;
use identity_service::domain::session::guard::AccessGuard;
use identity_service::domain::session::models::TokenLifetimes;
use identity_service::domain::session::service::SessionService;
use identity_service::domain::user::models::Role;
use identity_service::domain::user::models::User;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let codec = Arc::new(
            TokenCodec::new(TEST_SECRET, Algorithm::HS256).expect("Failed to create token codec"),
        );

        let session_service = Arc::new(
            SessionService::new(
                Arc::clone(&repository),
                Arc::clone(&codec),
                TokenLifetimes::default(),
            )
            .expect("Failed to create session service"),
        );
        let access_guard = Arc::new(AccessGuard::new(
            Arc::clone(&repository),
            Arc::clone(&codec),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));

        let router = create_router(
            session_service,
            access_guard,
            user_service,
            &["http://localhost:3000".to_string()],
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            repository,
            codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user with `TEST_PASSWORD` and return the token pair data.
    pub async fn register(&self, username: &str, email: &str) -> serde_json::Value {
        let response = self
            .post("/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Register a user and return its access token.
    pub async fn access_token(&self, username: &str, email: &str) -> String {
        self.register(username, email).await["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Fetch a stored user straight from the repository.
    pub async fn stored_user(&self, email: &str) -> User {
        self.repository
            .find_by_email(email)
            .await
            .expect("Repository failure")
            .expect("User not found")
    }

    pub async fn set_role(&self, email: &str, role: Role) {
        let mut user = self.stored_user(email).await;
        user.role = role;
        self.repository
            .update(user)
            .await
            .expect("Failed to update role");
    }

    pub async fn deactivate(&self, email: &str) {
        let mut user = self.stored_user(email).await;
        user.is_active = false;
        self.repository
            .update(user)
            .await
            .expect("Failed to deactivate user");
    }
}
