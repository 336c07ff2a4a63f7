//! Shared test harness: an in-memory user store and a fully wired router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use authgate_server::auth::{AuthService, TokenCodec};
use authgate_server::models::User;
use authgate_server::routes;
use authgate_server::state::AppState;
use authgate_server::store::{NewUser, ProfileChanges, StoreError, UserStore};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory user store backing the integration tests
#[derive(Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    fn find<F: Fn(&User) -> bool>(&self, pred: F) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| pred(u))
            .cloned()
    }

    /// Flip a user's active flag off
    pub fn deactivate(&self, username: &str) {
        let mut users = self.users.lock().unwrap();
        for user in users.values_mut() {
            if user.username == username {
                user.is_active = false;
            }
        }
    }

    /// Drop a user record entirely
    pub fn remove(&self, username: &str) {
        let mut users = self.users.lock().unwrap();
        users.retain(|_, u| u.username != username);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.username == username))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.email == email))
    }

    async fn get_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self.find(|u| u.username == identifier || u.email == identifier))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            hashed_password: new_user.hashed_password,
            full_name: new_user.full_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(full_name) = changes.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(hashed_password) = changes.hashed_password {
            user.hashed_password = hashed_password;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

/// A wired-up router plus handles into its collaborators
pub struct TestApp {
    pub router: Router,
    pub store: MemoryUserStore,
    pub codec: TokenCodec,
}

pub fn test_codec() -> TokenCodec {
    TokenCodec::new(
        TEST_SECRET,
        Algorithm::HS256,
        Duration::minutes(30),
        Duration::days(7),
    )
}

pub fn test_app() -> TestApp {
    let store = MemoryUserStore::default();
    let codec = test_codec();
    let router = router_with_store(Arc::new(store.clone()), codec.clone());

    TestApp {
        router,
        store,
        codec,
    }
}

/// Wire the full router around an arbitrary store implementation
pub fn router_with_store(store: Arc<dyn UserStore>, codec: TokenCodec) -> Router {
    let auth_service = Arc::new(AuthService::new(store, codec));

    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::user_routes())
        .with_state(AppState::new(auth_service))
}

/// Send a request and return the status and parsed JSON body
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register a user and return the response body
pub async fn register(router: &Router, email: &str, username: &str, password: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "username": username,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    body
}

/// Log in and return the token pair body
pub async fn login(router: &Router, username: &str, password: &str) -> Value {
    let (status, body) = send(
        router,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({
            "username": username,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body
}
