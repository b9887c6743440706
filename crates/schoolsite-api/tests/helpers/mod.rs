//! Shared helpers for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tower::ServiceExt;

use schoolsite_api::{AppState, build_app};
use schoolsite_auth::{PasswordHasher, StaticCredentialAuthenticator};
use schoolsite_core::config::{AppConfig, StorageProviderKind};
use schoolsite_database::{MemoryCollectionStore, MemoryDocumentStore};
use schoolsite_entity::catalog::{Catalog, DOCUMENTS_BUCKET, IMAGES_BUCKET};
use schoolsite_storage::{MemoryObjectStore, StorageManager};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Test application backed by in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state behind the router
    pub state: AppState,
    /// Image bucket
    pub images: Arc<MemoryObjectStore>,
    /// PDF bucket
    pub documents: Arc<MemoryObjectStore>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.storage.provider = StorageProviderKind::Memory;
        config.storage.max_asset_bytes = 64 * 1024;
        Self::with_config(config).await
    }

    /// Create a test application whose buckets come from `config.storage`.
    pub async fn with_config(config: AppConfig) -> Self {
        let images = Arc::new(MemoryObjectStore::new(
            IMAGES_BUCKET,
            &config.storage.public_url_prefix,
        ));
        let documents = Arc::new(MemoryObjectStore::new(
            DOCUMENTS_BUCKET,
            &config.storage.public_url_prefix,
        ));

        let storage = match config.storage.provider {
            StorageProviderKind::Memory => {
                let storage = StorageManager::new();
                storage.register(IMAGES_BUCKET, images.clone()).await;
                storage.register(DOCUMENTS_BUCKET, documents.clone()).await;
                storage
            }
            StorageProviderKind::Local => StorageManager::from_config(&config.storage)
                .await
                .unwrap(),
        };

        let hash = PasswordHasher::new().hash_password(ADMIN_PASSWORD).unwrap();
        let authenticator = Arc::new(StaticCredentialAuthenticator::new(ADMIN_USER, &hash).unwrap());

        let state = AppState::new(
            config,
            Catalog::builtin(),
            storage,
            Arc::new(MemoryCollectionStore::new()),
            Arc::new(MemoryDocumentStore::new()),
            authenticator,
        );

        Self {
            router: build_app(state.clone()),
            state,
            images,
            documents,
        }
    }

    /// Send a request with an optional JSON body and Authorization header.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).unwrap())
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let response = self
            .router
            .clone()
            .oneshot(req.body(Body::from(body_str)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            raw: bytes.to_vec(),
        }
    }

    /// Public GET.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Request authenticated as the static admin.
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let header = basic(ADMIN_USER, ADMIN_PASSWORD);
        self.request(method, path, body, Some(&header)).await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// `Authorization: Basic` header value.
pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// JSON asset body for `bytes`.
pub fn asset(file_name: &str, content_type: &str, bytes: &[u8]) -> Value {
    json!({
        "file_name": file_name,
        "content_type": content_type,
        "data_base64": STANDARD.encode(bytes),
    })
}
