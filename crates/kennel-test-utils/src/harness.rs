// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` opens a temp SQLite database, wraps it in the real
//! `SqliteDogStore`, and builds the full router around it. Requests are
//! driven through `tower::ServiceExt::oneshot`, so no socket is bound.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use kennel_core::KennelError;
use kennel_gateway::{AppState, Selection, build_router};
use kennel_storage::{Database, SqliteDogStore};
use secrecy::SecretString;
use tower::ServiceExt;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    auth_token: Option<String>,
    public_files: Vec<(String, String)>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            auth_token: None,
            public_files: Vec::new(),
        }
    }

    /// Key the temp database with `token`.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Place a static file under the public directory.
    pub fn with_public_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.public_files.push((name.into(), contents.into()));
        self
    }

    /// Build the harness, creating the database and router.
    pub async fn build(self) -> Result<TestHarness, KennelError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| KennelError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");
        let public_dir = temp_dir.path().join("public");
        std::fs::create_dir_all(&public_dir)
            .map_err(|e| KennelError::Storage { source: e.into() })?;
        for (name, contents) in &self.public_files {
            std::fs::write(public_dir.join(name), contents)
                .map_err(|e| KennelError::Storage { source: e.into() })?;
        }

        let token = self.auth_token.map(SecretString::from);
        let db = Database::open(&db_path.to_string_lossy(), token.as_ref()).await?;
        let store = Arc::new(SqliteDogStore::new(db));

        let state = AppState::new(store.clone(), Selection::new());
        let router = build_router(state, &public_dir);

        Ok(TestHarness {
            store,
            router,
            _temp_dir: temp_dir,
        })
    }
}

/// A response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// A header value as text, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A complete app over a temp database.
pub struct TestHarness {
    store: Arc<SqliteDogStore>,
    router: Router,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A harness with default options.
    pub async fn new() -> Result<Self, KennelError> {
        Self::builder().build().await
    }

    /// Send a request. A `Some` body is sent urlencoded.
    pub async fn request(&self, method: Method, uri: &str, form: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };
        let request = match builder.body(body) {
            Ok(request) => request,
            Err(e) => panic!("invalid test request {uri}: {e}"),
        };
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = match to_bytes(response.into_body(), usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => panic!("failed to read body of {uri}: {e}"),
        };
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, form: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(form)).await
    }

    pub async fn put(&self, uri: &str, form: &str) -> TestResponse {
        self.request(Method::PUT, uri, Some(form)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Close the database, consuming the harness.
    pub async fn shutdown(self) -> Result<(), KennelError> {
        let Self { store, router, .. } = self;
        drop(router);
        match Arc::try_unwrap(store) {
            Ok(store) => store.into_database().close().await,
            Err(store) => store.database().clone().close().await,
        }
    }
}
