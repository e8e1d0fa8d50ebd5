// SPDX-FileCopyrightText: 2026 Kennel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route handlers.
//!
//! Each handler validates through its extractors, makes one store call,
//! adjusts the selection where the route calls for it and answers with a
//! fragment.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use kennel_core::{HealthStatus, KennelError};
use serde::Serialize;
use tracing::debug;

use crate::collate::compare_names;
use crate::error::ApiError;
use crate::extract::{DogForm, DogIdPath};
use crate::render::{FormView, Fragment};
use crate::server::AppState;

/// htmx response header that fires a client-side event.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Event the page listens on to reload the form.
pub const SELECTION_CHANGE: &str = "selection-change";

fn selection_changed() -> [(HeaderName, HeaderValue); 1] {
    [(HX_TRIGGER, HeaderValue::from_static(SELECTION_CHANGE))]
}

/// DELETE /dog/{id}
pub async fn delete_dog(
    State(state): State<AppState>,
    DogIdPath(id): DogIdPath,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(KennelError::NotFound { id: id.get() }.into())
    }
}

/// GET /deselect
pub async fn deselect(State(state): State<AppState>) -> impl IntoResponse {
    state.selection.deselect();
    (StatusCode::OK, selection_changed())
}

/// GET /form
pub async fn form(State(state): State<AppState>) -> Result<Fragment, ApiError> {
    let view = match state.selection.selected_id() {
        None => FormView::create(),
        Some(id) => {
            let dog = state.store.get_one(id).await?;
            if dog.is_none() {
                debug!(%id, "selected dog no longer exists");
            }
            FormView::update(id, dog.as_ref())
        }
    };
    Ok(Fragment::Form(view))
}

/// GET /select/{id}
pub async fn select(
    State(state): State<AppState>,
    DogIdPath(id): DogIdPath,
) -> impl IntoResponse {
    state.selection.select(id);
    (StatusCode::OK, selection_changed())
}

/// GET /table-rows
pub async fn table_rows(State(state): State<AppState>) -> Result<Fragment, ApiError> {
    let mut dogs = state.store.get_all().await?;
    dogs.sort_by(|a, b| compare_names(&a.name, &b.name).then(a.id.cmp(&b.id)));
    Ok(Fragment::Rows(dogs))
}

/// POST /dog
pub async fn create_dog(
    State(state): State<AppState>,
    DogForm(new_dog): DogForm,
) -> Result<Response, ApiError> {
    let dog = state.store.create(new_dog).await?;
    Ok((StatusCode::CREATED, Fragment::Row { dog, update: false }).into_response())
}

/// PUT /dog/{id}
pub async fn update_dog(
    State(state): State<AppState>,
    DogIdPath(id): DogIdPath,
    DogForm(fields): DogForm,
) -> Result<Response, ApiError> {
    let dog = kennel_core::Dog::from_parts(id, fields);
    state.store.update(&dog).await?;
    state.selection.complete_update(id);
    Ok((
        StatusCode::OK,
        selection_changed(),
        Fragment::Row { dog, update: true },
    )
        .into_response())
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` or `unhealthy`.
    pub status: &'static str,
    /// Binary version.
    pub version: &'static str,
    /// Name of the backing store.
    pub store: String,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    let status = match state.store.health_check().await {
        Ok(status) => status,
        Err(e) => HealthStatus::Unhealthy(e.to_string()),
    };
    let (code, label) = match status {
        HealthStatus::Healthy => (StatusCode::OK, "ok"),
        HealthStatus::Unhealthy(reason) => {
            tracing::warn!(%reason, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };
    let body = HealthResponse {
        status: label,
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.name().to_string(),
    };
    (code, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use kennel_core::{DogId, DogStore, NewDog};
    use kennel_test_utils::MockDogStore;
    use tower::ServiceExt;

    use super::*;
    use crate::selection::{Selection, SelectionState};
    use crate::server::build_router;

    fn build_app(store: Arc<MockDogStore>) -> (Router, Selection) {
        let selection = Selection::new();
        let state = AppState::new(store, selection.clone());
        (build_router(state, "public"), selection)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn text(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn id(raw: i64) -> DogId {
        DogId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_row() {
        let store = Arc::new(MockDogStore::new());
        let (app, _) = build_app(store.clone());
        let resp = send(&app, Method::POST, "/dog", Some("name=Rex&breed=Lab")).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let body = text(resp).await;
        assert!(body.contains("<td>Rex</td><td>Lab</td>"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_before_store_access() {
        let store = Arc::new(MockDogStore::new());
        let (app, _) = build_app(store.clone());
        for body in ["name=Rex", "name=&breed=Lab", "name=Rex&breed=Lab&color=brown"] {
            let resp = send(&app, Method::POST, "/dog", Some(body)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        }
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn delete_existing_and_missing() {
        let store = Arc::new(MockDogStore::new());
        let rex = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        let (app, _) = build_app(store.clone());

        let resp = send(&app, Method::DELETE, &format!("/dog/{}", rex.id), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(text(resp).await.is_empty());

        let resp = send(&app, Method::DELETE, "/dog/999999", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(text(resp).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let store = Arc::new(MockDogStore::new());
        let (app, _) = build_app(store.clone());
        for (method, uri) in [
            (Method::DELETE, "/dog/abc"),
            (Method::DELETE, "/dog/0"),
            (Method::GET, "/select/-4"),
        ] {
            let resp = send(&app, method, uri, None).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
        let resp = send(&app, Method::PUT, "/dog/x", Some("name=Rex&breed=Lab")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn select_and_deselect_signal_change() {
        let store = Arc::new(MockDogStore::new());
        let (app, selection) = build_app(store);

        let resp = send(&app, Method::GET, "/select/5", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[&HX_TRIGGER], SELECTION_CHANGE);
        assert_eq!(selection.current(), SelectionState::Selected(id(5)));

        let resp = send(&app, Method::GET, "/deselect", None).await;
        assert_eq!(resp.headers()[&HX_TRIGGER], SELECTION_CHANGE);
        assert!(text(resp).await.is_empty());
        assert_eq!(selection.current(), SelectionState::Deselected);
    }

    #[tokio::test]
    async fn form_follows_selection() {
        let store = Arc::new(MockDogStore::new());
        let rex = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        let (app, selection) = build_app(store.clone());

        let body = text(send(&app, Method::GET, "/form", None).await).await;
        assert!(body.contains(r#"hx-post="/dog""#));
        assert_eq!(store.call_count(), 1);

        selection.select(rex.id);
        let body = text(send(&app, Method::GET, "/form", None).await).await;
        assert!(body.contains(&format!(r#"hx-put="/dog/{}""#, rex.id)));
        assert!(body.contains(r#"value="Rex""#));
        assert!(body.contains("Cancel"));
    }

    #[tokio::test]
    async fn table_rows_sorted_by_name() {
        let store = Arc::new(MockDogStore::new());
        for name in ["Zoe", "amy", "Émile", "Bob", "Amy"] {
            store.create(NewDog::new(name, "Mutt").unwrap()).await.unwrap();
        }
        let (app, _) = build_app(store);
        let body = text(send(&app, Method::GET, "/table-rows", None).await).await;
        let order: Vec<usize> = ["amy", "Amy", "Bob", "Émile", "Zoe"]
            .iter()
            .map(|name| body.find(&format!("<td>{name}</td>")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{body}");
    }

    #[tokio::test]
    async fn update_swaps_row_and_clears_selection() {
        let store = Arc::new(MockDogStore::new());
        let rex = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        let (app, selection) = build_app(store.clone());
        selection.select(rex.id);

        let uri = format!("/dog/{}", rex.id);
        let resp = send(&app, Method::PUT, &uri, Some("name=Max&breed=Pug")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[&HX_TRIGGER], SELECTION_CHANGE);
        let body = text(resp).await;
        assert!(body.contains(r#"hx-swap-oob="true""#));
        assert!(body.contains("<td>Max</td><td>Pug</td>"));
        assert_eq!(selection.current(), SelectionState::Deselected);

        let stored = store.get_one(rex.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Max");
    }

    #[tokio::test]
    async fn update_of_missing_record_still_succeeds() {
        let store = Arc::new(MockDogStore::new());
        let (app, _) = build_app(store.clone());
        let resp = send(&app, Method::PUT, "/dog/42", Some("name=Max&breed=Pug")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn invalid_update_keeps_store_and_selection() {
        let store = Arc::new(MockDogStore::new());
        let rex = store.create(NewDog::new("Rex", "Lab").unwrap()).await.unwrap();
        let (app, selection) = build_app(store.clone());
        selection.select(rex.id);
        let calls = store.call_count();

        let uri = format!("/dog/{}", rex.id);
        let resp = send(&app, Method::PUT, &uri, Some("name=Max&breed=")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.call_count(), calls);
        assert_eq!(selection.selected_id(), Some(rex.id));
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let store = Arc::new(MockDogStore::failing());
        let (app, _) = build_app(store);
        let resp = send(&app, Method::GET, "/table-rows", None).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = send(&app, Method::POST, "/dog", Some("name=Rex&breed=Lab")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_store_state() {
        let (app, _) = build_app(Arc::new(MockDogStore::new()));
        let resp = send(&app, Method::GET, "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&text(resp).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["store"], "mock");

        let (failing, _) = build_app(Arc::new(MockDogStore::failing()));
        let resp = send(&failing, Method::GET, "/health", None).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = text(resp).await;
        assert!(!body.contains("configured to fail"), "{body}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert!(json.get("detail").is_none());
    }
}
