use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::Method,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::object_store::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub object_store: Arc<ObjectStore>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    let body_limit = state.config.max_object_size;

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/objects/*path", put(object_upload).get(object_download))
        .route("/list", get(object_list))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    public_url: String,
    max_object_size: usize,
}

#[derive(Serialize)]
struct UploadResponse {
    stored: bool,
    size_bytes: usize,
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    prefix: String,
}

#[derive(Serialize)]
struct ListResponse {
    objects: Vec<String>,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        public_url: state.config.public_url.clone(),
        max_object_size: state.config.max_object_size,
    })
}

async fn object_upload(
    State(state): State<AppState>,
    Path(path): Path<String>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ServerError> {
    state.object_store.put(&path, &body).await?;

    info!(path, size = body.len(), "Object uploaded via API");

    Ok(Json(UploadResponse {
        stored: true,
        size_bytes: body.len(),
    }))
}

async fn object_download(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Vec<u8>, ServerError> {
    let data = state.object_store.get(&path).await?;
    Ok(data)
}

async fn object_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ServerError> {
    let objects = state.object_store.list(&params.prefix).await?;
    Ok(Json(ListResponse { objects }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_router() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let object_store = ObjectStore::new(dir.path().to_path_buf(), 1024 * 1024)
            .await
            .unwrap();
        let state = AppState {
            object_store: Arc::new(object_store),
            config: Arc::new(ServerConfig::default()),
        };
        (build_router(state), dir)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn upload_then_download_round_trips() {
        let (router, _dir) = test_router().await;

        let response = router
            .clone()
            .oneshot(
                Request::put("/objects/wedding-photos/a.jpg")
                    .body(Body::from("jpeg-bytes"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::get("/objects/wedding-photos/a.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"jpeg-bytes");
    }

    #[tokio::test]
    async fn list_returns_uploaded_objects() {
        let (router, _dir) = test_router().await;

        for name in ["b.jpg", "a.jpg"] {
            let response = router
                .clone()
                .oneshot(
                    Request::put(format!("/objects/wedding-photos/{name}"))
                        .body(Body::from("x"))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .oneshot(
                Request::get("/list?prefix=wedding-photos/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed["objects"],
            serde_json::json!(["wedding-photos/a.jpg", "wedding-photos/b.jpg"])
        );
    }

    #[tokio::test]
    async fn missing_object_is_404() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(
                Request::get("/objects/wedding-photos/missing.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let (router, _dir) = test_router().await;

        let response = router
            .oneshot(
                Request::put("/objects/..%2Fescape.jpg")
                    .body(Body::from("x"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
