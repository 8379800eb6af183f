//! API route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::breeding::stores::{StoreSummary, StoredProfile};
use crate::breeding::{BreedingEngine, FieldScore, PedigreeStores, Role};
use crate::error::BreedingError;
use crate::types::{ErrorResponse, FieldRequest, HealthResponse, ScoreQuery, ScoreRequest};

/// Application state shared across handlers.
pub struct AppState {
    pub stores: &'static PedigreeStores,
}

impl AppState {
    fn engine(&self) -> BreedingEngine<'static> {
        BreedingEngine::new(self.stores)
    }
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<BreedingError> for ApiError {
    fn from(err: BreedingError) -> Self {
        match err {
            BreedingError::NegativeStarts(_) | BreedingError::UnknownRole(_) => {
                Self::bad_request(err.to_string())
            }
            _ => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/breeding/stores", get(store_summary))
        .route("/breeding/lookup/{role}/{name}", get(lookup))
        .route("/breeding/score", post(score))
        .route("/breeding/field", post(field))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Reference store summary endpoint.
pub async fn store_summary(State(state): State<Arc<AppState>>) -> Json<StoreSummary> {
    Json(state.stores.summary())
}

/// Profile lookup endpoint.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Path((role, name)): Path<(String, String)>,
) -> Result<Json<StoredProfile<'static>>, ApiError> {
    let role: Role = role.parse()?;
    state
        .stores
        .lookup(role, &name)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No {} named '{}'", role, name)))
}

/// Single-horse scoring endpoint. `?detailed=true` adds per-role detail.
pub async fn score(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScoreQuery>,
    Json(req): Json<ScoreRequest>,
) -> Result<Response, ApiError> {
    let engine = state.engine();
    if query.detailed {
        let detailed = engine.score_detailed(&req.horse, &req.race)?;
        Ok(Json(detailed).into_response())
    } else {
        let result = engine.score(&req.horse, &req.race)?;
        Ok(Json(result).into_response())
    }
}

/// Race-field scoring endpoint.
pub async fn field(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FieldRequest>,
) -> Result<Json<FieldScore>, ApiError> {
    if req.horses.is_empty() {
        return Err(ApiError::bad_request("No horses provided"));
    }
    Ok(Json(state.engine().score_field(&req.race, &req.horses)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::breeding::stores::stores;

    fn app() -> Router {
        router(Arc::new(AppState { stores: stores() }))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_score_elite_debut() {
        let body = serde_json::json!({
            "horse": {"sire": "Into Mischief", "lifetime_starts": 0},
            "race": {"surface": "dirt", "distance": "6f"}
        });
        let response = app().oneshot(post_json("/breeding/score", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 55);
        assert_eq!(json["was_applied"], true);
        assert_eq!(json["confidence"], "low");
        assert!(json.get("sire").is_none());
    }

    #[tokio::test]
    async fn test_score_detailed() {
        let body = serde_json::json!({
            "horse": {"sire": "Tapit", "dam": "Serena's Song", "damsire": "A.P. Indy", "lifetime_starts": 2},
            "race": {"surface": "dirt", "distance": "1 1/4m"}
        });
        let response = app()
            .oneshot(post_json("/breeding/score?detailed=true", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["sire"]["tier_label"], "Elite");
        assert_eq!(json["damsire"]["profile"]["stamina"], "high");
    }

    #[tokio::test]
    async fn test_score_rejects_negative_starts() {
        let body = serde_json::json!({
            "horse": {"sire": "Tapit", "lifetime_starts": -4},
            "race": {"surface": "dirt", "distance": "6f"}
        });
        let response = app().oneshot(post_json("/breeding/score", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("-4"));
    }

    #[tokio::test]
    async fn test_field_requires_horses() {
        let body = serde_json::json!({
            "race": {"surface": "turf", "distance": "1m"},
            "horses": []
        });
        let response = app().oneshot(post_json("/breeding/field", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_field_scores_runners() {
        let body = serde_json::json!({
            "race": {"surface": "turf", "distance": "1 1/8m"},
            "horses": [
                {"horse_id": "a", "sire": "Hard Spun", "lifetime_starts": 6},
                {"horse_id": "b", "sire": "Kitten's Joy", "damsire": "Dynaformer", "lifetime_starts": 0}
            ]
        });
        let response = app().oneshot(post_json("/breeding/field", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["distance_category"], "route");
        assert_eq!(json["runners"][0]["horse_id"], "b");
        assert_eq!(json["runners"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup() {
        let found = app()
            .oneshot(
                Request::builder()
                    .uri("/breeding/lookup/damsire/storm%20cat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        let json = body_json(found).await;
        assert_eq!(json["role"], "damsire");
        assert_eq!(json["name"], "Storm Cat");

        let missing = app()
            .oneshot(
                Request::builder()
                    .uri("/breeding/lookup/sire/Secretariat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_role = app()
            .oneshot(
                Request::builder()
                    .uri("/breeding/lookup/grandsire/Tapit")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_summary() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/breeding/stores")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["sires"]["entries"].as_u64().unwrap() > 0);
        assert_eq!(json["dams"]["version"], "2026.10");
    }
}
