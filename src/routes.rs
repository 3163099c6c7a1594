use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header::HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ViewRequest {
    origin: String,
    name: String,
    data: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/view", post(view_image))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Attaches permissive CORS headers to every response and answers preflight
/// requests directly, before any route logic runs.
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );

    response
}

async fn view_image(State(state): State<AppState>, body: Bytes) -> Response {
    // Decoded by hand so a malformed body maps to the fixed plain-text reply
    // rather than the extractor's rejection message.
    let payload: ViewRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("Rejecting request body: {}", err);
            return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response();
        }
    };

    match state
        .vision
        .describe(&payload.origin, &payload.name, &payload.data)
        .await
    {
        Ok(description) => Json(json!({ "description": description })).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Vision failed: {}", err),
        )
            .into_response(),
    }
}
