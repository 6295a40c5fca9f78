mod employment;
mod info;
mod verify;

pub use employment::{create_verification, get_verification};
pub use info::{docs, fallback, health};
pub use verify::verify;

use crate::{
    AppState,
    error::{ApiError, Result},
};
use axum::{
    Router,
    body::Bytes,
    http::{HeaderName, Method, header},
    routing::{get, post},
};
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const VERSION: &str = "3.0.0";

pub fn router(app: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-api-key"),
        ]);

    Router::new()
        .route("/", get(health).fallback(fallback))
        .route("/health", get(health).fallback(fallback))
        .route("/docs", get(docs).fallback(fallback))
        .route("/verify", post(verify).fallback(fallback))
        .route(
            "/api/v1/employment/verify",
            post(create_verification).fallback(fallback),
        )
        .route(
            "/api/v1/employment/verify/{id}",
            get(get_verification).fallback(fallback),
        )
        .fallback(fallback)
        .with_state(app)
        .layer(cors)
}

/// `req_` + millisecond timestamp + random suffix
fn request_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("req_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// An empty body reads as `{}`; a `null` body has no fields to read.
fn parse_body(body: &Bytes) -> Result<Value> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Err(ApiError::InvalidRequest(
            "request body must be a json value other than null".to_owned(),
        )),
        value => Ok(value),
    }
}
