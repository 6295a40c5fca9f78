use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub type Result<T> = core::result::Result<T, ApiError>;

/// Endpoints listed when a request matches no route
pub const ENDPOINTS: [&str; 5] = [
    "GET /health",
    "GET /docs",
    "POST /verify",
    "POST /api/v1/employment/verify",
    "GET /api/v1/employment/verify/{id}",
];

#[derive(Debug)]
pub enum ApiError {
    Internal,
    Unauthorized,
    NotFound,
    RouteNotFound,
    InvalidRequest(String),
    MissingFields(Vec<String>),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        error!("internal: {:#}", e);
        ApiError::Internal
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "Internal server error",
                    "message": "An unexpected error occurred"
                }),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({
                    "error": "Unauthorized",
                    "message": "Invalid or missing API key"
                }),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": "Verification request not found" }),
            ),
            Self::RouteNotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({
                    "error": "Endpoint not found",
                    "available_endpoints": ENDPOINTS
                }),
            ),
            Self::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Invalid request",
                    "message": msg
                }),
            ),
            Self::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Missing required fields",
                    "missing_fields": fields
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
