use super::VERSION;
use crate::{
    AppState,
    auth::Customer,
    error::{ApiError, Result},
};
use axum::{
    body::Bytes,
    extract::{Json, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health(State(app): State<Arc<AppState>>, customer: Customer) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": VERSION,
        "customer": customer.name,
        "endpoints": {
            "health": "GET /health",
            "docs": "GET /docs",
            "verify": "POST /verify",
            "employment_verify": "POST /api/v1/employment/verify",
            "employment_status": "GET /api/v1/employment/verify/{id}"
        },
        "test_ssns": app.fixtures.test_ssns(&customer.name),
    }))
}

pub async fn docs(State(app): State<Arc<AppState>>) -> Json<Value> {
    let environment = if app.production {
        "production"
    } else {
        "sandbox"
    };
    let mut docs = json!({
        "name": "Sandbox Verification API",
        "version": VERSION,
        "environment": environment,
        "base_url": app.domain,
        "authentication": "Send the api key as `Authorization: Bearer <key>` or `X-API-Key: <key>`",
        "endpoints": {
            "GET /health": "Service status and test identifiers for the calling customer",
            "POST /verify": "Instant benefits, lending or employment verification from a test identifier",
            "POST /api/v1/employment/verify": "Create an employment history verification (api key required)",
            "GET /api/v1/employment/verify/{id}": "Fetch a created employment verification (api key required)"
        },
        "example_request": {
            "candidate_info": {
                "ssn": "777-77-7777",
                "first_name": "Alex",
                "last_name": "Rivera",
                "current_address": {
                    "street": "100 Main St",
                    "city": "Denver",
                    "state": "CO",
                    "zip": "80202"
                }
            },
            "employer_info": {
                "name": "TechCorp Solutions Inc"
            },
            "consent_token": "consent_sandbox_demo",
            "years_requested": 3
        }
    });

    // sandbox credentials are never handed out in production
    if !app.production {
        docs["credentials"] = json!({
            "api_key": app.sandbox_key,
            "webhook_secret": app.webhook_secret,
        });
    }

    Json(docs)
}

/// POSTs to any other `/verify` path are served by the lenient verifier,
/// everything else is not found.
pub async fn fallback(
    state: State<Arc<AppState>>,
    customer: Customer,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response> {
    if method == Method::POST && uri.path().contains("/verify") {
        return super::verify(state, customer, body)
            .await
            .map(IntoResponse::into_response);
    }

    debug!("no route for {} {}", method, uri.path());
    Err(ApiError::RouteNotFound)
}
