use crate::{AppState, error::ApiError};
use axum::{
    extract::FromRequestParts,
    http::{HeaderName, header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// Api key from `Authorization` (optionally `Bearer `) or `X-API-Key`
fn presented_key(req: &Parts) -> Option<String> {
    let raw = req
        .headers
        .get(AUTHORIZATION)
        .or_else(|| req.headers.get(X_API_KEY))?
        .to_str()
        .ok()?;

    let key = raw.replacen("Bearer ", "", 1).trim().to_owned();
    if key.is_empty() { None } else { Some(key) }
}

/// Lenient caller identity: unknown or missing keys become `general`
pub struct Customer {
    pub name: String,
    /// the presented key is registered
    pub authenticated: bool,
}

impl FromRequestParts<Arc<AppState>> for Customer {
    type Rejection = ApiError;

    async fn from_request_parts(
        req: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let key = presented_key(req);
        let authenticated = key
            .as_deref()
            .is_some_and(|k| state.fixtures.is_known_key(k));

        Ok(Customer {
            name: state.fixtures.customer(key.as_deref()).to_owned(),
            authenticated,
        })
    }
}

/// Strict caller identity: rejects with 401 unless the key is registered
pub struct ApiKey {
    pub customer: String,
}

impl FromRequestParts<Arc<AppState>> for ApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        req: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let key = presented_key(req).ok_or(ApiError::Unauthorized)?;
        if !state.fixtures.is_known_key(&key) {
            return Err(ApiError::Unauthorized);
        }

        Ok(ApiKey {
            customer: state.fixtures.customer(Some(&key)).to_owned(),
        })
    }
}
