use axum::Json;
use axum::extract::{FromRequestParts, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::routing::{MethodRouter, options};
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;

pub mod age;
pub mod holiday;
pub mod infra;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// OPTIONS answers the CORS preflight; anything else but GET is rejected.
/// Merged into the documented GET route of every badge endpoint.
pub fn badge_methods() -> MethodRouter {
    options(preflight)
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Query string as key/value pairs where a repeated key keeps its last value.
///
/// Never rejects: an unparsable query string reads as empty, so each handler
/// answers with its own missing-parameter or default behaviour.
#[derive(Debug, Default)]
pub struct QueryPairs(HashMap<String, String>);

impl QueryPairs {
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => Ok(Self(pairs.into_iter().collect())),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Ignoring unparsable query string");
                Ok(Self::default())
            }
        }
    }
}

/// Query override, falling back to the configured default when absent or empty.
fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
