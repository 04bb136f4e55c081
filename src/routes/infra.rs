use axum::http::StatusCode;

pub fn service_version() -> String {
    std::env::var("SERVICE_VERSION").unwrap_or_else(|_| "unknown".to_string())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, body = String)
    )
)]
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}

#[utoipa::path(
    get,
    path = "/api/version",
    responses(
        (status = 200, body = String)
    )
)]
pub async fn version() -> (StatusCode, String) {
    (StatusCode::OK, service_version())
}
