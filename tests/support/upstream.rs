use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;

const NEXT_HOLIDAY_PATH: &str = "/api/holiday/next";

/// Serves `router` on an ephemeral local port and returns the holiday URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}{NEXT_HOLIDAY_PATH}")
}

pub async fn json(status: StatusCode, body: Value) -> String {
    raw(status, body.to_string()).await
}

pub async fn raw(status: StatusCode, body: impl Into<String>) -> String {
    let body = body.into();
    let router = Router::new().route(
        NEXT_HOLIDAY_PATH,
        get(move || {
            let body = body.clone();
            async move { (status, [("content-type", "application/json")], body) }
        }),
    );

    serve(router).await
}

pub async fn delayed(delay: Duration, body: Value) -> String {
    let router = Router::new().route(
        NEXT_HOLIDAY_PATH,
        get(move || {
            let body = body.to_string();
            async move {
                tokio::time::sleep(delay).await;
                body
            }
        }),
    );

    serve(router).await
}

/// URL of a port nothing listens on.
pub async fn unreachable() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}{NEXT_HOLIDAY_PATH}")
}
