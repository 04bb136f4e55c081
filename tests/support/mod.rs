#![allow(dead_code)]

pub mod upstream;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use badge_api::app;
use badge_api::config::{EnvironmentConfig, HolidayConfig};
use std::time::Duration;
use tower::ServiceExt;

pub fn app_with_upstream(api_url: String) -> Router {
    app_with_holiday(HolidayConfig {
        api_url,
        ..Default::default()
    })
}

pub fn app_with_holiday(holiday: HolidayConfig) -> Router {
    let config = EnvironmentConfig {
        holiday,
        ..Default::default()
    };

    app::create_app(config)
}

pub fn app_with_timeout(api_url: String, timeout: Duration) -> Router {
    app_with_holiday(HolidayConfig {
        api_url,
        timeout,
        ..Default::default()
    })
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("{name} header is missing"))
        .to_str()
        .unwrap()
}

pub fn assert_cors(response: &Response<Body>) {
    assert_eq!(header(response, "access-control-allow-origin"), "*");
    assert_eq!(header(response, "access-control-allow-credentials"), "true");
    assert_eq!(header(response, "access-control-allow-methods"), "GET,OPTIONS");
    assert_eq!(header(response, "access-control-allow-headers"), "*");
}
