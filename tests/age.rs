mod support;

use crate::support::{assert_cors, body_string, get, header, send};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use badge_api::age::{Badge, age_on, parse_birthday};
use badge_api::app;
use badge_api::config::{EnvironmentConfig, default_logo};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use url::Url;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn age_counts_whole_years() {
    assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 14)), 23);
    assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
    assert_eq!(age_on(date(2000, 6, 15), date(2024, 7, 1)), 24);
    assert_eq!(age_on(date(2000, 12, 31), date(2025, 1, 1)), 24);
    assert_eq!(age_on(date(2024, 3, 1), date(2024, 3, 1)), 0);
}

#[test]
fn leap_day_birthday_ticks_over_in_march_on_common_years() {
    let birthday = date(2000, 2, 29);

    assert_eq!(age_on(birthday, date(2023, 2, 28)), 22);
    assert_eq!(age_on(birthday, date(2023, 3, 1)), 23);
    assert_eq!(age_on(birthday, date(2024, 2, 29)), 24);
}

#[test]
fn birthday_parsing() {
    assert_eq!(parse_birthday("1990-05-17"), Some(date(1990, 5, 17)));
    assert_eq!(parse_birthday(" 1990-05-17 "), Some(date(1990, 5, 17)));
    assert_eq!(
        parse_birthday("1990-05-17T08:30:00+02:00"),
        Some(date(1990, 5, 17))
    );
    assert_eq!(parse_birthday("not-a-date"), None);
    assert_eq!(parse_birthday("2001-02-29"), None);
    assert_eq!(parse_birthday("1990-13-01"), None);
}

#[test]
fn badge_url_layout() {
    let base = Url::parse("https://img.shields.io/badge/").unwrap();
    let badge = Badge {
        age: 30,
        color: "green",
        style: "for-the-badge",
        logo: "github",
    };

    assert_eq!(
        badge.url(&base).as_str(),
        "https://img.shields.io/badge/Age-30-green?style=for-the-badge&logo=github"
    );

    let base = Url::parse("https://badges.example.com/static").unwrap();
    assert_eq!(
        badge.url(&base).as_str(),
        "https://badges.example.com/static/Age-30-green?style=for-the-badge&logo=github"
    );
}

fn badge_app() -> axum::Router {
    app::create_app(EnvironmentConfig::default())
}

fn location_parts(location: &str) -> (String, HashMap<String, String>) {
    let url = Url::parse(location).unwrap();
    let query = url.query_pairs().into_owned().collect();

    (url.path().to_string(), query)
}

#[tokio::test]
async fn redirects_with_defaults() {
    let app = badge_app();
    let response = get(&app, "/api/age?birthday=1990-05-17").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_cors(&response);

    let expected_age = age_on(date(1990, 5, 17), Utc::now().date_naive());
    let location = header(&response, "location");
    assert!(location.starts_with("https://img.shields.io/badge/"));

    let (path, query) = location_parts(location);
    assert_eq!(path, format!("/badge/Age-{expected_age}-green"));
    assert_eq!(query["style"], "for-the-badge");
    assert_eq!(query["logo"], &*default_logo());
    assert!(query["logo"].starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn redirects_with_overrides() {
    let app = badge_app();
    let response = get(
        &app,
        "/api/age?birthday=2001-12-01&color=blue&style=flat-square&logo=rust",
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let expected_age = age_on(date(2001, 12, 1), Utc::now().date_naive());
    let (path, query) = location_parts(header(&response, "location"));
    assert_eq!(path, format!("/badge/Age-{expected_age}-blue"));
    assert_eq!(query["style"], "flat-square");
    assert_eq!(query["logo"], "rust");
}

#[tokio::test]
async fn override_with_reserved_characters_stays_a_valid_location() {
    let app = badge_app();
    let response = get(
        &app,
        "/api/age?birthday=2001-12-01&style=a%26b%3Dc&logo=x%0Ay",
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let (_, query) = location_parts(header(&response, "location"));
    assert_eq!(query["style"], "a&b=c");
    assert_eq!(query["logo"], "x\ny");
}

#[tokio::test]
async fn repeated_parameters_use_last_value() {
    let app = badge_app();
    let response = get(
        &app,
        "/api/age?birthday=1990-01-01&color=red&birthday=1991-01-01&color=blue",
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_cors(&response);

    let expected_age = age_on(date(1991, 1, 1), Utc::now().date_naive());
    let (path, _) = location_parts(header(&response, "location"));
    assert_eq!(path, format!("/badge/Age-{expected_age}-blue"));
}

#[tokio::test]
async fn repeated_birthday_with_invalid_last_value() {
    let app = badge_app();
    let response = get(&app, "/api/age?birthday=1990-01-01&birthday=nope").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header(&response, "content-type"),
        "application/json; charset=utf-8"
    );

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "error": "Invalid birthday format. Use YYYY-MM-DD" })
    );
}

#[tokio::test]
async fn missing_birthday() {
    let app = badge_app();

    for uri in [
        "/api/age",
        "/api/age?color=red",
        "/api/age?birthday=",
        "/api/age?style=flat&logo=rust",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_cors(&response);
        assert_eq!(
            header(&response, "content-type"),
            "application/json; charset=utf-8"
        );

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body,
            json!({ "error": "Missing birthday parameter. Format: YYYY-MM-DD" }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn invalid_birthday() {
    let app = badge_app();

    for uri in [
        "/api/age?birthday=not-a-date",
        "/api/age?birthday=2023-02-30",
        "/api/age?birthday=17%2F05%2F1990&color=red",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            body,
            json!({ "error": "Invalid birthday format. Use YYYY-MM-DD" }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn preflight() {
    let app = badge_app();
    let request = Request::options("/api/age").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let app = badge_app();

    for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/api/age?birthday=1990-05-17")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(&response);

        if method != Method::HEAD {
            let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body, json!({ "error": "Method not allowed" }), "{method}");
        }
    }
}
