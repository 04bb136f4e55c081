use crate::config::{EnvironmentConfig, HolidayConfig};
use crate::holiday::HolidayClient;
use crate::routes;
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::map_response;
use axum::response::Response;
use axum::{Extension, Router};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use opentelemetry::global::set_text_map_propagator;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::openapi::InfoBuilder;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
];

pub fn create_holiday_client(config: &HolidayConfig) -> HolidayClient {
    match HolidayClient::new(config) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!("Failed to create holiday client: {error:?}");
            panic!("Failed to create holiday client");
        }
    }
}

pub fn create_app(config: EnvironmentConfig) -> Router<()> {
    let holiday_client = create_holiday_client(&config.holiday);

    let (router, openapi) = OpenApiRouter::with_openapi(openapi())
        .routes(routes!(routes::age::age))
        .routes(routes!(routes::holiday::holiday))
        .routes(routes!(routes::infra::version))
        .routes(routes!(routes::infra::health))
        .split_for_parts();

    let mut app = router
        .route("/api/age", routes::badge_methods())
        .route("/api/holiday", routes::badge_methods())
        .merge(SwaggerUi::new("/api/docs").url("/api.json", openapi))
        .layer(Extension(Arc::new(config.badge)))
        .layer(Extension(Arc::new(config.holiday)))
        .layer(Extension(holiday_client))
        .layer(map_response(map_json_charset));

    for (name, value) in CORS_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    if config.otel_enabled {
        set_text_map_propagator(TraceContextPropagator::new());
        app = app
            .layer(OtelInResponseLayer::default())
            .layer(OtelAxumLayer::default());
    }

    app
}

fn openapi() -> utoipa::openapi::OpenApi {
    let openapi_info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(routes::infra::service_version())
        .description(Some(env!("CARGO_PKG_DESCRIPTION").to_string()))
        .build();

    utoipa::openapi::OpenApi::new(openapi_info, utoipa::openapi::Paths::new())
}

async fn map_json_charset(mut response: Response) -> Response {
    let Some(content_type) = response.headers_mut().get_mut(header::CONTENT_TYPE) else {
        return response;
    };

    const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");
    if &*content_type == APPLICATION_JSON {
        *content_type = HeaderValue::from_static("application/json; charset=utf-8");
    }

    response
}
