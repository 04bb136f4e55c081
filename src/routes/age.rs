use crate::age::{Badge, age_on, parse_birthday};
use crate::config::BadgeConfig;
use crate::routes::{ErrorBody, QueryPairs, or_default};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Debug, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeQuery {
    /// Birth date, `YYYY-MM-DD`
    birthday: Option<String>,
    /// Badge color, `green` by default
    color: Option<String>,
    /// Badge style, `for-the-badge` by default
    style: Option<String>,
    /// Badge logo, a cake data URI by default
    logo: Option<String>,
}

impl From<QueryPairs> for AgeQuery {
    fn from(mut pairs: QueryPairs) -> Self {
        Self {
            birthday: pairs.take("birthday"),
            color: pairs.take("color"),
            style: pairs.take("style"),
            logo: pairs.take("logo"),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/age",
    params(AgeQuery),
    responses(
        (status = 307, description = "Redirect to the rendered age badge"),
        (status = 400, body = ErrorBody),
        (status = 405, body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all, name = "age.badge")]
pub async fn age(
    Extension(badge): Extension<Arc<BadgeConfig>>,
    pairs: QueryPairs,
) -> Result<Redirect, AgeError> {
    let query = AgeQuery::from(pairs);

    let Some(birthday) = query.birthday.filter(|b| !b.is_empty()) else {
        return Err(AgeError::MissingBirthday);
    };

    let Some(birthday) = parse_birthday(&birthday) else {
        return Err(AgeError::InvalidBirthday);
    };

    let age = age_on(birthday, Utc::now().date_naive());
    Span::current().set_attribute("badge.age", i64::from(age));

    let color = or_default(query.color, &badge.color);
    let style = or_default(query.style, &badge.style);
    let logo = or_default(query.logo, &badge.logo);

    let url = Badge {
        age,
        color: &color,
        style: &style,
        logo: &logo,
    }
    .url(&badge.base_url);

    Ok(Redirect::temporary(url.as_str()))
}

#[derive(Debug, Error)]
pub enum AgeError {
    #[error("Missing birthday parameter. Format: YYYY-MM-DD")]
    MissingBirthday,

    #[error("Invalid birthday format. Use YYYY-MM-DD")]
    InvalidBirthday,
}

impl IntoResponse for AgeError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(self.to_string())),
        )
            .into_response()
    }
}
