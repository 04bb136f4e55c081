use crate::card::{holiday_card, no_holiday_card, unavailable_card};
use crate::config::{CardTheme, HolidayConfig};
use crate::holiday::{HolidayClient, HolidayLookup};
use crate::routes::{ErrorBody, QueryPairs, or_default};
use axum::Extension;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use strum_macros::AsRefStr;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Debug, utoipa::IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct HolidayQuery {
    /// Gradient start color, `#F0EAE9` by default
    bg_start_color: Option<String>,
    /// Gradient end color, `#E7E0F2` by default
    bg_end_color: Option<String>,
    /// Text color, `#8839EF` by default
    text_color: Option<String>,
    /// Highlight color, `#D05364` by default
    text_color2: Option<String>,
}

impl From<QueryPairs> for HolidayQuery {
    fn from(mut pairs: QueryPairs) -> Self {
        Self {
            bg_start_color: pairs.take("bgStartColor"),
            bg_end_color: pairs.take("bgEndColor"),
            text_color: pairs.take("textColor"),
            text_color2: pairs.take("textColor2"),
        }
    }
}

impl HolidayQuery {
    fn theme(self, defaults: &CardTheme) -> CardTheme {
        CardTheme {
            bg_start_color: or_default(self.bg_start_color, &defaults.bg_start_color),
            bg_end_color: or_default(self.bg_end_color, &defaults.bg_end_color),
            text_color: or_default(self.text_color, &defaults.text_color),
            text_color2: or_default(self.text_color2, &defaults.text_color2),
        }
    }
}

#[derive(Debug, AsRefStr)]
#[strum(serialize_all = "snake_case")]
enum CardOutcome {
    Upcoming,
    NoneScheduled,
    Unavailable,
}

#[utoipa::path(
    get,
    path = "/api/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Upcoming holiday card", content_type = "image/svg+xml", body = String),
        (status = 500, description = "Holiday API unavailable card", content_type = "image/svg+xml", body = String),
        (status = 405, body = ErrorBody)
    )
)]
#[tracing::instrument(skip_all, name = "holiday.card")]
pub async fn holiday(
    Extension(config): Extension<Arc<HolidayConfig>>,
    Extension(client): Extension<HolidayClient>,
    pairs: QueryPairs,
) -> Response {
    let theme = HolidayQuery::from(pairs).theme(&config.theme);

    let (outcome, status, max_age, svg) = match client.next_holiday().await {
        Ok(HolidayLookup::Upcoming(holiday)) => {
            tracing::info!(
                holiday.name = %holiday.name,
                holiday.rest = holiday.rest,
                holiday.wage = ?holiday.wage,
                "Upcoming holiday found"
            );
            let svg = holiday_card(&holiday, &theme);
            (CardOutcome::Upcoming, StatusCode::OK, config.max_age, svg)
        }
        Ok(HolidayLookup::NoneScheduled) => (
            CardOutcome::NoneScheduled,
            StatusCode::OK,
            config.max_age,
            no_holiday_card(&theme),
        ),
        Err(error) => {
            tracing::error!(error = debug(&error), "Failed to fetch holiday data");
            (
                CardOutcome::Unavailable,
                StatusCode::INTERNAL_SERVER_ERROR,
                config.error_max_age,
                unavailable_card(&theme),
            )
        }
    };

    Span::current().set_attribute("holiday.outcome", outcome.as_ref().to_string());
    tracing::info!(
        monotonic_counter.holiday_cards = 1_u64,
        outcome = outcome.as_ref(),
        "Holiday card rendered"
    );

    let cache_control = match outcome {
        CardOutcome::Unavailable => format!("public, max-age={max_age}"),
        _ => format!("public, max-age={max_age}, s-maxage={max_age}"),
    };

    (
        status,
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        svg,
    )
        .into_response()
}
