use crate::config::HolidayConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;

/// Upcoming holiday as reported by the holiday API.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayInfo {
    pub name: String,
    pub date: String,
    /// Days remaining until `date`.
    pub rest: i64,
    pub is_holiday: bool,
    /// Pay multiplier for working on that day, when the API reports one.
    pub wage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HolidayLookup {
    Upcoming(HolidayInfo),
    NoneScheduled,
}

#[derive(Debug, Error)]
pub enum HolidayApiError {
    #[error("Holiday API timed out")]
    Timeout,

    #[error("Holiday API unreachable: {0}")]
    Connection(String),

    #[error("Holiday API request failed: {0}")]
    Request(String),

    #[error("Holiday API responded with status {0}")]
    Status(u16),

    #[error("Unexpected holiday API payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for HolidayApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HolidayApiError::Timeout
        } else if err.is_connect() {
            HolidayApiError::Connection(err.to_string())
        } else {
            HolidayApiError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HolidayApiError {
    fn from(err: serde_json::Error) -> Self {
        HolidayApiError::Payload(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct NextHolidayResponse {
    code: i64,
    #[serde(default)]
    holiday: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NextHoliday {
    #[serde(default)]
    holiday: bool,
    name: Option<String>,
    wage: Option<f64>,
    date: Option<String>,
    rest: Option<i64>,
}

/// Interprets a `/api/holiday/next` body.
///
/// A nonzero `code`, a `holiday` that is absent or not an object, or a
/// holiday flagged `false` all mean nothing is scheduled. A holiday flagged
/// `true` must carry its name, date and remaining days.
pub fn parse_next_holiday(body: &[u8]) -> Result<HolidayLookup, HolidayApiError> {
    let NextHolidayResponse { code, holiday } = serde_json::from_slice(body)?;

    let Some(holiday @ Value::Object(_)) = holiday.filter(|_| code == 0) else {
        return Ok(HolidayLookup::NoneScheduled);
    };

    let holiday: NextHoliday = serde_json::from_value(holiday)?;
    if !holiday.holiday {
        return Ok(HolidayLookup::NoneScheduled);
    }

    let (Some(name), Some(date), Some(rest)) = (holiday.name, holiday.date, holiday.rest) else {
        return Err(HolidayApiError::Payload(
            "holiday is missing name, date or rest".to_string(),
        ));
    };

    Ok(HolidayLookup::Upcoming(HolidayInfo {
        name,
        date,
        rest,
        is_holiday: true,
        wage: holiday.wage,
    }))
}

#[derive(Clone, Debug)]
pub struct HolidayClient {
    client: Client,
    api_url: Arc<str>,
}

impl HolidayClient {
    pub fn new(config: &HolidayConfig) -> Result<Self, HolidayApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HolidayApiError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_url: Arc::from(config.api_url.as_str()),
        })
    }

    /// Single attempt, bounded by the configured timeout.
    #[tracing::instrument(skip_all, name = "holiday.fetch", fields(url = %self.api_url))]
    pub async fn next_holiday(&self) -> Result<HolidayLookup, HolidayApiError> {
        let start = Instant::now();
        let result = self.fetch().await;

        tracing::info!(
            histogram.holiday_api_duration_ms = start.elapsed().as_secs_f64() * 1_000.0,
            success = result.is_ok(),
            "Holiday API call finished"
        );

        result
    }

    async fn fetch(&self) -> Result<HolidayLookup, HolidayApiError> {
        let response = self.client.get(&*self.api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolidayApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_next_holiday(&body)
    }
}
