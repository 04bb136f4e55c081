use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const AGE_LOGO_SVG: &[u8] = include_bytes!("../assets/age-logo.svg");

/// Longest lifetime an "unavailable" card may be cached for.
pub const MAX_ERROR_MAX_AGE: u64 = 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub otel_enabled: bool,

    #[serde(default)]
    pub listen_address: Option<SocketAddr>,

    #[serde(default)]
    pub badge: BadgeConfig,

    #[serde(default)]
    pub holiday: HolidayConfig,
}

/// Defaults applied by the age badge when a query override is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    #[serde(deserialize_with = "deserialize_base_url")]
    pub base_url: Url,
    pub color: String,
    pub style: String,
    pub logo: Arc<str>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://img.shields.io/badge/").expect("Valid default URL"),
            color: "green".to_string(),
            style: "for-the-badge".to_string(),
            logo: default_logo(),
        }
    }
}

pub fn deserialize_base_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    let url = Url::deserialize(deserializer)?;
    if url.cannot_be_a_base() {
        return Err(Error::custom(format!(
            "badge base url must be hierarchical ({url} given)"
        )));
    }

    Ok(url)
}

pub fn default_logo() -> Arc<str> {
    let encoded = BASE64_STANDARD.encode(AGE_LOGO_SVG);
    Arc::from(format!("data:image/svg+xml;base64,{encoded}"))
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayConfig {
    #[serde(default = "default_holiday_api_url")]
    pub api_url: String,

    #[serde(
        deserialize_with = "deserialize_timeout",
        default = "default_holiday_timeout"
    )]
    pub timeout: Duration,

    /// Cache lifetime in seconds for the holiday and no-holiday cards.
    #[serde(default = "default_max_age")]
    pub max_age: u64,

    /// Cache lifetime in seconds for the unavailable card.
    #[serde(
        deserialize_with = "deserialize_error_max_age",
        default = "default_error_max_age"
    )]
    pub error_max_age: u64,

    #[serde(default)]
    pub theme: CardTheme,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            api_url: default_holiday_api_url(),
            timeout: default_holiday_timeout(),
            max_age: default_max_age(),
            error_max_age: default_error_max_age(),
            theme: CardTheme::default(),
        }
    }
}

fn default_holiday_api_url() -> String {
    "https://timor.tech/api/holiday/next".to_string()
}

fn default_holiday_timeout() -> Duration {
    Duration::from_millis(5_000)
}

fn default_max_age() -> u64 {
    3_600
}

fn default_error_max_age() -> u64 {
    MAX_ERROR_MAX_AGE
}

pub fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = <u64>::deserialize(deserializer)?;
    if millis < 100 {
        return Err(Error::custom(format!(
            "holiday timeout must be at least 100 milliseconds ({millis} given)"
        )));
    }

    Ok(Duration::from_millis(millis))
}

pub fn deserialize_error_max_age<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = <u64>::deserialize(deserializer)?;
    if seconds > MAX_ERROR_MAX_AGE {
        return Err(Error::custom(format!(
            "error max age must be at most {MAX_ERROR_MAX_AGE} seconds ({seconds} given)"
        )));
    }

    Ok(seconds)
}

/// Colors of the holiday card. Each field can be overridden per request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardTheme {
    pub bg_start_color: String,
    pub bg_end_color: String,
    pub text_color: String,
    pub text_color2: String,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            bg_start_color: "#F0EAE9".to_string(),
            bg_end_color: "#E7E0F2".to_string(),
            text_color: "#8839EF".to_string(),
            text_color2: "#D05364".to_string(),
        }
    }
}
