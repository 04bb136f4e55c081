use chrono::{DateTime, Datelike, NaiveDate};
use url::Url;

/// Parses a birthday given either as a calendar date (`YYYY-MM-DD`) or as a
/// full RFC 3339 timestamp, in which case only its date part is kept.
pub fn parse_birthday(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Whole years elapsed between `birthday` and `today`.
///
/// The year difference is lowered by one while `today`'s (month, day) is still
/// before the birthday's, so a Feb 29 birthday only ticks over on Mar 1 in
/// common years.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birthday.year();

    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        age - 1
    } else {
        age
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge<'a> {
    pub age: i32,
    pub color: &'a str,
    pub style: &'a str,
    pub logo: &'a str,
}

impl Badge<'_> {
    /// Builds `{base}Age-{age}-{color}?style={style}&logo={logo}`. Every
    /// component is percent-encoded so the result is always a valid
    /// `Location` header.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let label = format!("Age-{}-{}", self.age, self.color);

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&label);
        }

        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("style", self.style)
            .append_pair("logo", self.logo);

        url
    }
}
