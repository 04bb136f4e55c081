//! SVG cards served by the holiday endpoint.
//!
//! All cards share a 328x98 canvas with a rounded, diagonally graded
//! background. Every interpolated value is XML-escaped.

use crate::config::CardTheme;
use crate::holiday::HolidayInfo;
use std::borrow::Cow;

const WIDTH: u32 = 328;
const HEIGHT: u32 = 98;
const PADDING: u32 = 12;
const LINE_HEIGHT: u32 = 35;

pub const NO_HOLIDAY_MESSAGE: &str = "暂无节假日安排";
pub const UNAVAILABLE_MESSAGE: &str = "服务暂时不可用";

pub fn holiday_card(holiday: &HolidayInfo, theme: &CardTheme) -> String {
    let text_color = escape(&theme.text_color);
    let accent = escape(&theme.text_color2);
    let name = escape(&holiday.name);
    let date = escape(&holiday.date);
    let rest = holiday.rest;
    let first_line = PADDING * 3;
    let second_line = first_line + LINE_HEIGHT;

    format!(
        r#"{header}
  <text x="{PADDING}" y="{first_line}" font-family="Arial, sans-serif" font-size="16" font-weight="bold" fill="{text_color}">
    📅 下一个节假日是：<tspan fill="{accent}">{name} ({date})</tspan>
  </text>
  <text x="{PADDING}" y="{second_line}" font-family="Arial, sans-serif" font-size="16" font-weight="bold" fill="{text_color}">
    ⏳ 距离还有：<tspan fill="{accent}">{rest} 天</tspan>
  </text>
</svg>"#,
        header = header(theme),
    )
}

pub fn no_holiday_card(theme: &CardTheme) -> String {
    message_card(theme, NO_HOLIDAY_MESSAGE)
}

pub fn unavailable_card(theme: &CardTheme) -> String {
    message_card(theme, UNAVAILABLE_MESSAGE)
}

fn message_card(theme: &CardTheme, message: &str) -> String {
    let text_color = escape(&theme.text_color);
    let baseline = HEIGHT / 2;

    format!(
        r#"{header}
  <text x="{PADDING}" y="{baseline}" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="{text_color}">
    {message}
  </text>
</svg>"#,
        header = header(theme),
    )
}

fn header(theme: &CardTheme) -> String {
    let bg_start = escape(&theme.bg_start_color);
    let bg_end = escape(&theme.bg_end_color);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="bgGradient" gradientTransform="rotate(10)">
      <stop offset="0%" stop-color="{bg_start}" />
      <stop offset="100%" stop-color="{bg_end}" />
    </linearGradient>
  </defs>
  <rect width="{WIDTH}" height="{HEIGHT}" fill="url(#bgGradient)" rx="8" ry="8"/>"#
    )
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}
