// src/formatting.rs

use crate::core::DeviationEvent;
use crate::error::MalformedRecordError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The time zone in which event timestamps are rendered.
///
/// `Local` follows the host's zone, so the same event renders differently
/// depending on where the relay is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZoneSetting {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for TimeZoneSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(TimeZoneSetting::Local),
            "utc" | "z" => Ok(TimeZoneSetting::Utc),
            other => other
                .parse::<FixedOffset>()
                .map(TimeZoneSetting::Fixed)
                .map_err(|_| format!("invalid time zone '{}': expected local, utc or an offset like +02:00", s)),
        }
    }
}

impl TryFrom<String> for TimeZoneSetting {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeZoneSetting> for String {
    fn from(value: TimeZoneSetting) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Local => write!(f, "local"),
            TimeZoneSetting::Utc => write!(f, "utc"),
            TimeZoneSetting::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Formats deviation events into human-readable notification text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter {
    time_zone: TimeZoneSetting,
}

impl MessageFormatter {
    pub fn new(time_zone: TimeZoneSetting) -> Self {
        Self { time_zone }
    }

    /// Renders `sensor {id} has value {value} with deviation {deviation} at {date-time}`.
    pub fn format(&self, event: &DeviationEvent) -> Result<String, MalformedRecordError> {
        let at = self.date_time(event.timestamp_millis)?;
        Ok(format!(
            "sensor {} has value {} with deviation {} at {}",
            event.sensor_id,
            format_fixed6(event.value),
            format_fixed6(event.deviation),
            format_iso_local(&at)
        ))
    }

    /// Converts epoch milliseconds into a wall-clock date-time in the configured zone.
    pub fn date_time(&self, timestamp_millis: i64) -> Result<NaiveDateTime, MalformedRecordError> {
        let instant = DateTime::from_timestamp_millis(timestamp_millis)
            .ok_or(MalformedRecordError::TimestampOutOfRange(timestamp_millis))?;

        Ok(match self.time_zone {
            TimeZoneSetting::Local => instant.with_timezone(&Local).naive_local(),
            TimeZoneSetting::Utc => instant.naive_utc(),
            TimeZoneSetting::Fixed(offset) => instant.with_timezone(&offset).naive_local(),
        })
    }
}

/// Six fractional digits, rounded half-up from the shortest decimal form of
/// `value` rather than from its exact binary expansion, so `0.0078125`
/// renders as `0.007813`.
fn format_fixed6(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    digits.extend(frac_part.bytes().take(6).map(|b| b - b'0'));
    digits.resize(int_part.len() + 6, 0);

    if frac_part.as_bytes().get(6).is_some_and(|b| *b >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 6;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, render(&digits[..split]), render(&digits[split..]))
}

/// ISO-8601 local date-time, omitting seconds and milliseconds when they are zero.
fn format_iso_local(at: &NaiveDateTime) -> String {
    let mut text = at.format("%Y-%m-%dT%H:%M").to_string();
    let millis = at.nanosecond() / 1_000_000;
    if at.second() != 0 || millis != 0 {
        text.push_str(&format!(":{:02}", at.second()));
    }
    if millis != 0 {
        text.push_str(&format!(".{:03}", millis));
    }
    text
}
