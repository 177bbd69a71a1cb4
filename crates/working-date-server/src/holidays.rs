//! Holiday list retrieval.
//!
//! The list is fetched once per request and turned into an immutable
//! [`HolidayCalendar`]. Any failure of the remote source is absorbed by
//! falling back to an embedded list, so a calendar is always available.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use working_date_engine::HolidayCalendar;

/// Published Colombian non-working days.
pub const DEFAULT_HOLIDAYS_URL: &str = "https://content.capta.co/Recruitment/WorkingDays.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Colombian national holidays used when the remote list is unavailable.
pub const FALLBACK_HOLIDAYS: &[&str] = &[
    // 2025
    "2025-01-01", "2025-01-06", "2025-03-24", "2025-04-17", "2025-04-18", "2025-05-01",
    "2025-06-02", "2025-06-23", "2025-06-30", "2025-07-20", "2025-08-07", "2025-08-18",
    "2025-10-13", "2025-11-03", "2025-11-17", "2025-12-08", "2025-12-25",
    // 2026
    "2026-01-01", "2026-01-12", "2026-03-23", "2026-04-02", "2026-04-03", "2026-05-01",
    "2026-05-18", "2026-06-08", "2026-06-15", "2026-06-29", "2026-07-20", "2026-08-07",
    "2026-08-17", "2026-10-12", "2026-11-02", "2026-11-16", "2026-12-08", "2026-12-25",
];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("holiday request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("holiday source answered with HTTP {0}")]
    Status(u16),

    #[error("unexpected holiday payload: {0}")]
    UnexpectedShape(String),
}

/// Somewhere a raw list of holiday date strings can be read from.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<String>, SourceError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

// ── HTTP source ─────────────────────────────────────────────────────────────

pub struct HttpHolidaySource {
    client: reqwest::Client,
    url: String,
}

impl HttpHolidaySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        parse_payload(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Accepts `["2025-01-01", ...]` or `{"holidays": ["2025-01-01", ...]}`.
/// Non-string entries are skipped.
pub fn parse_payload(body: Value) -> Result<Vec<String>, SourceError> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("holidays") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(SourceError::UnexpectedShape(format!(
                    "'holidays' is {}, expected an array",
                    type_name(&other)
                )))
            }
            None => {
                return Err(SourceError::UnexpectedShape(
                    "object without a 'holidays' field".to_string(),
                ))
            }
        },
        other => {
            return Err(SourceError::UnexpectedShape(format!(
                "{}, expected an array or object",
                type_name(&other)
            )))
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Embedded source ─────────────────────────────────────────────────────────

/// Serves the embedded [`FALLBACK_HOLIDAYS`] list without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackHolidaySource;

#[async_trait]
impl HolidaySource for FallbackHolidaySource {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        Ok(fallback_holidays())
    }

    fn describe(&self) -> String {
        "embedded holiday list".to_string()
    }
}

pub fn fallback_holidays() -> Vec<String> {
    FALLBACK_HOLIDAYS.iter().map(|s| s.to_string()).collect()
}

/// Fetch the holiday list once and build a calendar, falling back to the
/// embedded list on any error.
pub async fn load_calendar(source: &dyn HolidaySource) -> HolidayCalendar {
    match source.fetch().await {
        Ok(raw) => {
            let calendar = HolidayCalendar::build(&raw);
            debug!(
                source = %source.describe(),
                entries = raw.len(),
                holidays = calendar.len(),
                "holiday list loaded"
            );
            calendar
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "using embedded holiday list");
            HolidayCalendar::build(FALLBACK_HOLIDAYS)
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // ── parse_payload ───────────────────────────────────────────────────

    #[test]
    fn test_parse_plain_array() {
        let raw = parse_payload(json!(["2025-01-01", "2025-01-06T00:00:00.000Z"])).unwrap();
        assert_eq!(raw, vec!["2025-01-01", "2025-01-06T00:00:00.000Z"]);
    }

    #[test]
    fn test_parse_object_with_holidays_field() {
        let raw = parse_payload(json!({"holidays": ["2025-05-01"], "year": 2025})).unwrap();
        assert_eq!(raw, vec!["2025-05-01"]);
    }

    #[test]
    fn test_parse_skips_non_strings() {
        let raw = parse_payload(json!(["2025-05-01", 20250501, null, {"date": "x"}])).unwrap();
        assert_eq!(raw, vec!["2025-05-01"]);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(matches!(
            parse_payload(json!({"dates": []})),
            Err(SourceError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_payload(json!({"holidays": "2025-05-01"})),
            Err(SourceError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_payload(json!("2025-05-01")),
            Err(SourceError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_fallback_list_is_well_formed() {
        let calendar = HolidayCalendar::build(FALLBACK_HOLIDAYS);
        assert_eq!(calendar.len(), FALLBACK_HOLIDAYS.len());
        assert!(calendar.contains(d(2025, 12, 25)));
        assert!(calendar.contains(d(2026, 1, 12)));
    }

    // ── HTTP source ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_http_source_reads_array() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/holidays.json");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!(["2025-08-07", "2025-08-18T05:00:00Z"]));
            })
            .await;

        let source = HttpHolidaySource::new(server.url("/holidays.json"), DEFAULT_TIMEOUT).unwrap();
        let calendar = load_calendar(&source).await;

        mock.assert_async().await;
        assert_eq!(calendar.len(), 2);
        assert!(calendar.contains(d(2025, 8, 18)));
    }

    #[tokio::test]
    async fn test_http_error_status_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/holidays.json");
                then.status(500);
            })
            .await;

        let source = HttpHolidaySource::new(server.url("/holidays.json"), DEFAULT_TIMEOUT).unwrap();
        assert!(matches!(source.fetch().await, Err(SourceError::Status(500))));
        assert_eq!(load_calendar(&source).await, HolidayCalendar::build(FALLBACK_HOLIDAYS));
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/holidays.json");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let source = HttpHolidaySource::new(server.url("/holidays.json"), DEFAULT_TIMEOUT).unwrap();
        assert_eq!(load_calendar(&source).await, HolidayCalendar::build(FALLBACK_HOLIDAYS));
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/holidays.json");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!([]));
            })
            .await;

        let source =
            HttpHolidaySource::new(server.url("/holidays.json"), Duration::from_millis(50)).unwrap();
        assert!(matches!(source.fetch().await, Err(SourceError::Request(_))));
        assert_eq!(load_calendar(&source).await, HolidayCalendar::build(FALLBACK_HOLIDAYS));
    }

    #[tokio::test]
    async fn test_fallback_source_never_fails() {
        let calendar = load_calendar(&FallbackHolidaySource).await;
        assert_eq!(calendar.len(), FALLBACK_HOLIDAYS.len());
    }
}
