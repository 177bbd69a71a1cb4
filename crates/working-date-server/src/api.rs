//! HTTP routes.
//!
//! ```text
//! /
//! ├── GET /working-date   - compute a business date
//! ├── GET /               - same handler, kept for older clients
//! └── GET /health         - liveness probe
//! ```

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use working_date_engine::compute;

use crate::error::ApiError;
use crate::holidays::{load_calendar, HolidaySource};
use crate::params::{parse_query, RawQuery};

/// Source of "now" for requests without a `date`.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    holidays: Arc<dyn HolidaySource>,
    clock: Clock,
}

impl AppState {
    pub fn new(holidays: Arc<dyn HolidaySource>) -> Self {
        Self::with_clock(holidays, Arc::new(Utc::now))
    }

    pub fn with_clock(holidays: Arc<dyn HolidaySource>, clock: Clock) -> Self {
        Self { holidays, clock }
    }
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkingDateResponse {
    pub date: String,
}

impl WorkingDateResponse {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            date: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/working-date", get(working_date))
        .route("/", get(working_date))
        .route("/health", get(health))
        .with_state(state)
}

/// Validate the query, load holidays, and run the calculation.
///
/// Shared by the HTTP handler and the `compute` command.
pub async fn resolve_working_date(
    raw: &RawQuery,
    holidays: &dyn HolidaySource,
    now: DateTime<Utc>,
) -> Result<WorkingDateResponse, ApiError> {
    let query = parse_query(raw)?;
    debug!(?query, "validated request");

    let calendar = load_calendar(holidays).await;
    let start = query.start.unwrap_or(now);
    let result = compute(start, query.duration, &calendar)?;

    info!(
        start = %start,
        days = ?query.duration.days,
        hours = ?query.duration.hours,
        result = %result,
        "working date computed"
    );
    Ok(WorkingDateResponse::new(result))
}

async fn working_date(
    State(state): State<AppState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<Json<WorkingDateResponse>, ApiError> {
    let Query(raw) = query.map_err(|e| ApiError::invalid(e.body_text()))?;
    let now = (state.clock)();
    resolve_working_date(&raw, state.holidays.as_ref(), now)
        .await
        .map(Json)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
