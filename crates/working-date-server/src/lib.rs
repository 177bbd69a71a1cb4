//! # working-date-server
//!
//! HTTP service and command-line front end for `working-date-engine`.
//!
//! - [`api`] — axum routes and the shared request resolution
//! - [`params`] — validation of `days`, `hours` and `date`
//! - [`holidays`] — remote holiday list with an embedded fallback
//! - [`error`] — API error kinds and their JSON rendering
//! - [`cli`] — command-line arguments
//! - [`logging`] — tracing subscriber setup
//! - [`server`] — listener and graceful shutdown

pub mod api;
pub mod cli;
pub mod error;
pub mod holidays;
pub mod logging;
pub mod params;
pub mod server;

pub use api::{build_router, resolve_working_date, AppState, WorkingDateResponse};
pub use error::ApiError;
pub use holidays::{FallbackHolidaySource, HolidaySource, HttpHolidaySource};
