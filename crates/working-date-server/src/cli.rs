use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::holidays::{
    FallbackHolidaySource, HolidaySource, HttpHolidaySource, SourceError, DEFAULT_HOLIDAYS_URL,
};
use crate::params::RawQuery;

#[derive(Parser, Debug)]
#[command(name = "working-date", version, about = "Business date calculator for the Colombian working calendar")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Compute a single working date and print it as JSON
    Compute(ComputeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[command(flatten)]
    pub holidays: HolidayArgs,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ComputeArgs {
    /// Start instant, ISO 8601 in UTC (e.g. 2025-04-10T15:00:00Z); defaults to now
    #[arg(long)]
    pub date: Option<String>,

    /// Business days to add
    #[arg(long)]
    pub days: Option<String>,

    /// Business hours to add
    #[arg(long)]
    pub hours: Option<String>,

    #[command(flatten)]
    pub holidays: HolidayArgs,
}

impl ComputeArgs {
    /// Counts are kept as text so the CLI and HTTP share one validation path.
    pub fn to_query(&self) -> RawQuery {
        RawQuery {
            days: self.days.clone(),
            hours: self.hours.clone(),
            date: self.date.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct HolidayArgs {
    /// URL of the JSON holiday list
    #[arg(long, default_value = DEFAULT_HOLIDAYS_URL)]
    pub holidays_url: String,

    /// Timeout for the holiday request, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub holidays_timeout_ms: u64,

    /// Never fetch holidays; use the embedded list
    #[arg(long)]
    pub offline: bool,
}

impl HolidayArgs {
    pub fn source(&self) -> Result<Arc<dyn HolidaySource>, SourceError> {
        if self.offline {
            return Ok(Arc::new(FallbackHolidaySource));
        }
        let timeout = Duration::from_millis(self.holidays_timeout_ms);
        Ok(Arc::new(HttpHolidaySource::new(self.holidays_url.clone(), timeout)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["working-date", "serve", "--port", "8080"]).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(args.holidays.holidays_url, DEFAULT_HOLIDAYS_URL);
        assert_eq!(args.holidays.holidays_timeout_ms, 3000);
        assert!(!args.holidays.offline);
    }

    #[test]
    fn test_compute_args_become_raw_query() {
        let cli = Cli::try_parse_from([
            "working-date",
            "--json-logs",
            "compute",
            "--days",
            "1",
            "--hours",
            "4",
            "--date",
            "2025-04-10T15:00:00Z",
            "--offline",
        ])
        .unwrap();
        assert!(cli.json_logs);
        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        let query = args.to_query();
        assert_eq!(query.days.as_deref(), Some("1"));
        assert_eq!(query.hours.as_deref(), Some("4"));
        assert_eq!(query.date.as_deref(), Some("2025-04-10T15:00:00Z"));
        assert!(args.holidays.offline);
    }
}
