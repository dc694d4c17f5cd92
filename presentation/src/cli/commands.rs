//! CLI command definitions

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use travel_domain::SearchParams;

/// Output format for planning results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every leg with trains, platforms and stops
    Full,
    /// One line per journey
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for travel_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for travel-assistant
#[derive(Parser, Debug)]
#[command(name = "travel-assistant")]
#[command(author, version, about = "Conversational train trip planner")]
#[command(long_about = r#"
Travel Assistant plans train trips by talking to a planning backend.

Describe the trip in plain words and the backend turns it into a pre-plan
(origin, destination, time, optional via station). Once the pre-plan is
complete, connections are searched automatically.

Configuration files are loaded from (in priority order):
1. TRAVEL_* environment variables (e.g. TRAVEL_BACKEND__BASE_URL)
2. --config <path>     Explicit config file
3. ./travel.toml       Project-level config
4. ~/.config/travel-assistant/config.toml   Global config

Example:
  travel-assistant "Berlin to Hamburg tomorrow morning"
  travel-assistant --from "Berlin Hbf" --to "München Hbf" --via "Erfurt Hbf" --min-transfer 10
  travel-assistant --stations Berl
  travel-assistant --chat
"#)]
pub struct Cli {
    /// Trip description for one chat turn (not required in chat mode)
    pub request: Option<String>,

    /// Start interactive planning mode
    #[arg(short, long)]
    pub chat: bool,

    /// Origin station for a direct search
    #[arg(long, value_name = "STATION", requires = "to")]
    pub from: Option<String>,

    /// Destination station for a direct search
    #[arg(long, value_name = "STATION", requires = "from")]
    pub to: Option<String>,

    /// Departure time: "YYYY-MM-DD HH:MM", "YYYY-MM-DDTHH:MM" or "HH:MM" (today)
    #[arg(long, value_name = "TIME", value_parser = parse_departure, requires = "from")]
    pub at: Option<NaiveDateTime>,

    /// Station the journey must pass through
    #[arg(long, value_name = "STATION", requires = "from")]
    pub via: Option<String>,

    /// Minimum transfer time at the via station, in minutes
    #[arg(long, value_name = "MINUTES", requires = "via")]
    pub min_transfer: Option<u32>,

    /// Look up station names matching the given text
    #[arg(long, value_name = "TEXT")]
    pub stations: Option<String>,

    /// Show the live departure board of a station
    #[arg(long, value_name = "STATION")]
    pub live: Option<String>,

    /// Show backend status and the live ticker
    #[arg(long)]
    pub status: bool,

    /// Do not search connections after a chat turn
    #[arg(long)]
    pub no_search: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Search parameters given by `--from` / `--to` and friends
    pub fn search_params(&self) -> Option<SearchParams> {
        let (Some(from), Some(to)) = (&self.from, &self.to) else {
            return None;
        };
        let mut params = SearchParams::new(from.as_str(), to.as_str());
        if let Some(at) = self.at {
            params = params.departing_at(at);
        }
        if let Some(via) = &self.via {
            params = params.with_via(via.as_str(), self.min_transfer);
        }
        Some(params)
    }
}

/// Parse a departure time argument
pub fn parse_departure(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(time);
        }
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(Local::now().date_naive().and_time(time));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(time) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(time);
    }
    Err(format!(
        "invalid departure time '{}' (expected YYYY-MM-DD HH:MM or HH:MM)",
        raw
    ))
}
