use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use space_availability::{fetch_availability_with_options, QueryOptions, Space};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "availability", version)]
#[command(about = "Print the next available booking slot per day for a space")]
struct Cli {
    /// Space JSON file (use "-" for stdin)
    #[arg(short, long)]
    space: PathBuf,

    /// Number of days to report, starting today. Negative values report nothing
    #[arg(short, long, default_value_t = 7, allow_negative_numbers = true)]
    days: i64,

    /// Reference instant as RFC 3339 (default: the current time)
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Slot length in minutes
    #[arg(long, default_value_t = 15)]
    slot_minutes: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log query details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let space = load_space(&cli.space)?;
    space
        .validate()
        .with_context(|| format!("invalid space in {}", cli.space.display()))?;

    let options = QueryOptions::with_slot_minutes(cli.slot_minutes)?;
    let days = u32::try_from(cli.days.max(0)).context("--days is too large")?;
    let now = cli.now.unwrap_or_else(Utc::now);

    tracing::debug!(
        space = %cli.space.display(),
        time_zone = %space.time_zone,
        days,
        "space loaded"
    );

    let availability = fetch_availability_with_options(&space, days, now, &options)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&availability)?
    } else {
        serde_json::to_string(&availability)?
    };
    println!("{output}");

    Ok(())
}

fn load_space(path: &Path) -> Result<Space> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read space from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    Space::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_instant(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{s}' is not an RFC 3339 datetime: {e}"))
}

fn init_logger(verbose: bool) -> Result<()> {
    let log_level = if verbose { "debug" } else { "warn" };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
