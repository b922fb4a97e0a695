use std::fmt;

use chrono::{DateTime, Utc};
use storage::repository::Storage;
use storage::seed::seed_catalogue;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("PREP_DB_URL").unwrap_or_else(|_| "sqlite:prep.sqlite3?mode=rwc".into());
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, now })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:prep.sqlite3?mode=rwc)");
    eprintln!("  --now <rfc3339>           Timestamp for seeded attempts");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREP_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let (user, report) = seed_catalogue(&storage, now).await?;

    println!(
        "Seeded {} questions and {} new attempts for {} into {}",
        report.questions,
        report.attempts_created,
        user.username(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
