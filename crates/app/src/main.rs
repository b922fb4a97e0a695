mod config;

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use services::{AppServices, Clock};
use storage::repository::Storage;
use storage::seed::seed_catalogue;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use web::{AppState, router};

use crate::config::Config;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidHost { raw: String },
    InvalidPort { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidHost { raw } => write!(f, "invalid --host value: {raw}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- serve [--db <sqlite_url>] [--host <ip>] [--port <port>]");
    eprintln!("  cargo run -p app -- seed  [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {}", config::DEFAULT_DB_URL);
    eprintln!("  --host 0.0.0.0 --port 8000");
    eprintln!();
    eprintln!("Environment (.env is loaded if present):");
    eprintln!("  PREP_DB_URL, HOST, PORT, RUST_LOG");
    eprintln!("  OPENAI_API_KEY, OPENAI_BASE_URL, PREP_AI_MODEL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    bind: SocketAddr,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        config: &Config,
    ) -> Result<Self, ArgsError> {
        let mut db_url = normalize_sqlite_url(config.db_url.clone());
        let mut bind = config.bind_addr();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--host" => {
                    let value = require_value(args, "--host")?;
                    let host: IpAddr = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidHost { raw: value.clone() })?;
                    bind.set_ip(host);
                }
                "--port" => {
                    let value = require_value(args, "--port")?;
                    let port: u16 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
                    bind.set_port(port);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, bind })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn serve(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let services = AppServices::new_sqlite(&args.db_url, Clock::system()).await?;
    let app = router(AppState::new(services)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(addr = %args.bind, db = %args.db_url, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn seed(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::sqlite(&args.db_url).await?;
    let (user, report) = seed_catalogue(&storage, Clock::system().now()).await?;
    tracing::info!(
        db = %args.db_url,
        user = %user.username(),
        questions = report.questions,
        attempts_created = report.attempts_created,
        "seed data created"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    init_tracing(&config.log_level);

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand serves.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter, &config).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;

    match cmd {
        Command::Serve => serve(parsed).await,
        Command::Seed => seed(parsed).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn config() -> Config {
        Config {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
            db_url: "sqlite:///tmp/prep.sqlite3".into(),
            log_level: "info".into(),
        }
    }

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter, &config())
    }

    #[test]
    fn defaults_come_from_config() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.db_url, "sqlite:///tmp/prep.sqlite3");
        assert_eq!(args.bind.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&["--db", "sqlite:/var/prep.db", "--host", "127.0.0.1", "--port", "9000"])
            .unwrap();
        assert_eq!(args.db_url, "sqlite:///var/prep.db");
        assert_eq!(args.bind.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(parse(&["--port", "http"]), Err(ArgsError::InvalidPort { .. })));
        assert!(matches!(parse(&["--host", "localhost"]), Err(ArgsError::InvalidHost { .. })));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::MissingValue { flag: "--db" })));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn memory_url_is_left_alone() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }
}
