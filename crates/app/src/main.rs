use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AnswerShuffler, AppServices, Clock, QuizLoopService, QuizResultService, QuizSetupService,
    RandomShuffler, SeededShuffler, TriviaConfig,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidApiUrl { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn quiz_setup(&self) -> Arc<QuizSetupService> {
        self.services.quiz_setup()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn quiz_results(&self) -> Arc<QuizResultService> {
        self.services.quiz_results()
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    trivia: TriviaConfig,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [ui] [--db <sqlite_url>] [--api-url <url>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!("  --api-url {}", services::trivia::DEFAULT_BASE_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_API_BASE_URL, QUIZ_SHUFFLE_SEED, RUST_LOG");
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

impl Args {
    /// Parse CLI flags; `env` supplies the environment fallbacks.
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter().peekable();
        if args.peek().is_some_and(|first| first == "ui") {
            args.next();
        }

        let mut db_url = env("QUIZ_DB_URL")
            .map_or_else(|| normalize_sqlite_url("sqlite:quiz.sqlite3".into()), normalize_sqlite_url);
        let mut trivia = TriviaConfig::from_lookup(&env);
        let mut seed = env("QUIZ_SHUFFLE_SEED").map(parse_seed).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--api-url" => {
                    let value = require_value(&mut args, "--api-url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    trivia.base_url = value;
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    seed = Some(parse_seed(value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            trivia,
            seed,
        })
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

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed =
        Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    prepare_sqlite_file(&parsed.db_url)?;

    let shuffler: Arc<dyn AnswerShuffler> = match parsed.seed {
        Some(seed) => Arc::new(SeededShuffler::new(seed)),
        None => Arc::new(RandomShuffler),
    };
    tracing::info!(
        db_url = %parsed.db_url,
        api = %parsed.trivia.base_url,
        seed = ?parsed.seed,
        "starting quiz"
    );
    let services = AppServices::new_sqlite(
        &parsed.db_url,
        Clock::default_clock(),
        parsed.trivia,
        shuffler,
    )
    .await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some tao setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("QuizMaster")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(%err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
