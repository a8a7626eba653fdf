use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::config::PageConfig;
use quiz_core::dom::Dom;
use quiz_core::model::{Quiz, ThemeName};
use quiz_core::page::PageBuilder;
use services::QuizPage;
use storage::repository::{KeyValueStore, Storage};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::{App, SharedPage, UiApp, build_app_context};

const DEFAULT_THEMES: [&str; 3] = ["light", "dark", "sepia"];

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTheme { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTheme { raw } => write!(f, "invalid --theme value: {raw:?}"),
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

struct DesktopApp {
    title: String,
    config: PageConfig,
    page: SharedPage,
}

impl UiApp for DesktopApp {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn page_config(&self) -> PageConfig {
        self.config.clone()
    }

    fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }
}

struct Args {
    db_url: String,
    quiz_file: Option<PathBuf>,
    themes: Vec<ThemeName>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui          [--db <sqlite_url>] [--quiz <file.json>]");
    eprintln!("                                  [--theme <name>]...");
    eprintln!("  cargo run -p app -- reset-theme [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!("  --quiz built-in sample quiz");
    eprintln!("  --theme light --theme dark --theme sepia");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_FILE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    ResetTheme,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "reset-theme" => Some(Self::ResetTheme),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = normalize_sqlite_url(
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:quiz.sqlite3".into()),
        );
        let mut quiz_file = std::env::var("QUIZ_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut themes = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--quiz" => {
                    quiz_file = Some(PathBuf::from(require_value(args, "--quiz")?));
                }
                "--theme" => {
                    let value = require_value(args, "--theme")?;
                    let theme = ThemeName::new(value.clone())
                        .map_err(|_| ArgsError::InvalidTheme { raw: value })?;
                    themes.push(theme);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if themes.is_empty() {
            themes = DEFAULT_THEMES
                .iter()
                .filter_map(|name| ThemeName::new(*name).ok())
                .collect();
        }

        Ok(Self {
            db_url,
            quiz_file,
            themes,
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

fn load_document(
    builder: &PageBuilder<'_>,
    path: Option<&PathBuf>,
) -> Result<(Quiz, Dom), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        let quiz = Quiz::sample();
        let document = builder.build(&quiz)?;
        return Ok((quiz, document));
    };
    let raw = std::fs::read_to_string(path)?;
    let (quiz, document) = builder.build_json(&raw)?;
    info!(path = %path.display(), questions = quiz.questions.len(), "loaded quiz");
    Ok((quiz, document))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    log_fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means `ui`.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
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
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Both subcommands need the migrated key_value table.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let config = PageConfig::default();

    match cmd {
        Command::Ui => {
            let builder = PageBuilder::new(&config).with_themes(parsed.themes);
            let (quiz, document) = load_document(&builder, parsed.quiz_file.as_ref())?;
            let page = QuizPage::load(document, Arc::clone(&storage.preferences), &config).await?;
            info!(
                theme = page.current_theme().map_or("default", ThemeName::as_str),
                "quiz page ready"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                title: quiz.title.clone(),
                config,
                page: Arc::new(Mutex::new(page)),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(quiz.title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::ResetTheme => {
            storage
                .preferences
                .remove_item(&config.theme.storage_key)
                .await?;
            info!(db = %parsed.db_url, "stored theme cleared");
            Ok(())
        }
    }
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
