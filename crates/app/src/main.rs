use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use culture_core::model::UserId;
use services::{AppServices, NarratorFactory, NoNarration, TimedCelebration};

mod terminal;

use terminal::ConsoleNarration;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUserId { raw: String },
    InvalidCelebrationMs { raw: String },
    MissingCountry,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user value: {raw:?}"),
            ArgsError::InvalidCelebrationMs { raw } => {
                write!(f, "invalid --celebration-ms value: {raw}")
            }
            ArgsError::MissingCountry => write!(f, "select-country requires a country name"),
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
    eprintln!("  cargo run -p app -- home            [options]");
    eprintln!("  cargo run -p app -- select-country  <name> [options]");
    eprintln!("  cargo run -p app -- profile         [--json] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>        default sqlite:culture.sqlite3");
    eprintln!("  --user <id>              default local-user");
    eprintln!("  --no-narration           disable read-aloud");
    eprintln!("  --celebration-ms <n>     default 1500");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CULTURE_DB_URL, CULTURE_USER_ID, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Home,
    SelectCountry(String),
    Profile { json: bool },
}

struct Args {
    command: Command,
    db_url: String,
    user: UserId,
    narration: bool,
    celebration: Duration,
}

impl Args {
    fn parse(mut argv: Vec<String>) -> Result<Self, ArgsError> {
        let mut command = match argv.first().map(String::as_str) {
            Some("select-country") => {
                argv.remove(0);
                Command::SelectCountry(String::new())
            }
            Some("profile") => {
                argv.remove(0);
                Command::Profile { json: false }
            }
            Some("home") => {
                argv.remove(0);
                Command::Home
            }
            _ => Command::Home,
        };

        let mut db_url = std::env::var("CULTURE_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://culture.sqlite3".into(), normalize_sqlite_url);
        let mut user_raw =
            std::env::var("CULTURE_USER_ID").unwrap_or_else(|_| "local-user".to_owned());
        let mut narration = true;
        let mut celebration = TimedCelebration::DEFAULT_DURATION;
        let mut country_words = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user" => user_raw = require_value(&mut args, "--user")?,
                "--no-narration" => narration = false,
                "--celebration-ms" => {
                    let value = require_value(&mut args, "--celebration-ms")?;
                    let millis: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCelebrationMs { raw: value.clone() })?;
                    celebration = Duration::from_millis(millis);
                }
                "--json" if matches!(command, Command::Profile { .. }) => {
                    command = Command::Profile { json: true };
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if matches!(command, Command::SelectCountry(_)) && !arg.starts_with("--") => {
                    country_words.push(arg);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if let Command::SelectCountry(country) = &mut command {
            if country_words.is_empty() {
                return Err(ArgsError::MissingCountry);
            }
            *country = country_words.join(" ");
        }
        let user = UserId::new(user_raw.clone())
            .map_err(|_| ArgsError::InvalidUserId { raw: user_raw })?;

        Ok(Self {
            command,
            db_url,
            user,
            narration,
            celebration,
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&args.db_url)?;
    let narrators: Arc<dyn NarratorFactory> = if args.narration {
        Arc::new(ConsoleNarration)
    } else {
        Arc::new(NoNarration)
    };
    let app = AppServices::new_sqlite(
        &args.db_url,
        narrators,
        Arc::new(TimedCelebration::new(args.celebration)),
    )
    .await?;
    log::debug!("using {} as {}", args.db_url, args.user);

    match args.command {
        Command::Home => terminal::run_home(&app, &args.user).await?,
        Command::SelectCountry(country) => {
            let selected = app.country().select(&args.user, &country).await?;
            println!("Selected {selected}");
        }
        Command::Profile { json } => {
            let overview = app.profile().overview(&args.user).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                terminal::print_profile(&args.user, &overview);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[test]
    fn select_country_joins_words() {
        let args = Args::parse(argv(&[
            "select-country",
            "United",
            "Arab",
            "Emirates",
            "--user",
            "amal",
        ]))
        .unwrap();
        assert_eq!(
            args.command,
            Command::SelectCountry("United Arab Emirates".into())
        );
        assert_eq!(args.user.as_str(), "amal");
    }

    #[test]
    fn profile_json_and_flags() {
        let args = Args::parse(argv(&[
            "profile",
            "--json",
            "--no-narration",
            "--celebration-ms",
            "250",
            "--user",
            "amal",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Profile { json: true });
        assert!(!args.narration);
        assert_eq!(args.celebration, Duration::from_millis(250));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Args::parse(argv(&["--celebration-ms", "soon"])),
            Err(ArgsError::InvalidCelebrationMs { .. })
        ));
        assert!(matches!(
            Args::parse(argv(&["home", "--json"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["select-country"])),
            Err(ArgsError::MissingCountry)
        ));
        assert!(matches!(
            Args::parse(argv(&["--user", "  "])),
            Err(ArgsError::InvalidUserId { .. })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/culture.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/culture.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
