use std::fmt;

use culture_core::ModuleCatalog;
use culture_core::model::{CountryName, Percent, UserId};
use storage::repository::{ProgressStore, Storage};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user: String,
    country: String,
    completed: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCompleted { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCompleted { raw } => write!(f, "invalid --completed value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("CULTURE_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3?mode=rwc".into());
        let mut user = std::env::var("CULTURE_USER_ID").unwrap_or_else(|_| "demo".into());
        let mut country = "United Arab Emirates".to_string();
        let mut completed = 2;

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
                "--user" => user = require_value(&mut args, "--user")?,
                "--country" => country = require_value(&mut args, "--country")?,
                "--completed" => {
                    let value = require_value(&mut args, "--completed")?;
                    completed = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidCompleted { raw: value.clone() })?;
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
            user,
            country,
            completed,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3?mode=rwc)");
    eprintln!("  --user <id>               User to seed (default: demo)");
    eprintln!("  --country <name>          Selected country (default: United Arab Emirates)");
    eprintln!("  --completed <n>           Mark the first n modules as opened (default: 2)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  CULTURE_DB_URL, CULTURE_USER_ID");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let catalog = ModuleCatalog::builtin()?;
    let user = UserId::new(args.user.clone())?;
    let country = CountryName::new(args.country.clone())?;

    storage.progress.set_selected_country(&user, &country).await?;

    let mut seeded = 0;
    for module in catalog.iter().filter(|m| m.ordinal().value() <= args.completed) {
        storage
            .progress
            .set_module_progress(&user, &country, module.key(), Percent::COMPLETE)
            .await?;
        storage
            .progress
            .ratchet_completed_module(&user, module.ordinal().value())
            .await?;
        seeded += 1;
    }

    println!(
        "Seeded user {user} ({country}) with {seeded} opened modules into {}",
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
