use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use starlight_announce::config::{self, ConfigError};
use starlight_announce::dismissal::{FileDismissals, MemoryDismissals};
use starlight_announce::locale::{DefaultLocale, LOCALES_ENV_VAR};
use starlight_announce::targeting::{Announcer, PageRequest};
use starlight_announce::{module, output, schedule};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "starlight-announce")]
#[command(about = "Announcement banner targeting for documentation sites")]
#[command(long_about = "\
Announcement banner targeting for documentation sites

Validates announcement configuration and resolves, for a page visit, which
banners are active, in which language, and how they are presented.

Targeting (all must hold):
  Schedule:  startDate <= now <= end of endDate's day (UTC)
  Hide on:   no hideOn pattern matches the path (checked first, wins ties)
  Show on:   some showOn pattern matches the path

Run 'starlight-announce gen-config' to generate a documented announcements.toml.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a config file and summarize it
    Check {
        /// Config file (.toml or .json)
        #[arg(default_value = "announcements.toml")]
        config: PathBuf,
    },
    /// Show the banner a page visit would get
    Resolve {
        /// Config file (.toml or .json)
        config: PathBuf,
        /// Request path, query string and fragment allowed
        #[arg(long, default_value = "/")]
        path: String,
        /// Visitor locale code
        #[arg(long)]
        locale: Option<String>,
        /// Host locale table as JSON, for the site default locale
        #[arg(long, env = LOCALES_ENV_VAR)]
        locales: Option<String>,
        /// Timestamp to resolve at (ISO 8601); defaults to now
        #[arg(long, value_parser = parse_now)]
        now: Option<DateTime<Utc>>,
        /// JSON file of dismissed announcement ids
        #[arg(long)]
        dismissed: Option<PathBuf>,
        /// Print the banner as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the runtime configuration module
    Module {
        /// Config file (.toml or .json)
        config: PathBuf,
        /// Print the JSON manifest instead of JavaScript
        #[arg(long)]
        json: bool,
    },
    /// Print a stock announcements.toml with all options documented
    GenConfig,
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    schedule::parse_date(value).ok_or_else(|| format!("invalid ISO 8601 timestamp: {value}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ConfigError>() {
                Some(ConfigError::Invalid(invalid)) => output::print_validation_error(invalid),
                _ => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Check { config } => {
            let config = load(&config)?;
            output::print_check_output(&config);
            println!("==> Configuration is valid");
        }
        Command::Resolve {
            config,
            path,
            locale,
            locales,
            now,
            dismissed,
            json,
        } => {
            let announcer = Announcer::new(load(&config)?, DefaultLocale::new(locales));
            let request = PageRequest {
                path,
                locale,
                now: now.unwrap_or_else(Utc::now),
            };
            let banner = match dismissed {
                Some(file) => {
                    announcer.banner(&request, &FileDismissals::load(&file), Instant::now())
                }
                None => announcer.banner(&request, &MemoryDismissals::new(), Instant::now()),
            };
            if json {
                let view = serde_json::json!({
                    "path": request.path,
                    "locale": banner.locale(),
                    "displayMode": banner.mode(),
                    "active": banner.active(),
                    "visible": banner.visible(),
                    "indicator": banner.indicator(),
                });
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                output::print_banner(&request.path, &banner);
            }
        }
        Command::Module { config, json } => {
            let config = load(&config)?;
            if json {
                println!("{}", module::to_manifest_json(&config)?);
            } else {
                print!("{}", module::runtime_module_source(&config)?);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<config::PluginConfig, ConfigError> {
    tracing::info!(path = %path.display(), "loading announcement config");
    config::load_config(path)
}
