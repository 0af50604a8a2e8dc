//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and the configuration the binary
//! loads.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::{ffi::OsString, io::Write, path::PathBuf};

use clap::Parser;
use domain::City;
use infrastructure::{AppConfig, Environment, LogFormat, SecurityValidator};

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "weather-reporter")]
#[command(author, version, about = "CWA forecast + Gemini weather reports", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Cities,
    Forecast {
        #[arg(long, default_value = "臺北市")]
        city: City,
    },
    Report {
        #[arg(long, default_value = "臺北市")]
        city: City,
    },
    Models,
    CheckConfig,
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn cli_parses_cities_command() {
    let cli = parse_args(&["weather-reporter", "cities"]).unwrap();
    assert!(matches!(cli.command, Commands::Cities));
}

#[test]
fn cli_parses_report_for_each_city() {
    for city in City::all() {
        let name = city.dataset_name();
        let cli = parse_args(&["weather-reporter", "report", "--city", name]).unwrap();
        if let Commands::Report { city: parsed } = cli.command {
            assert_eq!(parsed, city);
        } else {
            panic!("Expected Report command");
        }
    }
}

#[test]
fn cli_parses_forecast_with_default_city() {
    let cli = parse_args(&["weather-reporter", "forecast"]).unwrap();
    if let Commands::Forecast { city } = cli.command {
        assert_eq!(city, City::Taipei);
    } else {
        panic!("Expected Forecast command");
    }
}

#[test]
fn cli_rejects_unknown_city() {
    let err = parse_args(&["weather-reporter", "report", "--city", "台中市"]).err();
    assert!(err.is_some());
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["weather-reporter"]).is_err());
}

#[test]
fn cli_counts_verbosity() {
    let cli = parse_args(&["weather-reporter", "-vvv", "models"]).unwrap();
    assert_eq!(cli.verbose, 3);
    assert!(matches!(cli.command, Commands::Models));
}

#[test]
fn cli_parses_check_config_with_path() {
    let cli = parse_args(&["weather-reporter", "-c", "weather.toml", "check-config"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("weather.toml")));
    assert!(matches!(cli.command, Commands::CheckConfig));
}

#[test]
fn config_file_drives_startup_checks() {
    let file = write_config(
        r#"
environment = "production"

[cwa]
accept_invalid_certs = true

[logging]
format = "json"
"#,
    );

    let config = AppConfig::load_from_path(Some(file.path())).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.logging.format, LogFormat::Json);

    let warnings = SecurityValidator::validate(&config);
    assert!(warnings.iter().any(|w| w.code == "SEC001" && w.is_critical()));
    assert!(SecurityValidator::should_block_startup_with(
        &config, &warnings, false
    ));
}

#[test]
fn sample_config_without_keys_has_no_warnings() {
    let file = write_config(
        r#"
[gemini]
model = "gemini-2.5-flash"

[cache]
ttl_secs = 300
"#,
    );

    let config = AppConfig::load_from_path(Some(file.path())).unwrap();
    assert_eq!(config.cache.ttl_secs, 300);
    assert!(SecurityValidator::validate(&config).is_empty());
}
