//! Weather reporter CLI
//!
//! Fetches the CWA 36-hour forecast for a city and has Gemini narrate it.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, bail};
use application::{
    PipelineOutcome, WeatherReportService,
    ports::{CachePort, ForecastPort, ReportPort},
};
use clap::{Parser, Subcommand};
use domain::City;
use infrastructure::{
    AppConfig, CacheConfig, CwaForecastAdapter, EnvSecretStore, GeminiReportAdapter, RedbCache,
    SecurityValidator, SecurityWarning, init_logging,
};
use tracing::{debug, info, warn};

/// Weather reporter CLI
#[derive(Parser)]
#[command(name = "weather-reporter")]
#[command(author, version, about = "CWA forecast + Gemini weather reports", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "WEATHER_REPORTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable cities
    Cities,

    /// Fetch and print the flattened forecast for a city
    Forecast {
        /// City, as the dataset spells it (臺北市, 臺中市, 高雄市)
        #[arg(long, default_value = "臺北市")]
        city: City,
    },

    /// Fetch the forecast and print the generated report
    Report {
        /// City, as the dataset spells it (臺北市, 臺中市, 高雄市)
        #[arg(long, default_value = "臺北市")]
        city: City,
    },

    /// List the Gemini models available to the configured key
    Models,

    /// Print security warnings and the effective configuration (keys omitted)
    CheckConfig,
}

const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Open the persistent cache, running uncached if it is disabled or unavailable
fn open_cache(config: &CacheConfig) -> Option<Arc<dyn CachePort>> {
    if !config.enabled {
        return None;
    }
    match RedbCache::open(config.path()) {
        Ok(cache) => {
            debug!(path = %cache.path().display(), "Cache opened");
            Some(Arc::new(cache))
        },
        Err(e) => {
            warn!(error = %e, "Cache unavailable, continuing without it");
            None
        },
    }
}

/// Adapters and service built from the resolved configuration
struct App {
    service: WeatherReportService,
    reports: Arc<GeminiReportAdapter>,
    credentials: application::Credentials,
}

async fn build_app(mut config: AppConfig) -> anyhow::Result<App> {
    config.resolve_secrets(&EnvSecretStore::new()).await;
    let credentials = config.credentials()?;

    let forecasts: Arc<dyn ForecastPort> =
        Arc::new(CwaForecastAdapter::with_config(config.cwa.client_config())?);
    let reports = Arc::new(GeminiReportAdapter::with_config(
        config.gemini.inference_config(),
    )?);

    let cache = open_cache(&config.cache);
    debug!(cached = cache.is_some(), "Adapters initialized");

    let service = WeatherReportService::new(
        forecasts,
        Arc::clone(&reports) as Arc<dyn ReportPort>,
        cache,
        config.cache.ttl(),
    );

    Ok(App {
        service,
        reports,
        credentials,
    })
}

/// Report command output; the forecast block already ends with a newline
fn report_output(outcome: &PipelineOutcome) -> String {
    format!(
        "✅ 步驟 1: CWA 資料擷取完成 ({})\n{}---\n📢 步驟 3: 最終 AI 報告輸出\n---\n{}\n",
        outcome.city, outcome.forecast, outcome.report
    )
}

fn print_config_report(config: &AppConfig, warnings: &[SecurityWarning]) -> anyhow::Result<()> {
    if warnings.is_empty() {
        println!("✅ No security warnings");
    } else {
        println!("⚠️  Security warnings:");
        for warning in warnings {
            println!("   {warning}");
        }
    }

    println!();
    println!("📋 Effective configuration (API keys omitted):");
    println!("{}", toml::to_string_pretty(config)?);
    println!(
        "🔑 CWA API key: {}",
        if config.cwa.api_key.is_some() { "set" } else { "missing" }
    );
    println!(
        "🔑 Gemini API key: {}",
        if config.gemini.api_key.is_some() { "set" } else { "missing" }
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_from_path(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    let warnings = SecurityValidator::validate(&config);
    SecurityValidator::log_warnings(&warnings);

    let checking_config = matches!(cli.command, Commands::CheckConfig);
    if !checking_config && SecurityValidator::should_block_startup(&config, &warnings) {
        bail!(
            "Refusing to start with critical security issues in production \
             (set WEATHER_REPORTER_ALLOW_INSECURE_CONFIG=true to override)"
        );
    }

    match cli.command {
        Commands::Cities => {
            println!("🏙️  Cities:");
            for city in City::all() {
                println!("   {city}");
            }
        },

        Commands::Forecast { city } => {
            let app = build_app(config).await?;
            let forecast = app
                .service
                .fetch_forecast(&app.credentials, city)
                .await
                .with_context(|| format!("Failed to fetch the forecast for {city}"))?;
            print!("{forecast}");
        },

        Commands::Report { city } => {
            let app = build_app(config).await?;
            info!(city = %city, "Generating weather report");

            let outcome = app
                .service
                .run(&app.credentials, city)
                .await
                .with_context(|| format!("Failed to fetch the forecast for {city}"))?;

            print!("{}", report_output(&outcome));
        },

        Commands::Models => {
            let app = build_app(config).await?;
            let models = app
                .reports
                .list_models(app.credentials.gemini_api_key())
                .await
                .context("Failed to list Gemini models")?;

            println!("📦 Available Models:");
            for model in models {
                println!("   {model}");
            }
        },

        Commands::CheckConfig => {
            // Validation ran before resolution, so env-provided keys are not
            // reported as stored in the file.
            config.resolve_secrets(&EnvSecretStore::new()).await;
            print_config_report(&config, &warnings)?;
        },
    }

    Ok(())
}
