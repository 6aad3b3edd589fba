// main.rs - Entry point for the Hyper Rekt disaster viewer

use clap::{Parser, ValueHint};
use env_logger::Env;
use log::{error, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use hyperrekt::app::{App, SpinOutcome};
use hyperrekt::config::{get_config, Config};
use hyperrekt::connectors::hyperliquid::{HyperliquidConfig, HyperliquidRestClient};
use hyperrekt::display::render_view;
use hyperrekt::scanner::{DemoDisasters, DisasterScanner};
use hyperrekt::types::AppError;

/// Hyper Rekt - witness Hyperliquid's most painful open positions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (toml, json or yaml)
    #[arg(
        short = 'c',
        long,
        value_hint = ValueHint::FilePath,
        default_value = "config.toml",
        env = "HYPERREKT_CONFIG"
    )]
    config: PathBuf,

    /// Number of spins to run in batch mode
    #[arg(short = 's', long, default_value_t = 1)]
    spins: usize,

    /// Delay between batch spins in seconds
    #[arg(long, default_value_t = 0)]
    spin_delay: u64,

    /// Spin on every Enter key press until `q` is entered
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Extra account address to check (repeatable)
    #[arg(short = 'a', long = "address")]
    addresses: Vec<String>,

    /// Discover additional accounts from the leaderboard
    #[arg(long)]
    leaderboard: bool,

    /// Override the configured log level
    #[arg(long, env = "HYPERREKT_LOG")]
    log_level: Option<String>,
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    config.discovery.seed_addresses.extend(cli.addresses.iter().cloned());
    if cli.leaderboard {
        config.discovery.use_leaderboard = true;
    }
    if let Some(level) = &cli.log_level {
        config.general.log_level = level.clone();
    }
    config
}

fn print_view(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "\n{text}\n");
    let _ = stdout.flush();
}

async fn spin_and_render(app: &App) {
    match app.spin().await {
        SpinOutcome::Completed(view) => {
            print_view(&render_view(&view, chrono::Utc::now().timestamp_millis()));
        }
        SpinOutcome::Busy => info!("Still finding a disaster, hang on"),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Load configuration from file
    let config = match Config::from_file(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            eprintln!("Falling back to default configuration");
            Config::default()
        }
    };
    let config = apply_overrides(config, &cli);
    config.validate()?;
    if Config::global().set(config).is_err() {
        return Err(AppError::ConfigError("Configuration already initialized".to_string()));
    }

    // Configure logging based on configuration
    env_logger::Builder::from_env(Env::default().default_filter_or(&get_config().general.log_level))
        .format(|buf, record| {
            if record.level() <= log::Level::Info {
                writeln!(buf, "[{}] {}", record.level(), record.args())
            } else {
                writeln!(
                    buf,
                    "[{} {}:{}] {}",
                    record.level(),
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.args()
                )
            }
        })
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .filter_module("tokio", LevelFilter::Warn)
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("Starting Hyper Rekt against {}", get_config().api.info_url);

    let client = HyperliquidRestClient::new(HyperliquidConfig::from(&get_config().api))?;
    let scanner = DisasterScanner::new(Arc::new(client), Arc::new(DemoDisasters::new()), get_config());
    let app = App::new(scanner);

    if cli.interactive {
        print_view(&render_view(&app.view().await, chrono::Utc::now().timestamp_millis()));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if matches!(line.trim(), "q" | "quit" | "exit") => break,
                Ok(Some(_)) => spin_and_render(&app).await,
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read input: {e}");
                    break;
                }
            }
        }
    } else {
        for i in 0..cli.spins {
            if i > 0 && cli.spin_delay > 0 {
                tokio::time::sleep(Duration::from_secs(cli.spin_delay)).await;
            }
            spin_and_render(&app).await;
        }
    }

    info!("Application shutting down.");
    Ok(())
}
