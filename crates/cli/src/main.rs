//! # forecast-cli
//!
//! Command-line front end: forecast a series from a file, or start the
//! REST server.

use std::path::PathBuf;

use algorithm_facade::{ForecastConfig, Forecaster};
use clap::{Parser, Subcommand};
use forecast_server::ServerConfig;

mod data;

use data::{load_data, write_forecast_results, CliResult};

#[derive(Parser)]
#[command(name = "forecast")]
#[command(about = "LSTM time series forecasting CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a series from a file and forecast ahead
    Forecast {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of steps to forecast
        #[arg(short, long, default_value = "3")]
        steps: usize,

        /// Past values fed to the model per prediction
        #[arg(short, long, default_value = "3")]
        window: usize,

        /// Training epochs
        #[arg(short, long, default_value = "100")]
        epochs: usize,

        /// Seed for reproducible training
        #[arg(long)]
        seed: Option<u64>,

        /// Column name or index for time series values (default: first column)
        #[arg(short, long)]
        column: Option<String>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the REST API server
    ///
    /// Reads the same environment as `forecast-server` (`HOST`, `PORT`,
    /// `FORECAST_*`, `.env`); flags override it.
    Serve {
        /// Port to listen on (default: $PORT or 5001)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: $HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
    },
}

struct ForecastArgs {
    input: PathBuf,
    steps: usize,
    config: ForecastConfig,
    column: Option<String>,
    output: Option<PathBuf>,
}

/// Run forecast command
fn run_forecast(args: ForecastArgs) -> CliResult<()> {
    let data = load_data(&args.input, args.column.as_deref())?;
    eprintln!(
        "Loaded {} data points from {:?}",
        data.len(),
        args.input.file_name().unwrap_or_default()
    );

    let forecaster = Forecaster::new(args.config).map_err(|e| e.to_string())?;
    let forecast = forecaster
        .forecast(&data, Some(args.steps))
        .map_err(|e| e.to_string())?;

    eprintln!(
        "Trained on {} windows (in-sample RMSE {:.6})",
        forecast.training_samples, forecast.final_rmse
    );
    for (i, val) in forecast.values.iter().enumerate() {
        eprintln!("  Step {}: {:.4}", i + 1, val);
    }

    write_forecast_results(&forecast.values, args.output.as_deref())
}

/// Apply `--host`/`--port` on top of the environment configuration
fn serve_config(env: ServerConfig, host: Option<String>, port: Option<u16>) -> ServerConfig {
    ServerConfig {
        host: host.unwrap_or(env.host),
        port: port.unwrap_or(env.port),
        forecast: env.forecast,
    }
}

/// Run serve command
fn run_serve(host: Option<String>, port: Option<u16>) -> CliResult<()> {
    dotenvy::dotenv().ok();
    forecast_server::init_tracing();

    let env = ServerConfig::from_env().map_err(|e| e.to_string())?;
    let config = serve_config(env, host, port);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;
    runtime
        .block_on(forecast_server::serve(config))
        .map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast {
            input,
            steps,
            window,
            epochs,
            seed,
            column,
            output,
        } => {
            let config = ForecastConfig::new().with_window(window).with_epochs(epochs);
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            run_forecast(ForecastArgs {
                input,
                steps,
                config,
                column,
                output,
            })
        }

        Commands::Serve { port, host } => run_serve(host, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
