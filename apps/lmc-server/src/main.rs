#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod server;

use anyhow::Result;
use calculator::CalculatorModule;
use clap::{Parser, Subcommand};
use lmc_bootstrap::{AppConfig, CliArgs};

use std::path::PathBuf;

/// LMC Server - arithmetic expression evaluation over HTTP
#[derive(Parser)]
#[command(name = "lmc-server")]
#[command(about = "LMC Server - arithmetic expression evaluation over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
    /// Evaluate one expression and print the result
    Eval {
        /// Infix expression, e.g. "2 + 2 * 2"
        expression: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.clone(),
        port: cli.port,
        verbose: cli.verbose,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (LMC__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_cli_overrides(&args)?;

    lmc_bootstrap::init_logging(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "LMC Server starting");

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    // Dispatch subcommands (default: run)
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
        Commands::Eval { expression } => eval_expression(&config, &expression),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.bind_addr()?;
    CalculatorModule::from_app_config(config)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

fn eval_expression(config: &AppConfig, expression: &str) -> Result<()> {
    let module = CalculatorModule::from_app_config(config)?;
    let value = module.service().calculate(expression)?;
    println!("{value:.6}");
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let addr = config.bind_addr()?;
    let calculator = CalculatorModule::from_app_config(config)?;
    let router = server::build_router(&config.server, &calculator);

    let cancel = lmc_bootstrap::shutdown_token();
    server::serve(router, addr, cancel).await?;

    tracing::info!("LMC Server stopped");
    Ok(())
}
