//! CLI entry point.
//!
//! Loads `.env`, parses arguments, installs logging, bootstraps the context
//! and routes the command to its handler.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tunegrab_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,tunegrab=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stderr keeps stdout free for progress and the summary
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli);
    let mut ctx = bootstrap(&config);

    match command {
        Commands::Download(args) => {
            handlers::download::execute(&mut ctx, args).await?;
        }
        Commands::Check => {
            handlers::check::execute(&ctx).await?;
        }
    }

    ctx.settle().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads TUNEGRAB_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
