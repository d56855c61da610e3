//! Wallet CLI entry point.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wallet_cli::cli::{api_config, client_config, Cli, Commands};
use wallet_cli::error::Result;
use wallet_cli::repl::Repl;
use wallet_cli::serve::{self, ServeOptions};

fn main() {
    // Local overrides first; dotenvy never replaces a variable already set
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Repl {
            node_url,
            status_interval_ms,
            save_check_interval_ms,
        } => {
            let config = client_config(&node_url, status_interval_ms, save_check_interval_ms);
            Repl::new(config)?.run()
        }
        Commands::Serve {
            host,
            port,
            book,
            balance,
            block_interval_secs,
            grace_ms,
        } => {
            let options = ServeOptions {
                api: api_config(&host, port, &book),
                balance,
                block_interval: block_interval_secs.map(Duration::from_secs),
                grace: Duration::from_millis(grace_ms),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve::run(options))
        }
    }
}
