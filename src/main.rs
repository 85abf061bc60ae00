use rollcall::cli::{parse_args, run_cli_command, run_local_command, USAGE};
use rollcall::config::{ClientConfig, ENV_LOG};
use rollcall::Client;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so command output stays pipeable.
fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    // Handle --version / --help before any initialization
    if run_local_command(&command) {
        return Ok(());
    }

    init_logging();

    let client = Client::connect(ClientConfig::from_env()).await?;
    run_cli_command(&client, command).await
}
