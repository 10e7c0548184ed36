use clap::Parser;
use fieldwork_pgarray::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present so LOG_LEVEL, APP_ENV, etc. are picked up
    let _ = dotenvy::dotenv();

    let config = fieldwork_pgarray::config::config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.logging.ansi)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting pgarray in {:?} mode", config.environment);

    let cli = Cli::parse();

    if let Err(e) = fieldwork_pgarray::cli::run(cli, config) {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
