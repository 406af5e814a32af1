use clap::Parser;
use color_eyre::Result;
use reel::{app, config, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(about = "A terminal UI for a movies REST collection, inspired by k9s")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./reel.yaml, then $XDG_CONFIG_HOME/reel/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Movies collection URL, overrides the config file
  #[arg(short = 'u', long, env = "REEL_API_URL")]
  api_url: Option<String>,

  /// Log file (default: $XDG_DATA_HOME/reel/reel.log)
  #[arg(long)]
  log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = config::Config::load(args.config.as_deref())?;

  // Override the API url if specified on command line
  if let Some(url) = args.api_url {
    config.api.url = url;
  }

  let _log_guard = logging::init(args.log_file)?;
  info!(version = env!("CARGO_PKG_VERSION"), "starting reel");

  // Initialize and run the app
  let mut app = app::App::new(config)?;
  app.run().await?;

  Ok(())
}
