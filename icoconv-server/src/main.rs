// ABOUTME: Main entry point for the icoconv web server
// ABOUTME: Parses flags, layers configuration, and starts the HTTP worker pool

use anyhow::{Context, Result};
use clap::Parser;
use icoconv_server::app::App;
use icoconv_server::config::Config;
use icoconv_server::server::IconServer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "icoconv")]
#[command(about = "Web front end that converts uploaded images into favicon.ico files", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file applied on top of the standard locations
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Public site URL used for canonical links and the sitemap
    #[arg(long)]
    public_url: Option<String>,

    /// Key rate limits on the first X-Forwarded-For hop
    #[arg(long)]
    trust_forwarded_for: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            bind: self.bind.clone(),
            port: self.port,
            workers: self.workers,
            public_url: self.public_url.clone(),
            trust_forwarded_for: self.trust_forwarded_for.then_some(true),
            ..Config::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load(cli.config.as_deref())?.merge(cli.overrides());
    let settings = config
        .into_settings()
        .context("Invalid server configuration")?;

    if settings.secret_key.is_none() {
        log::warn!("No secret key configured; set SECRET_KEY for production deployments");
    }
    log::debug!(
        "Upload ceiling {} bytes, quotas {:?}, conversion {:?}",
        settings.max_upload_bytes,
        settings.quotas,
        settings.conversion
    );

    let app = App::new(settings).context("Failed to build the site icon")?;
    IconServer::bind(app)?.run()?;
    Ok(())
}
