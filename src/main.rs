use anyhow::{bail, Result};
use clap::{value_parser, Arg, Command};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wp_playlist_dl::{Config, DownloadTarget, PlaylistDownloader, ProgressReporter};

/// Prints one status line per track on stdout
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_download(&self, target: &DownloadTarget) {
        println!(
            "Downloading {} to {}...",
            target.url,
            target.destination.display()
        );
    }

    fn on_skip(&self, target: &DownloadTarget) {
        println!(
            "Skipping {} to {}...",
            target.url,
            target.destination.display()
        );
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let matches = Command::new("wp-playlist-dl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Downloads every track of a WordPress playlist embedded in a web page")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("Page containing the WordPress playlist"),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("DIR")
                .help("directory name where to save the files")
                .default_value("."),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("N")
                .help("number of files to skip")
                .value_parser(value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = match matches.get_one::<String>("config") {
        Some(path) => Some(PathBuf::from(path)),
        None => Config::locate(Path::new(".")),
    };
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::from_env(),
    };

    init_logging(&config, matches.get_flag("verbose"));
    if let Some(path) = &config_path {
        info!("📄 Loaded configuration from: {}", path.display());
    }
    info!("{}", config.summary());
    config.validate()?;

    let Some(url) = matches.get_one::<String>("url") else {
        bail!("provide an url from where you need to download files");
    };
    let dir = PathBuf::from(
        matches
            .get_one::<String>("dir")
            .map(String::as_str)
            .unwrap_or("."),
    );
    let skip = matches.get_one::<u64>("skip").copied().unwrap_or(0);

    info!("🚀 wp-playlist-dl starting...");
    info!("🌐 Page: {}", url);
    info!("📂 Output directory: {}", dir.display());

    let downloader = PlaylistDownloader::new(&config)?;
    downloader.run(url, &dir, skip, &ConsoleReporter).await?;

    println!("Done.");
    Ok(())
}

/// Log to stderr; RUST_LOG takes precedence over --verbose and the config
fn init_logging(config: &Config, verbose: bool) {
    let default_directive = if verbose {
        "wp_playlist_dl=info".to_string()
    } else {
        config.logging.log_level.clone()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
