//! Playlist run: extract tracks, derive file names, download in order
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

use crate::config::{Config, OutputConfig};
use crate::downloader::Downloader;
use crate::error::{PlaylistError, Result};
use crate::filename::{build_file_name, index_width, sanitize_component, url_extension};
use crate::http::build_client;
use crate::playlist::{PlaylistExtractor, Track};
use crate::text::html_text;

/// Where and under which name one track is saved
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    /// 1-based position in the playlist
    pub index: usize,
    pub url: String,
    /// Caption text with markup stripped
    pub caption: String,
    /// Extension with leading dot, or empty
    pub extension: String,
    pub file_name: String,
    pub destination: PathBuf,
}

/// Receives progress notifications while a playlist is processed
pub trait ProgressReporter {
    fn on_download(&self, target: &DownloadTarget);

    fn on_skip(&self, target: &DownloadTarget);

    fn on_complete(&self, _target: &DownloadTarget, _bytes: u64) {}
}

/// Reporter that ignores every notification
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn on_download(&self, _target: &DownloadTarget) {}

    fn on_skip(&self, _target: &DownloadTarget) {}
}

/// Outcome of a completed run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub downloaded: Vec<DownloadTarget>,
    pub skipped: Vec<DownloadTarget>,
    pub total_bytes: u64,
}

/// Derive the download target for the track at 1-based `index`
pub fn plan_target(
    track: &Track,
    index: usize,
    width: usize,
    directory: &Path,
    name_limit: usize,
) -> Result<DownloadTarget> {
    let caption = sanitize_component(&html_text(track.display_caption()));

    let url = Url::parse(&track.src).map_err(|source| PlaylistError::InvalidUrl {
        src: track.src.clone(),
        source,
    })?;
    let extension = url_extension(&url);

    let file_name = build_file_name(index, width, &caption, &extension, name_limit);
    let destination = if directory == Path::new(".") {
        PathBuf::from(&file_name)
    } else {
        directory.join(&file_name)
    };

    Ok(DownloadTarget {
        index,
        url: track.src.clone(),
        caption,
        extension,
        file_name,
        destination,
    })
}

/// Downloads every track of a WordPress playlist page
pub struct PlaylistDownloader {
    extractor: PlaylistExtractor,
    downloader: Downloader,
    output: OutputConfig,
}

impl PlaylistDownloader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client(&config.http)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            extractor: PlaylistExtractor::new(client.clone()),
            downloader: Downloader::new(client, config.retry.clone()),
            output: config.output.clone(),
        }
    }

    /// Download the playlist found at `page_url` into `directory`.
    ///
    /// The first `skip` tracks are named and reported but not downloaded.
    /// Any error stops the run; files already written stay on disk.
    pub async fn run(
        &self,
        page_url: &str,
        directory: &Path,
        skip: u64,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunSummary> {
        let tracks = self.extractor.fetch_tracks(page_url).await?;
        let width = index_width(tracks.len());
        let mut summary = RunSummary::default();
        let mut dir_ready = false;

        for (position, track) in tracks.iter().enumerate() {
            let index = position + 1;
            let target = plan_target(
                track,
                index,
                width,
                directory,
                self.output.max_file_name_length,
            )?;

            if index as u64 <= skip {
                debug!("Skipping track {}: {}", index, target.file_name);
                reporter.on_skip(&target);
                summary.skipped.push(target);
                continue;
            }

            if !dir_ready {
                self.prepare_directory(directory).await?;
                dir_ready = true;
            }

            reporter.on_download(&target);
            let bytes = self.downloader.download(&target.destination, &target.url).await?;
            info!("✅ Saved {} ({} bytes)", target.destination.display(), bytes);
            reporter.on_complete(&target, bytes);

            summary.total_bytes += bytes;
            summary.downloaded.push(target);
        }

        info!(
            "🎉 Playlist done: {} downloaded, {} skipped",
            summary.downloaded.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn prepare_directory(&self, directory: &Path) -> Result<()> {
        if self.output.create_dir && !directory.as_os_str().is_empty() {
            tokio::fs::create_dir_all(directory).await?;
        }
        Ok(())
    }
}
