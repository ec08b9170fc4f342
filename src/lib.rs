//! WordPress playlist downloader
//!
//! Finds the playlist a WordPress `[playlist]` shortcode embeds in a page and
//! downloads every track, one after another, as `{index}-{caption}{ext}`.

pub mod config;
pub mod downloader;
pub mod error;
pub mod filename;
pub mod http;
pub mod orchestrator;
pub mod playlist;
pub mod retry;
pub mod text;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::downloader::{AttemptOutcome, Downloader};
pub use crate::error::{PlaylistError, Result};
pub use crate::filename::limit_file_name;
pub use crate::orchestrator::{
    DownloadTarget, NullReporter, PlaylistDownloader, ProgressReporter, RunSummary,
};
pub use crate::playlist::{PlaylistDescriptor, PlaylistExtractor, Track};
pub use crate::text::html_text;
