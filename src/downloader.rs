//! Single-file downloader with retry on 503 Service Unavailable
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::RetryConfig;
use crate::error::{PlaylistError, Result};
use crate::retry::ExponentialBackoff;

/// Result of one download attempt
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The whole body was written; carries the byte count
    Success(u64),
    /// The server asked us to come back later
    Transient(String),
    /// Retrying cannot help
    Terminal(PlaylistError),
}

/// Downloads files over HTTP, retrying while the server answers 503
#[derive(Clone)]
pub struct Downloader {
    client: Client,
    retry: RetryConfig,
}

impl Downloader {
    pub fn new(client: Client, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    /// Download `url` into `destination`, returning the number of bytes written.
    ///
    /// The file is truncated at the start of every attempt. An error while
    /// copying the body is not retried and leaves the partial file on disk.
    pub async fn download(&self, destination: &Path, url: &str) -> Result<u64> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut backoff = ExponentialBackoff::new(&self.retry);

        for attempt in 1..=max_attempts {
            debug!(attempt, max_attempts, url, "Starting download attempt");

            match self.attempt(destination, url).await {
                AttemptOutcome::Success(bytes) => {
                    if attempt > 1 {
                        info!(attempts = attempt, url, "Download succeeded after retry");
                    }
                    return Ok(bytes);
                }
                AttemptOutcome::Terminal(e) => return Err(e),
                AttemptOutcome::Transient(reason) => {
                    if attempt == max_attempts {
                        break;
                    }
                    let delay = backoff.next_delay();
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "{}, retrying {}",
                        reason,
                        url
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!(attempts = max_attempts, url, "Giving up after repeated 503 responses");
        Err(PlaylistError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    /// Run one attempt and classify its result
    pub async fn attempt(&self, destination: &Path, url: &str) -> AttemptOutcome {
        let mut file = match File::create(destination).await {
            Ok(file) => file,
            Err(source) => {
                return AttemptOutcome::Terminal(PlaylistError::CreateFile {
                    path: destination.to_path_buf(),
                    source,
                })
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return AttemptOutcome::Terminal(e.into()),
        };

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return AttemptOutcome::Transient("503 Service Temporarily Unavailable".to_string());
        }
        if status != StatusCode::OK {
            return AttemptOutcome::Terminal(PlaylistError::status(url, status));
        }

        let mut stream = response.bytes_stream();
        let mut total_size = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return AttemptOutcome::Terminal(e.into()),
            };
            if let Err(e) = file.write_all(&chunk).await {
                return AttemptOutcome::Terminal(e.into());
            }
            total_size += chunk.len() as u64;
        }

        if let Err(e) = file.flush().await {
            return AttemptOutcome::Terminal(e.into());
        }

        AttemptOutcome::Success(total_size)
    }
}
