//! Shared HTTP client construction
use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::Result;

/// Build the client used for both the playlist page and the media files.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

    if let Some(timeout) = config.request_timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }

    if config.http1_only {
        builder = builder.http1_only();
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_build_client_with_timeout_and_http2() {
        let config = HttpConfig {
            request_timeout_seconds: Some(60),
            http1_only: false,
            ..HttpConfig::default()
        };
        assert!(build_client(&config).is_ok());
    }
}
