//! WordPress playlist extraction
//!
//! The `[playlist]` shortcode renders its data as JSON inside
//! `<script type="application/json" class="wp-playlist-script">`. Only the
//! first such block on a page is read.
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlaylistError, Result};

const PLAYLIST_SELECTOR: &str = "script.wp-playlist-script";

/// One playlist entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Media file URL
    pub src: String,
    #[serde(default)]
    pub title: String,
    /// May contain inline HTML
    #[serde(default)]
    pub caption: String,
}

impl Track {
    /// Text used to name the downloaded file: the caption, or the title when
    /// the caption is empty
    pub fn display_caption(&self) -> &str {
        if self.caption.is_empty() {
            &self.title
        } else {
            &self.caption
        }
    }
}

/// Parsed contents of the playlist script block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    /// "audio" or "video"
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tracklist: Option<bool>,
    #[serde(default)]
    pub tracknumbers: Option<bool>,
    #[serde(default)]
    pub images: Option<bool>,
    #[serde(default)]
    pub artists: Option<bool>,
    pub tracks: Vec<Track>,
}

/// Parse an HTML page and decode its playlist descriptor
pub fn parse_playlist(html: &str) -> Result<PlaylistDescriptor> {
    let selector =
        Selector::parse(PLAYLIST_SELECTOR).map_err(|e| PlaylistError::Parse(e.to_string()))?;
    let document = Html::parse_document(html);

    let script = document
        .select(&selector)
        .next()
        .ok_or(PlaylistError::NotFound)?;

    let payload: String = script.text().collect();
    debug!("Found playlist script with {} bytes of JSON", payload.len());

    Ok(serde_json::from_str(&payload)?)
}

/// Fetches pages and extracts their playlists
#[derive(Clone)]
pub struct PlaylistExtractor {
    client: Client,
}

impl PlaylistExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch `page_url` and return its tracks in playlist order
    pub async fn fetch_tracks(&self, page_url: &str) -> Result<Vec<Track>> {
        Ok(self.fetch_descriptor(page_url).await?.tracks)
    }

    /// Fetch `page_url` and return the whole playlist descriptor
    pub async fn fetch_descriptor(&self, page_url: &str) -> Result<PlaylistDescriptor> {
        info!("📄 Fetching playlist page: {}", page_url);

        let response = self.client.get(page_url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(PlaylistError::status(page_url, response.status()));
        }

        let html_content = response.text().await?;
        debug!("📄 Downloaded {} characters of HTML content", html_content.len());

        let descriptor = parse_playlist(&html_content)?;
        info!("🎵 Found {} tracks on the page", descriptor.tracks.len());
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SINGLE_TRACK_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="wp-playlist wp-audio-playlist">
<script type="application/json" class="wp-playlist-script">{"tracks":[{"src":"http://x/1.mp3","title":"T1","caption":""}]}</script>
</div>
</body></html>"#;

    #[test]
    fn test_parse_single_track() {
        let descriptor = parse_playlist(SINGLE_TRACK_PAGE).unwrap();
        assert_eq!(descriptor.tracks.len(), 1);

        let track = &descriptor.tracks[0];
        assert_eq!(track.src, "http://x/1.mp3");
        assert_eq!(track.display_caption(), "T1");
    }

    #[test]
    fn test_parse_full_wordpress_descriptor() {
        let html = r#"<html><body>
<script type="application/json" class="wp-playlist-script">{
  "type": "audio", "tracklist": true, "tracknumbers": true, "images": true, "artists": true,
  "tracks": [
    {"src": "https://example.com/a.mp3", "type": "audio/mpeg", "title": "A",
     "caption": "<em>First</em>", "description": "", "meta": {"length_formatted": "3:01"},
     "image": {"src": "https://example.com/a.png", "width": 48, "height": 64}},
    {"src": "https://example.com/b.ogg", "title": "B"}
  ]
}</script>
<script class="wp-playlist-script">{"tracks":[{"src":"https://example.com/ignored.mp3"}]}</script>
</body></html>"#;

        let descriptor = parse_playlist(html).unwrap();
        assert_eq!(descriptor.kind.as_deref(), Some("audio"));
        assert_eq!(descriptor.tracklist, Some(true));
        assert_eq!(descriptor.tracks.len(), 2);
        assert_eq!(descriptor.tracks[0].caption, "<em>First</em>");
        assert_eq!(descriptor.tracks[1].src, "https://example.com/b.ogg");
        assert_eq!(descriptor.tracks[1].caption, "");
        assert_eq!(descriptor.tracks[1].display_caption(), "B");
    }

    #[test]
    fn test_missing_playlist_is_not_found() {
        let html = r#"<html><body><script class="other">{"tracks":[]}</script></body></html>"#;
        assert!(matches!(parse_playlist(html), Err(PlaylistError::NotFound)));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let html = r#"<script class="wp-playlist-script">{"tracks": [</script>"#;
        assert!(matches!(parse_playlist(html), Err(PlaylistError::Decode(_))));
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let no_tracks = r#"<script class="wp-playlist-script">{"type":"audio"}</script>"#;
        assert!(matches!(parse_playlist(no_tracks), Err(PlaylistError::Decode(_))));

        let no_src = r#"<script class="wp-playlist-script">{"tracks":[{"title":"T"}]}</script>"#;
        assert!(matches!(parse_playlist(no_src), Err(PlaylistError::Decode(_))));

        let not_array = r#"<script class="wp-playlist-script">{"tracks":{"src":"x"}}</script>"#;
        assert!(matches!(parse_playlist(not_array), Err(PlaylistError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_tracks_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlist/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SINGLE_TRACK_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let extractor = PlaylistExtractor::new(Client::new());
        let tracks = extractor
            .fetch_tracks(&format!("{}/playlist/", server.uri()))
            .await
            .unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "T1");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = PlaylistExtractor::new(Client::new());
        let err = extractor
            .fetch_tracks(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();

        match err {
            PlaylistError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_fetch_error() {
        let extractor = PlaylistExtractor::new(Client::new());
        let err = extractor
            .fetch_tracks("http://127.0.0.1:1/playlist")
            .await
            .unwrap_err();
        assert!(matches!(err, PlaylistError::Fetch(_)));
    }
}
