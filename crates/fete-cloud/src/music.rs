//! Song catalog search for the playlist screen.
//!
//! Queries the public iTunes Search API and maps results into
//! [`SongSuggestion`] records.  A transport failure or an empty result set
//! substitutes a fixed list of crowd-pleasers instead; a guest asking for a
//! song should always get something to tap, so the fallback is a UX
//! decision, not an error path.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Public iTunes Search API endpoint (no API key required).
pub const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Duration substituted when the catalog does not report one (3 minutes).
const DEFAULT_DURATION_MS: u64 = 180_000;

/// One search result offered to the guest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongSuggestion {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
    /// Artwork URL template with `{w}`/`{h}` size placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TrackResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackResult {
    track_id: Option<i64>,
    track_name: Option<String>,
    artist_name: Option<String>,
    collection_name: Option<String>,
    artwork_url100: Option<String>,
    track_time_millis: Option<u64>,
}

/// Map raw catalog results into suggestions, applying the display defaults.
fn map_results(results: Vec<TrackResult>) -> Vec<SongSuggestion> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, item)| SongSuggestion {
            id: item
                .track_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| index.to_string()),
            title: item.track_name.unwrap_or_else(|| "Unknown Song".to_string()),
            artist: item
                .artist_name
                .unwrap_or_else(|| "Unknown Artist".to_string()),
            album: item
                .collection_name
                .unwrap_or_else(|| "Unknown Album".to_string()),
            duration_ms: item.track_time_millis.unwrap_or(DEFAULT_DURATION_MS),
            artwork_url: item
                .artwork_url100
                .map(|url| url.replace("100x100", "{w}x{h}")),
        })
        .collect()
}

/// The fixed suggestion list used when the catalog is unreachable or empty.
pub fn fallback_suggestions() -> Vec<SongSuggestion> {
    let canned = [
        ("perfect", "Perfect", "Ed Sheeran", "÷ (Divide)", 263_000),
        (
            "thinking-out-loud",
            "Thinking Out Loud",
            "Ed Sheeran",
            "x (Multiply)",
            281_000,
        ),
        (
            "all-of-me",
            "All of Me",
            "John Legend",
            "Love in the Future",
            269_000,
        ),
        (
            "cant-help-myself",
            "Can't Help Myself",
            "Four Tops",
            "Greatest Hits",
            168_000,
        ),
        ("at-last", "At Last", "Etta James", "At Last!", 183_000),
    ];

    canned
        .into_iter()
        .map(|(id, title, artist, album, duration_ms)| SongSuggestion {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration_ms,
            artwork_url: None,
        })
        .collect()
}

/// Render an artwork template at a concrete pixel size.
pub fn artwork_url_sized(template: &str, size: u32) -> String {
    template
        .replace("{w}", &size.to_string())
        .replace("{h}", &size.to_string())
}

/// `m:ss` display label for a track duration.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

/// Song catalog search client.
#[derive(Debug, Clone)]
pub struct MusicSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl MusicSearch {
    pub fn new() -> Self {
        Self::with_endpoint(ITUNES_SEARCH_URL)
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Search the catalog.
    ///
    /// A blank query yields nothing.  Transport failures and empty result
    /// sets both yield [`fallback_suggestions`].
    pub async fn search(&self, query: &str) -> Vec<SongSuggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(results) if !results.is_empty() => results,
            Ok(_) => {
                debug!(query, "no catalog results, using fallback suggestions");
                fallback_suggestions()
            }
            Err(e) => {
                warn!(query, error = %e, "catalog search failed, using fallback suggestions");
                fallback_suggestions()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SongSuggestion>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("term", query),
                ("media", "music"),
                ("entity", "song"),
                ("limit", "10"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        Ok(map_results(body.results))
    }
}

impl Default for MusicSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "resultCount": 2,
        "results": [
            {
                "trackId": 1440857781,
                "trackName": "Perfect",
                "artistName": "Ed Sheeran",
                "collectionName": "÷ (Deluxe)",
                "artworkUrl100": "https://a.example/img/100x100bb.jpg",
                "trackTimeMillis": 263400
            },
            {
                "artistName": "Somebody"
            }
        ]
    }"#;

    #[test]
    fn maps_catalog_results_with_defaults() {
        let body: SearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let suggestions = map_results(body.results);

        assert_eq!(suggestions.len(), 2);

        let first = &suggestions[0];
        assert_eq!(first.id, "1440857781");
        assert_eq!(first.title, "Perfect");
        assert_eq!(
            first.artwork_url.as_deref(),
            Some("https://a.example/img/{w}x{h}bb.jpg")
        );
        assert_eq!(first.duration_ms, 263_400);

        let second = &suggestions[1];
        assert_eq!(second.id, "1");
        assert_eq!(second.title, "Unknown Song");
        assert_eq!(second.album, "Unknown Album");
        assert_eq!(second.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(second.artwork_url, None);
    }

    #[test]
    fn fallback_list_is_fixed_and_nonempty() {
        let suggestions = fallback_suggestions();
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].title, "Perfect");
        assert_eq!(suggestions, fallback_suggestions());
    }

    #[test]
    fn artwork_template_renders_at_size() {
        let url = artwork_url_sized("https://a.example/img/{w}x{h}bb.jpg", 60);
        assert_eq!(url, "https://a.example/img/60x60bb.jpg");
    }

    #[test]
    fn duration_label_pads_seconds() {
        assert_eq!(format_duration(263_400), "4:23");
        assert_eq!(format_duration(180_000), "3:00");
        assert_eq!(format_duration(61_000), "1:01");
    }

    #[tokio::test]
    async fn blank_query_yields_nothing() {
        let search = MusicSearch::new();
        assert!(search.search("   ").await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_catalog_falls_back() {
        // Nothing listens on this port; the request is refused immediately.
        let search = MusicSearch::with_endpoint("http://127.0.0.1:1/search");
        let suggestions = search.search("perfect").await;
        assert_eq!(suggestions, fallback_suggestions());
    }
}
