// crates/learnsync-service/src/providers/youtube.rs
//
// YouTube helpers: URL recognition, video-id extraction, thumbnail URLs,
// and a timed-text transcript client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use learnsync_core::{LearnSyncError, TranscriptSource};

/// Whether a URL points at YouTube (`youtube` or `youtu.be` anywhere in it).
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube") || url.contains("youtu.be")
}

/// Extract the video ID from the common YouTube URL shapes.
///
/// Handles `youtu.be/{id}`, `watch?v={id}`, `/shorts/{id}` and `/embed/{id}`.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");

    if host == "youtu.be" {
        return parsed
            .path_segments()?
            .find(|s| !s.is_empty())
            .map(str::to_string);
    }

    if !host.ends_with("youtube.com") {
        return None;
    }

    if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }

    let mut segments = parsed.path_segments()?;
    match segments.next() {
        Some("shorts") | Some("embed") | Some("live") => segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// High-quality thumbnail URL for a video ID.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// Fetches captions from the YouTube timed-text endpoint.
///
/// Languages are tried in order; the first non-empty track wins.
#[derive(Debug, Clone)]
pub struct YouTubeTranscriptClient {
    client: Client,
    base_url: String,
    languages: Vec<String>,
}

impl YouTubeTranscriptClient {
    pub fn new(
        base_url: &str,
        languages: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, LearnSyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LearnSyncError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            languages,
        })
    }

    async fn fetch_track(&self, video_id: &str, lang: &str) -> Result<String, LearnSyncError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("lang", lang), ("v", video_id)])
            .send()
            .await
            .map_err(|e| LearnSyncError::TranscriptUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(LearnSyncError::TranscriptUnavailable(format!(
                "timedtext returned {} for lang {}",
                resp.status(),
                lang
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| LearnSyncError::TranscriptUnavailable(e.to_string()))?;
        Ok(parse_timedtext(&body))
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptClient {
    async fn fetch_text(&self, url: &str) -> Result<String, LearnSyncError> {
        let video_id = extract_youtube_id(url).ok_or_else(|| {
            LearnSyncError::TranscriptUnavailable(format!("no video id in {}", url))
        })?;

        for lang in &self.languages {
            match self.fetch_track(&video_id, lang).await {
                Ok(text) if !text.is_empty() => return Ok(text),
                Ok(_) => tracing::debug!("No {} transcript for {}", lang, video_id),
                Err(e) => tracing::debug!("Transcript fetch for {} ({}) failed: {}", video_id, lang, e),
            }
        }

        Err(LearnSyncError::TranscriptUnavailable(format!(
            "no transcript for {} in {:?}",
            video_id, self.languages
        )))
    }
}

/// Pull the text of every `<text ...>...</text>` segment, decode entities,
/// and join the segments with single spaces.
pub(crate) fn parse_timedtext(xml: &str) -> String {
    let mut segments = Vec::new();
    let mut rest = xml;

    while let Some(open) = rest.find("<text") {
        let after_open = &rest[open..];
        let Some(tag_end) = after_open.find('>') else {
            break;
        };
        // Self-closing segment carries no text.
        if after_open[..tag_end].ends_with('/') {
            rest = &after_open[tag_end + 1..];
            continue;
        }
        let content = &after_open[tag_end + 1..];
        let Some(close) = content.find("</text>") else {
            break;
        };
        let text = decode_entities(&content[..close]);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            segments.push(text);
        }
        rest = &content[close + "</text>".len()..];
    }

    segments.join(" ")
}

fn decode_entities(s: &str) -> String {
    // Captions are often double-escaped (`&amp;#39;`), so `&amp;` goes first.
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}
