use crate::models::EmbedSource;

const WATCH_MARKER: &str = "watch?v=";
const EMBED_MARKER: &str = "embed/";

/// Player URL for a stored watch URL.
///
/// Replaces the first `watch?v=` with `embed/`, case-sensitive. A URL without the marker is
/// returned unchanged.
pub fn embed_url(url: &str) -> String {
    if !url.contains(WATCH_MARKER) {
        log::warn!("video url {url:?} has no `{WATCH_MARKER}`, embedding it unchanged");
    }
    url.replacen(WATCH_MARKER, EMBED_MARKER, 1)
}

/// Embed URL for a video block, or `None` when the block shows nothing
pub fn youtube_embed(url: &str, source: Option<EmbedSource>) -> Option<String> {
    match source {
        Some(EmbedSource::Youtube) if !url.is_empty() => Some(embed_url(url)),
        _ => None,
    }
}
