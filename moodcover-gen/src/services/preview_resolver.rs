//! Preview resolution
//!
//! Looks a (title, artist) pair up in the preview catalog and returns the
//! best-matching clip locator. Every failure degrades to "no preview".

use crate::services::fuzzy_matcher;
use crate::types::PreviewCatalog;

/// Preview locator for a song, or `None` when unavailable
pub async fn resolve_preview(
    catalog: &dyn PreviewCatalog,
    title: &str,
    artist: &str,
) -> Option<String> {
    let query = format!("{} {}", title, artist);

    let candidates = match catalog.search_previews(&query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(title = %title, artist = %artist, error = %e, "Preview lookup failed");
            return None;
        }
    };

    if candidates.is_empty() {
        tracing::debug!(title = %title, artist = %artist, "No preview candidates");
        return None;
    }

    let Some(best) = fuzzy_matcher::best_match(title, artist, &candidates) else {
        tracing::debug!(title = %title, artist = %artist, "No candidate resembles the track");
        return None;
    };
    tracing::debug!(
        title = %title,
        artist = %artist,
        matched_title = %best.candidate.title,
        matched_artist = %best.candidate.artist,
        score = best.score,
        "Resolved preview candidate"
    );

    best.candidate.preview_url.clone()
}
