//! Track search: catalog query plus per-track preview resolution

use moodcover_common::Track;
use std::collections::HashSet;

use crate::error::{CoverError, CoverResult};
use crate::services::preview_resolver::resolve_preview;
use crate::types::{PreviewCatalog, TrackCatalog};

/// Search-time options taken from the analysis profile
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub result_limit: u32,
    pub deduplicate: bool,
}

/// Candidate tracks for `query`
///
/// Previews are resolved one track at a time; a failed resolution leaves
/// that track without a preview. With `deduplicate`, later tracks whose
/// (title, artist) repeats an earlier one in the same batch are dropped.
pub async fn search_tracks(
    catalog: &dyn TrackCatalog,
    previews: &dyn PreviewCatalog,
    query: &str,
    options: SearchOptions,
) -> CoverResult<Vec<Track>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CoverError::InvalidInput("Search query is empty".to_string()));
    }

    let found = catalog.search_tracks(query, options.result_limit).await?;

    let mut seen = HashSet::new();
    let mut tracks = Vec::with_capacity(found.len());

    for item in found.into_iter().take(options.result_limit as usize) {
        if options.deduplicate && !seen.insert((item.title.clone(), item.artist.clone())) {
            tracing::debug!(title = %item.title, artist = %item.artist, "Dropping duplicate result");
            continue;
        }

        let preview_url = resolve_preview(previews, &item.title, &item.artist).await;
        tracks.push(Track {
            title: item.title,
            artist: item.artist,
            artwork_url: item.artwork_url,
            preview_url,
        });
    }

    let with_preview = tracks.iter().filter(|t| t.has_preview()).count();
    tracing::info!(
        query = %query,
        results = tracks.len(),
        with_preview = with_preview,
        "Track search complete"
    );

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogTrack, PreviewCandidate};
    use async_trait::async_trait;

    struct FixedCatalog(Vec<CatalogTrack>);

    #[async_trait]
    impl TrackCatalog for FixedCatalog {
        async fn search_tracks(&self, _query: &str, _limit: u32) -> CoverResult<Vec<CatalogTrack>> {
            Ok(self.0.clone())
        }
    }

    /// Previews only for titles starting with "P"
    struct PrefixPreviews;

    #[async_trait]
    impl PreviewCatalog for PrefixPreviews {
        async fn search_previews(&self, query: &str) -> CoverResult<Vec<PreviewCandidate>> {
            if !query.starts_with('P') {
                return Ok(vec![]);
            }
            let (title, artist) = query.split_once(' ').unwrap_or((query, ""));
            Ok(vec![PreviewCandidate {
                title: title.to_string(),
                artist: artist.to_string(),
                preview_url: Some(format!("https://cdn/{}.mp3", title)),
            }])
        }
    }

    fn item(title: &str, artist: &str) -> CatalogTrack {
        CatalogTrack {
            title: title.to_string(),
            artist: artist.to_string(),
            artwork_url: None,
        }
    }

    fn options(deduplicate: bool) -> SearchOptions {
        SearchOptions {
            result_limit: 6,
            deduplicate,
        }
    }

    #[tokio::test]
    async fn test_duplicates_collapse_when_enabled() {
        let catalog = FixedCatalog(vec![item("Pa", "x"), item("Pa", "x"), item("Qb", "y")]);
        let tracks = search_tracks(&catalog, &PrefixPreviews, "q", options(true))
            .await
            .unwrap();
        assert_eq!(tracks.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicates_kept_when_disabled() {
        let catalog = FixedCatalog(vec![item("Pa", "x"), item("Pa", "x"), item("Qb", "y")]);
        let tracks = search_tracks(&catalog, &PrefixPreviews, "q", options(false))
            .await
            .unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_preview_does_not_abort_search() {
        let catalog = FixedCatalog(vec![item("Pa", "x"), item("Qb", "y")]);
        let tracks = search_tracks(&catalog, &PrefixPreviews, "q", options(true))
            .await
            .unwrap();

        assert_eq!(tracks[0].preview_url.as_deref(), Some("https://cdn/Pa.mp3"));
        assert!(tracks[1].preview_url.is_none());
    }

    #[tokio::test]
    async fn test_result_limit_enforced() {
        let catalog = FixedCatalog((0..10).map(|i| item(&format!("T{}", i), "a")).collect());
        let tracks = search_tracks(
            &catalog,
            &PrefixPreviews,
            "q",
            SearchOptions {
                result_limit: 5,
                deduplicate: false,
            },
        )
        .await
        .unwrap();
        assert_eq!(tracks.len(), 5);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let catalog = FixedCatalog(vec![]);
        let err = search_tracks(&catalog, &PrefixPreviews, "  ", options(true))
            .await
            .unwrap_err();
        assert!(matches!(err, CoverError::InvalidInput(_)));
    }
}
