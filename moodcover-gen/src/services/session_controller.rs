//! Session controller
//!
//! Drives the search → select → generate flow. Every action takes the
//! current `SessionState` and hands back the next one; the controller itself
//! only holds the service handles and the analysis profile.

use moodcover_common::TrackKey;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{CoverError, CoverResult};
use crate::models::{AggregateFeatures, AnalysisProfile, CoverColor, PromptStyle, SessionState};
use crate::services::aggregator::aggregate;
use crate::services::image_client::detect_content_type;
use crate::services::prompt_synthesizer::synthesize;
use crate::services::track_search::{search_tracks, SearchOptions};
use crate::types::{FeatureAnalyzer, ImageGenerator, PreviewCatalog, TrackCatalog};

/// Result of a successful generate action
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCover {
    pub prompt: String,
    #[serde(skip)]
    pub image: Vec<u8>,
    pub content_type: &'static str,
    pub features: AggregateFeatures,
    /// Tracks whose features went into the aggregate, in selection order
    pub analyzed: Vec<TrackKey>,
    /// Selected tracks left out (no preview, or analysis failed)
    pub skipped: Vec<TrackKey>,
}

/// Service handles shared by all actions
pub struct SessionController {
    catalog: Arc<dyn TrackCatalog>,
    previews: Arc<dyn PreviewCatalog>,
    analyzer: Arc<dyn FeatureAnalyzer>,
    generator: Arc<dyn ImageGenerator>,
    profile: AnalysisProfile,
}

impl SessionController {
    pub fn new(
        catalog: Arc<dyn TrackCatalog>,
        previews: Arc<dyn PreviewCatalog>,
        analyzer: Arc<dyn FeatureAnalyzer>,
        generator: Arc<dyn ImageGenerator>,
        profile: AnalysisProfile,
    ) -> Self {
        Self {
            catalog,
            previews,
            analyzer,
            generator,
            profile,
        }
    }

    pub fn profile(&self) -> &AnalysisProfile {
        &self.profile
    }

    /// Run a search and fold its results into the state
    pub async fn search(&self, state: SessionState, query: &str) -> CoverResult<SessionState> {
        let options = SearchOptions {
            result_limit: self.profile.result_limit,
            deduplicate: self.profile.deduplicate,
        };
        let results =
            search_tracks(self.catalog.as_ref(), self.previews.as_ref(), query, options).await?;
        Ok(state.with_search_results(results))
    }

    /// Replace the selection
    pub fn select(&self, state: SessionState, keys: Vec<TrackKey>) -> SessionState {
        let next = state.with_selection(keys);
        tracing::info!(selected = next.selected.len(), "Selection updated");
        next
    }

    /// Analyze the selection and request a cover image
    ///
    /// Tracks are analyzed one at a time in selection order. Tracks without
    /// a preview, or whose analysis fails, are reported in `skipped`. The
    /// image generator is only called when at least one track produced
    /// features.
    pub async fn generate(
        &self,
        state: &SessionState,
        style: PromptStyle,
        color: &CoverColor,
    ) -> CoverResult<GeneratedCover> {
        let mut features = Vec::new();
        let mut analyzed = Vec::new();
        let mut skipped = Vec::new();

        for track in state.selected_tracks() {
            let url = match track.preview_url.as_deref().filter(|_| track.has_preview()) {
                Some(url) => url,
                None => {
                    tracing::debug!(track = %track.key(), "No preview, skipping");
                    skipped.push(track.key());
                    continue;
                }
            };

            match self.analyzer.analyze(url).await {
                Ok(f) => {
                    features.push(f);
                    analyzed.push(track.key());
                }
                Err(e) => {
                    tracing::warn!(track = %track.key(), error = %e, "Feature extraction failed");
                    skipped.push(track.key());
                }
            }
        }

        let aggregate = aggregate(&features).ok_or(CoverError::EmptySelection)?;
        let prompt = synthesize(&aggregate, style, color, &self.profile);

        tracing::info!(
            analyzed = analyzed.len(),
            skipped = skipped.len(),
            style = %style,
            color = %color,
            tempo = format!("{:.1}", aggregate.tempo),
            "Prompt synthesized"
        );
        tracing::debug!(prompt = %prompt, "Generation prompt");

        let image = self.generator.generate(&prompt).await?;
        let content_type = detect_content_type(&image);

        Ok(GeneratedCover {
            prompt,
            image,
            content_type,
            features: aggregate,
            analyzed,
            skipped,
        })
    }
}
