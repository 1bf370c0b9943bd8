//! Selection state owned by the UI controller
//!
//! The state is a plain value: every controller action takes the current
//! state and returns the next one. Nothing else holds or mutates it.

use moodcover_common::{Track, TrackKey};
use serde::Serialize;
use tracing::debug;

/// Candidate list, ordered selection and the past-selections ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Tracks the user can currently pick from (ledger first)
    pub candidates: Vec<Track>,
    /// Selected tracks, in the order the user picked them
    pub selected: Vec<TrackKey>,
    /// Tracks selected under earlier searches, oldest first
    pub past_selections: Vec<Track>,
}

impl SessionState {
    /// Replace the candidate list with fresh search results
    ///
    /// The current selection is first folded into the ledger, and the
    /// ledger is prepended to the new candidates so earlier picks stay
    /// selectable. A result whose identity already sits in the ledger is
    /// not repeated.
    pub fn with_search_results(mut self, results: Vec<Track>) -> Self {
        for key in &self.selected {
            let already_kept = self.past_selections.iter().any(|t| t.matches(key));
            if already_kept {
                continue;
            }
            if let Some(track) = self.candidates.iter().find(|t| t.matches(key)) {
                self.past_selections.push(track.clone());
            }
        }

        let mut candidates = self.past_selections.clone();
        for track in results {
            if self.past_selections.iter().any(|t| t.key() == track.key()) {
                debug!(track = %track.key(), "Search result already in past selections");
                continue;
            }
            candidates.push(track);
        }

        self.candidates = candidates;
        self.selected
            .retain(|key| self.candidates.iter().any(|t| t.matches(key)));
        self
    }

    /// Replace the selection
    ///
    /// Keys that name no current candidate are dropped, as are repeats.
    /// Order follows `keys`.
    pub fn with_selection(mut self, keys: Vec<TrackKey>) -> Self {
        let mut selected: Vec<TrackKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if selected.contains(&key) {
                continue;
            }
            if self.candidates.iter().any(|t| t.matches(&key)) {
                selected.push(key);
            } else {
                debug!(track = %key, "Ignoring selection of unknown track");
            }
        }
        self.selected = selected;
        self
    }

    /// Selected tracks in selection order
    pub fn selected_tracks(&self) -> Vec<&Track> {
        self.selected
            .iter()
            .filter_map(|key| self.candidates.iter().find(|t| t.matches(key)))
            .collect()
    }
}
