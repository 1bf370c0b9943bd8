//! Feature aggregation across the selection

use crate::models::{AggregateFeatures, AudioFeatures};

/// Unweighted per-field mean; `None` when there is nothing to average
pub fn aggregate(features: &[AudioFeatures]) -> Option<AggregateFeatures> {
    if features.is_empty() {
        return None;
    }

    let count = features.len() as f64;
    let (tempo, centroid, bandwidth) = features.iter().fold((0.0, 0.0, 0.0), |acc, f| {
        (
            acc.0 + f.tempo,
            acc.1 + f.spectral_centroid,
            acc.2 + f.spectral_bandwidth,
        )
    });

    Some(AggregateFeatures {
        tempo: tempo / count,
        spectral_centroid: centroid / count,
        spectral_bandwidth: bandwidth / count,
        track_count: features.len(),
    })
}
