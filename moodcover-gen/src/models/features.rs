//! Per-track audio descriptors and their selection-wide mean

use serde::{Deserialize, Serialize};

/// Descriptors computed from one preview clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Beats per minute, after tempo correction
    pub tempo: f64,
    /// Mean spectral centroid in Hz (brightness)
    pub spectral_centroid: f64,
    /// Mean spectral bandwidth in Hz (spread)
    pub spectral_bandwidth: f64,
}

/// Arithmetic mean of the features of every analyzed track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateFeatures {
    pub tempo: f64,
    pub spectral_centroid: f64,
    pub spectral_bandwidth: f64,
    /// Number of feature sets averaged (always >= 1)
    pub track_count: usize,
}

impl From<AudioFeatures> for AggregateFeatures {
    fn from(f: AudioFeatures) -> Self {
        Self {
            tempo: f.tempo,
            spectral_centroid: f.spectral_centroid,
            spectral_bandwidth: f.spectral_bandwidth,
            track_count: 1,
        }
    }
}
