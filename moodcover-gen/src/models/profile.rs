//! Analysis profile
//!
//! Two configurations of the same flow are supported as presets:
//!
//! | preset     | tempo correction | result limit | de-duplicate |
//! |------------|------------------|--------------|--------------|
//! | `classic`  | none             | 5            | no           |
//! | `extended` | halve > 170 BPM  | 6            | yes          |
//!
//! They also differ in the band boundaries used by the prompt synthesizer.
//! Boundaries are descending: a value falls in the first band whose
//! boundary it strictly exceeds, or in the last band otherwise.

use serde::Serialize;

use crate::error::{CoverError, CoverResult};

/// Number of tempo (energy) bands
pub const TEMPO_BANDS: usize = 5;
/// Number of centroid (brightness) bands
pub const CENTROID_BANDS: usize = 4;
/// Number of bandwidth (dynamics) bands
pub const BANDWIDTH_BANDS: usize = 4;

/// Correction applied to detected tempo
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "threshold", rename_all = "snake_case")]
pub enum TempoCorrection {
    /// Keep the detected tempo
    Disabled,
    /// Halve tempos strictly above the threshold (double-time detection)
    HalveAbove(f64),
}

impl TempoCorrection {
    pub fn apply(&self, bpm: f64) -> f64 {
        match *self {
            TempoCorrection::Disabled => bpm,
            TempoCorrection::HalveAbove(threshold) if bpm > threshold => bpm / 2.0,
            TempoCorrection::HalveAbove(_) => bpm,
        }
    }
}

/// Thresholds and search behavior for one configuration of the flow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisProfile {
    pub name: String,
    pub tempo_correction: TempoCorrection,
    pub tempo_bands: [f64; TEMPO_BANDS - 1],
    pub centroid_bands: [f64; CENTROID_BANDS - 1],
    pub bandwidth_bands: [f64; BANDWIDTH_BANDS - 1],
    /// Catalog results requested per search
    pub result_limit: u32,
    /// Collapse identical (title, artist) pairs within one result batch
    pub deduplicate: bool,
}

impl AnalysisProfile {
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            tempo_correction: TempoCorrection::Disabled,
            tempo_bands: [150.0, 130.0, 110.0, 90.0],
            centroid_bands: [3500.0, 2800.0, 2000.0],
            bandwidth_bands: [4500.0, 3200.0, 2500.0],
            result_limit: 5,
            deduplicate: false,
        }
    }

    pub fn extended() -> Self {
        Self {
            name: "extended".to_string(),
            tempo_correction: TempoCorrection::HalveAbove(170.0),
            tempo_bands: [160.0, 135.0, 110.0, 85.0],
            centroid_bands: [3000.0, 2500.0, 1800.0],
            bandwidth_bands: [4000.0, 3000.0, 2200.0],
            result_limit: 6,
            deduplicate: true,
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> CoverResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::classic()),
            "extended" => Ok(Self::extended()),
            other => Err(CoverError::Config(format!(
                "Unknown analysis profile '{}' (expected 'classic' or 'extended')",
                other
            ))),
        }
    }

    /// Check boundary ordering and search limits
    pub fn validate(&self) -> CoverResult<()> {
        check_descending("tempo_bands", &self.tempo_bands)?;
        check_descending("centroid_bands", &self.centroid_bands)?;
        check_descending("bandwidth_bands", &self.bandwidth_bands)?;

        if let TempoCorrection::HalveAbove(threshold) = self.tempo_correction {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(CoverError::Config(format!(
                    "tempo_correction_threshold must be a positive number, got {}",
                    threshold
                )));
            }
        }

        if self.result_limit == 0 || self.result_limit > 50 {
            return Err(CoverError::Config(format!(
                "result_limit must be 1-50, got {}",
                self.result_limit
            )));
        }

        Ok(())
    }

    pub fn tempo_band(&self, bpm: f64) -> usize {
        band_index(bpm, &self.tempo_bands)
    }

    pub fn centroid_band(&self, hz: f64) -> usize {
        band_index(hz, &self.centroid_bands)
    }

    pub fn bandwidth_band(&self, hz: f64) -> usize {
        band_index(hz, &self.bandwidth_bands)
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self::classic()
    }
}

/// Index of the first boundary `value` strictly exceeds; `bounds.len()` if none
fn band_index(value: f64, bounds: &[f64]) -> usize {
    bounds
        .iter()
        .position(|&bound| value > bound)
        .unwrap_or(bounds.len())
}

fn check_descending(field: &str, bounds: &[f64]) -> CoverResult<()> {
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(CoverError::Config(format!("{} must be finite", field)));
    }
    if bounds.windows(2).any(|w| w[0] <= w[1]) {
        return Err(CoverError::Config(format!(
            "{} must be strictly descending, got {:?}",
            field, bounds
        )));
    }
    Ok(())
}
