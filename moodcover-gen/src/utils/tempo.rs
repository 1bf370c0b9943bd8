//! Tempo estimation
//!
//! 1. Onset strength: positive log-power spectral flux averaged over bins.
//! 2. Autocorrelation of the onset envelope over lags up to 8 seconds.
//! 3. Each lag is scored by `ln(1 + 1e6 * ac)` plus a log-normal prior on
//!    BPM centred at 120 with a one-octave deviation; the best lag wins.

use crate::utils::spectral::Spectrogram;

/// Prior centre in BPM
const START_BPM: f64 = 120.0;
/// Prior deviation in octaves
const STD_BPM: f64 = 1.0;
/// Fastest tempo considered
const MAX_TEMPO: f64 = 320.0;
/// Longest autocorrelation lag, in seconds
const AC_SIZE_SECONDS: f64 = 8.0;
/// Dynamic range kept by the dB conversion
const TOP_DB: f32 = 80.0;

/// Onset strength per frame (first frame is 0)
pub fn onset_envelope(spec: &Spectrogram) -> Vec<f64> {
    if spec.is_empty() {
        return Vec::new();
    }

    let to_db = |m: f32| 10.0 * (m * m).max(1e-10).log10();
    let peak_db = spec
        .frames
        .iter()
        .flat_map(|frame| frame.iter())
        .map(|&m| to_db(m))
        .fold(f32::NEG_INFINITY, f32::max);
    let floor_db = peak_db - TOP_DB;

    let db_frames: Vec<Vec<f32>> = spec
        .frames
        .iter()
        .map(|frame| frame.iter().map(|&m| to_db(m).max(floor_db)).collect())
        .collect();

    let mut envelope = Vec::with_capacity(db_frames.len());
    envelope.push(0.0);
    for pair in db_frames.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let flux: f64 = prev
            .iter()
            .zip(curr)
            .map(|(&p, &c)| (c - p).max(0.0) as f64)
            .sum();
        envelope.push(flux / curr.len() as f64);
    }

    envelope
}

/// Estimated tempo in BPM; 0.0 when the envelope carries no onsets
pub fn estimate_tempo(envelope: &[f64], frame_rate: f64) -> f64 {
    let energy: f64 = envelope.iter().map(|v| v * v).sum();
    if envelope.len() < 2 || energy <= f64::MIN_POSITIVE {
        return 0.0;
    }

    let min_lag = ((frame_rate * 60.0 / MAX_TEMPO).ceil() as usize).max(1);
    let max_lag = ((AC_SIZE_SECONDS * frame_rate).round() as usize).min(envelope.len() - 1);
    if min_lag > max_lag {
        return 0.0;
    }

    let mut best: Option<(usize, f64)> = None;
    for lag in min_lag..=max_lag {
        let ac: f64 = envelope[..envelope.len() - lag]
            .iter()
            .zip(&envelope[lag..])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / energy;

        let bpm = 60.0 * frame_rate / lag as f64;
        let log_prior = -0.5 * ((bpm.log2() - START_BPM.log2()) / STD_BPM).powi(2);
        let strength = (1e6 * ac.max(0.0)).ln_1p() + log_prior;

        if best.map_or(true, |(_, s)| strength > s) {
            best = Some((lag, strength));
        }
    }

    best.map(|(lag, _)| 60.0 * frame_rate / lag as f64)
        .unwrap_or(0.0)
}
