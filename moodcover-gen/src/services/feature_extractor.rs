//! Feature extractor
//!
//! Downloads a preview clip, stages it in a temporary file, decodes it and
//! computes tempo, spectral centroid and spectral bandwidth.
//!
//! The temporary file is a `tempfile::NamedTempFile` owned by the blocking
//! analysis task; it is deleted when that task finishes, whether decoding
//! and analysis succeed or fail.

use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::{CoverError, CoverResult};
use crate::models::{AudioFeatures, TempoCorrection};
use crate::types::FeatureAnalyzer;
use crate::utils::audio_decoder::decode_audio_file;
use crate::utils::spectral::{
    mean, spectral_bandwidth, spectral_centroid, Spectrogram, HOP_LENGTH, N_FFT,
};
use crate::utils::tempo::{estimate_tempo, onset_envelope};

const USER_AGENT: &str = concat!("moodcover/", env!("CARGO_PKG_VERSION"));

/// Compute descriptors from mono samples
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    tempo_correction: TempoCorrection,
) -> AudioFeatures {
    let spec = Spectrogram::compute(samples, sample_rate, N_FFT, HOP_LENGTH);

    let detected_tempo = estimate_tempo(&onset_envelope(&spec), spec.frame_rate());
    let tempo = tempo_correction.apply(detected_tempo);

    let centroids = spectral_centroid(&spec);
    let bandwidths = spectral_bandwidth(&spec, &centroids);

    let features = AudioFeatures {
        tempo,
        spectral_centroid: mean(&centroids),
        spectral_bandwidth: mean(&bandwidths),
    };

    tracing::debug!(
        detected_tempo = format!("{:.1}", detected_tempo),
        tempo = format!("{:.1}", features.tempo),
        centroid = format!("{:.0}", features.spectral_centroid),
        bandwidth = format!("{:.0}", features.spectral_bandwidth),
        "Audio features computed"
    );

    features
}

/// Decode and analyze an audio file already on disk
pub fn analyze_file(path: &Path, tempo_correction: TempoCorrection) -> CoverResult<AudioFeatures> {
    let audio = decode_audio_file(path)?;
    Ok(analyze_samples(&audio.samples, audio.sample_rate, tempo_correction))
}

/// Preview downloader + analyzer
pub struct FeatureExtractor {
    http_client: reqwest::Client,
    tempo_correction: TempoCorrection,
}

impl FeatureExtractor {
    pub fn new(tempo_correction: TempoCorrection) -> CoverResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CoverError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            tempo_correction,
        })
    }

    async fn download(&self, url: &str) -> CoverResult<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CoverError::Download(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoverError::Download(format!(
                "{} returned {}",
                url,
                status.as_u16()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoverError::Download(format!("{}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}

/// Write `bytes` to a fresh temporary file named with a format hint
fn stage_temp_file(bytes: &[u8]) -> CoverResult<tempfile::NamedTempFile> {
    let extension = infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Audio)
        .map(|kind| kind.extension())
        .unwrap_or("mp3");

    let stage = || -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("moodcover-preview-")
            .suffix(&format!(".{}", extension))
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(file)
    };

    stage().map_err(|e| CoverError::Download(format!("Failed to stage preview: {}", e)))
}

#[async_trait]
impl FeatureAnalyzer for FeatureExtractor {
    async fn analyze(&self, preview_url: &str) -> CoverResult<AudioFeatures> {
        tracing::debug!(url = %preview_url, "Downloading preview");
        let bytes = self.download(preview_url).await?;
        let temp_file = stage_temp_file(&bytes)?;
        let correction = self.tempo_correction;

        let features = tokio::task::spawn_blocking(move || {
            let result = analyze_file(temp_file.path(), correction);
            drop(temp_file);
            result
        })
        .await
        .map_err(|e| CoverError::Decode(format!("Analysis task failed: {}", e)))??;

        tracing::info!(
            url = %preview_url,
            tempo = format!("{:.1}", features.tempo),
            centroid = format!("{:.0}", features.spectral_centroid),
            bandwidth = format!("{:.0}", features.spectral_bandwidth),
            "Preview analyzed"
        );

        Ok(features)
    }
}
