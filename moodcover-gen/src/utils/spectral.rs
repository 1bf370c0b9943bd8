//! Short-time spectral analysis
//!
//! Centered STFT with a periodic Hann window. Frames are zero-padded by
//! `n_fft / 2` on both ends so frame `t` is centred on sample `t * hop`.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// Default FFT size
pub const N_FFT: usize = 2048;
/// Default hop between frames
pub const HOP_LENGTH: usize = 512;

/// Magnitude spectrogram (`frames x (n_fft / 2 + 1)` bins)
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<f32>>,
    pub sample_rate: u32,
    pub n_fft: usize,
    pub hop_length: usize,
}

impl Spectrogram {
    pub fn compute(samples: &[f32], sample_rate: u32, n_fft: usize, hop_length: usize) -> Self {
        let half = n_fft / 2;
        let frame_count = if samples.is_empty() {
            0
        } else {
            1 + samples.len() / hop_length
        };

        let window: Vec<f32> = (0..n_fft).map(|n| hann_window(n, n_fft)).collect();
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n_fft);
        let mut buffer = vec![Complex::new(0.0f32, 0.0); n_fft];

        let mut frames = Vec::with_capacity(frame_count);
        for t in 0..frame_count {
            let centre = t * hop_length;
            for (n, slot) in buffer.iter_mut().enumerate() {
                // Position in the unpadded signal
                let sample = (centre + n)
                    .checked_sub(half)
                    .and_then(|i| samples.get(i))
                    .copied()
                    .unwrap_or(0.0);
                *slot = Complex::new(sample * window[n], 0.0);
            }

            fft.process(&mut buffer);
            frames.push(buffer[..=half].iter().map(|c| c.norm()).collect());
        }

        Self {
            frames,
            sample_rate,
            n_fft,
            hop_length,
        }
    }

    /// Centre frequency of bin `k` in Hz
    pub fn bin_frequency(&self, k: usize) -> f64 {
        k as f64 * self.sample_rate as f64 / self.n_fft as f64
    }

    /// Frames per second
    pub fn frame_rate(&self) -> f64 {
        self.sample_rate as f64 / self.hop_length as f64
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Periodic Hann window value at `index`
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 - 0.5 * ((2.0 * PI * index as f32) / size as f32).cos()
}

/// Per-frame spectral centroid in Hz (0 for silent frames)
pub fn spectral_centroid(spec: &Spectrogram) -> Vec<f64> {
    spec.frames
        .iter()
        .map(|frame| {
            let total: f64 = frame.iter().map(|&m| m as f64).sum();
            if total <= f64::MIN_POSITIVE {
                return 0.0;
            }
            frame
                .iter()
                .enumerate()
                .map(|(k, &m)| spec.bin_frequency(k) * m as f64)
                .sum::<f64>()
                / total
        })
        .collect()
}

/// Per-frame spectral bandwidth in Hz around the given centroids
///
/// `sqrt(sum p_k * (f_k - centroid)^2)` with `p` the frame magnitudes
/// normalized to sum to one; 0 for silent frames.
pub fn spectral_bandwidth(spec: &Spectrogram, centroids: &[f64]) -> Vec<f64> {
    spec.frames
        .iter()
        .zip(centroids)
        .map(|(frame, &centroid)| {
            let total: f64 = frame.iter().map(|&m| m as f64).sum();
            if total <= f64::MIN_POSITIVE {
                return 0.0;
            }
            let spread: f64 = frame
                .iter()
                .enumerate()
                .map(|(k, &m)| {
                    let deviation = spec.bin_frequency(k) - centroid;
                    (m as f64 / total) * deviation * deviation
                })
                .sum();
            spread.sqrt()
        })
        .collect()
}

/// Arithmetic mean (0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
