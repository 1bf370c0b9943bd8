//! Audio Test Fixture Generator
//!
//! In-memory WAV clips with a known pulse, served by the stub upstreams

use std::io::Cursor;

/// Configuration for a generated click track
#[derive(Debug, Clone)]
pub struct ClickTrack {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// Samples between click onsets
    pub interval_samples: usize,
}

impl Default for ClickTrack {
    fn default() -> Self {
        Self {
            duration_seconds: 20.0,
            sample_rate: 22050,
            channels: 1,
            // 22 hops of 512: 60 * (22050 / 512) / 22 = 117.45 BPM
            interval_samples: 22 * 512,
        }
    }
}

impl ClickTrack {
    /// Expected tempo in BPM for this pulse
    pub fn bpm(&self) -> f64 {
        60.0 * self.sample_rate as f64 / self.interval_samples as f64
    }
}

/// 16-bit PCM WAV bytes of short 1 kHz bursts at a fixed interval
pub fn click_track_wav(config: &ClickTrack) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let total = (config.duration_seconds * config.sample_rate as f64) as usize;
    let burst = config.sample_rate as usize / 200; // 5 ms

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..total {
            let offset = i % config.interval_samples;
            let value = if offset < burst {
                let t = offset as f64 / config.sample_rate as f64;
                let decay = 1.0 - offset as f64 / burst as f64;
                0.8 * decay * (2.0 * std::f64::consts::PI * 1000.0 * t).sin()
            } else {
                0.0
            };
            let sample = (value * i16::MAX as f64) as i16;
            for _ in 0..config.channels {
                writer.write_sample(sample).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}
