//! Audio decoding utilities
//!
//! Decodes an audio file to mono f32 PCM at its native sample rate using
//! symphonia (MP3, FLAC, AAC, WAV, OGG, ...).

use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

use crate::error::{CoverError, CoverResult};

/// Decoded audio result
#[derive(Debug)]
pub struct DecodedAudio {
    /// Mono audio samples (f32, range [-1.0, 1.0])
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Original channel count
    pub channels: usize,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode audio file to mono f32 PCM samples
///
/// Multi-channel audio is mixed down by averaging channels. Corrupt
/// packets are skipped; anything that prevents decoding the stream at all
/// (unknown container, no audio track, zero decoded samples) is a
/// `CoverError::Decode`.
pub fn decode_audio_file(file_path: &Path) -> CoverResult<DecodedAudio> {
    tracing::debug!(path = %file_path.display(), "Decoding audio file");

    let file = std::fs::File::open(file_path).map_err(|e| {
        CoverError::Decode(format!("Failed to open audio file {}: {}", file_path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| CoverError::Decode(format!("Unrecognized audio format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| CoverError::Decode("No audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| CoverError::Decode("Sample rate unknown".to_string()))?;
    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| CoverError::Decode(format!("Unsupported codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(CoverError::Decode(format!("Error reading packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_mono(&decoded, &mut samples),
            Err(SymphoniaError::DecodeError(e)) => {
                skipped_packets += 1;
                tracing::trace!(error = %e, "Skipping corrupt packet");
            }
            Err(e) => return Err(CoverError::Decode(format!("Decoder failure: {}", e))),
        }
    }

    if samples.is_empty() {
        return Err(CoverError::Decode("No audio samples decoded".to_string()));
    }

    let audio = DecodedAudio {
        samples,
        sample_rate,
        channels,
    };

    tracing::debug!(
        path = %file_path.display(),
        sample_rate = sample_rate,
        channels = channels,
        skipped_packets = skipped_packets,
        duration_seconds = format!("{:.2}", audio.duration_seconds()),
        "Audio decoding complete"
    );

    Ok(audio)
}

/// Mix a decoded buffer of any sample format down to mono and append it
fn append_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => mix_down(&**buf, out),
        AudioBufferRef::U16(buf) => mix_down(&**buf, out),
        AudioBufferRef::U24(buf) => mix_down(&**buf, out),
        AudioBufferRef::U32(buf) => mix_down(&**buf, out),
        AudioBufferRef::S8(buf) => mix_down(&**buf, out),
        AudioBufferRef::S16(buf) => mix_down(&**buf, out),
        AudioBufferRef::S24(buf) => mix_down(&**buf, out),
        AudioBufferRef::S32(buf) => mix_down(&**buf, out),
        AudioBufferRef::F32(buf) => mix_down(&**buf, out),
        AudioBufferRef::F64(buf) => mix_down(&**buf, out),
    }
}

fn mix_down<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample,
    f32: FromSample<S>,
{
    let channel_count = buf.spec().channels.count();
    if channel_count == 0 {
        return;
    }

    let start = out.len();
    out.resize(start + buf.frames(), 0.0);
    let scale = 1.0 / channel_count as f32;

    for ch in 0..channel_count {
        for (acc, &sample) in out[start..].iter_mut().zip(buf.chan(ch)) {
            *acc += f32::from_sample(sample) * scale;
        }
    }
}
