//! Utility modules for moodcover-gen

pub mod audio_decoder;
pub mod spectral;
pub mod tempo;

pub use audio_decoder::{decode_audio_file, DecodedAudio};
