//! Test Helper Utilities
//!
//! Shared utilities for testing moodcover-gen

#![allow(dead_code)]

pub mod audio_generator;
pub mod stub_server;

pub use audio_generator::{click_track_wav, ClickTrack};
pub use stub_server::{preview_temp_files, spawn_stub};
