//! # moodcover Common Library
//!
//! Shared code for the moodcover crates:
//! - Configuration loading (TOML file + environment)
//! - Track model shared by the catalog clients and the session controller
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{Track, TrackKey};
