//! Data models for moodcover-gen
//!
//! - Audio features and their aggregate
//! - Analysis profile (thresholds, search behavior)
//! - Prompt style and cover color
//! - Session state owned by the UI controller

pub mod features;
pub mod profile;
pub mod session;
pub mod style;

pub use features::{AggregateFeatures, AudioFeatures};
pub use profile::{AnalysisProfile, TempoCorrection};
pub use session::SessionState;
pub use style::{CoverColor, PromptStyle};
