//! Service modules for the cover-generation flow
//!
//! - Catalog clients: Spotify (track search), Deezer (previews)
//! - Audio analysis: feature extraction and aggregation
//! - Prompt synthesis and the image generation client
//! - Session controller driving search, selection and generation

pub mod aggregator;
pub mod deezer_client;
pub mod feature_extractor;
pub mod fuzzy_matcher;
pub mod image_client;
pub mod preview_resolver;
pub mod prompt_synthesizer;
pub mod session_controller;
pub mod spotify_client;
pub mod track_search;

pub use deezer_client::DeezerClient;
pub use feature_extractor::FeatureExtractor;
pub use image_client::HuggingFaceClient;
pub use session_controller::{GeneratedCover, SessionController};
pub use spotify_client::{SpotifyClient, SpotifyEndpoints};
