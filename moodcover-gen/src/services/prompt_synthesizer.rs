//! Prompt synthesis
//!
//! Maps aggregate features through the profile's band tables into fixed
//! descriptive fragments, then appends the style paragraph and a color
//! gradient instruction. Pure and deterministic.

use crate::models::profile::{BANDWIDTH_BANDS, CENTROID_BANDS, TEMPO_BANDS};
use crate::models::{AggregateFeatures, AnalysisProfile, CoverColor, PromptStyle};

pub const PREAMBLE: &str = "A playlist cover reflecting the overall musical vibe:";

/// Energy fragments, fastest band first
pub const TEMPO_FRAGMENTS: [&str; TEMPO_BANDS] = [
    "A very fast and high-energy track, often found in intense rock or electronic music.",
    "A fast and energetic rhythm, commonly heard in rock, punk, and dance music.",
    "A moderately fast tempo, giving a vibrant and lively feel.",
    "A balanced rhythm with a relaxed yet engaging pace.",
    "A slow and soothing track with a calm and peaceful atmosphere.",
];

/// Brightness fragments, brightest band first
pub const CENTROID_FRAGMENTS: [&str; CENTROID_BANDS] = [
    "A bright and sharp sound, often associated with high-energy rock and metal.",
    "A slightly bright yet warm tone, commonly found in pop rock and alternative music.",
    "A well-balanced sound with a mix of warmth and clarity.",
    "A deep and mellow tone, often associated with acoustic and jazz music.",
];

/// Dynamics fragments, widest band first
pub const BANDWIDTH_FRAGMENTS: [&str; BANDWIDTH_BANDS] = [
    "A highly dynamic and expressive sound with a wide frequency range.",
    "A vibrant and energetic texture, often found in rock and upbeat tracks.",
    "A smooth and clear sound with a mix of mellow and bright elements.",
    "A soft and warm sound with subtle variations, ideal for calm and acoustic music.",
];

/// Canned instruction for each visual style
pub fn style_paragraph(style: PromptStyle) -> &'static str {
    match style {
        PromptStyle::Color => {
            "Render the cover as a pure color composition: no people, no objects and no \
             text, only soft fields of color flowing into each other."
        }
        PromptStyle::Character => {
            "Show a single stylized character whose pose and expression embody this mood, \
             framed like an album cover portrait, with no text."
        }
        PromptStyle::Landscape => {
            "Depict a wide landscape whose light, weather and terrain express this mood, \
             seen from a distance, with no people and no text."
        }
        PromptStyle::Abstract => {
            "Use abstract shapes, lines and textures whose rhythm and density follow the \
             music, arranged as a balanced square composition with no text."
        }
    }
}

/// Gradient instruction built around the chosen color
pub fn color_instruction(color: &CoverColor) -> String {
    format!(
        "Build the palette as a smooth gradient based on {color}, moving from lighter \
         tints to deeper shades of {color}."
    )
}

/// Full text prompt
pub fn synthesize(
    features: &AggregateFeatures,
    style: PromptStyle,
    color: &CoverColor,
    profile: &AnalysisProfile,
) -> String {
    let energy = TEMPO_FRAGMENTS[profile.tempo_band(features.tempo)];
    let brightness = CENTROID_FRAGMENTS[profile.centroid_band(features.spectral_centroid)];
    let dynamics = BANDWIDTH_FRAGMENTS[profile.bandwidth_band(features.spectral_bandwidth)];

    [
        PREAMBLE,
        energy,
        brightness,
        dynamics,
        style_paragraph(style),
        &color_instruction(color),
    ]
    .join(" ")
}
