//! Visual style and color chosen by the user for the cover

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoverError;

/// Visual template appended to the prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    #[default]
    Color,
    Character,
    Landscape,
    Abstract,
}

impl PromptStyle {
    pub const ALL: [PromptStyle; 4] = [
        PromptStyle::Color,
        PromptStyle::Character,
        PromptStyle::Landscape,
        PromptStyle::Abstract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::Color => "color",
            PromptStyle::Character => "character",
            PromptStyle::Landscape => "landscape",
            PromptStyle::Abstract => "abstract",
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptStyle {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PromptStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| CoverError::InvalidInput(format!("Unknown style '{}'", s)))
    }
}

/// Base color for the gradient instruction
///
/// Accepts `#rgb` / `#rrggbb` hex (normalized to lowercase) or a plain
/// color name made of ASCII letters and spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverColor(String);

impl CoverColor {
    pub fn parse(raw: &str) -> Result<Self, CoverError> {
        let value = raw.trim();

        if let Some(hex) = value.strip_prefix('#') {
            let valid_len = hex.len() == 3 || hex.len() == 6;
            if valid_len && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(Self(format!("#{}", hex.to_ascii_lowercase())));
            }
            return Err(CoverError::InvalidInput(format!(
                "Invalid hex color '{}'",
                raw
            )));
        }

        let is_name = !value.is_empty()
            && value.len() <= 32
            && value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
        if is_name {
            return Ok(Self(value.to_ascii_lowercase()));
        }

        Err(CoverError::InvalidInput(format!("Invalid color '{}'", raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CoverColor {
    fn default() -> Self {
        Self("#1db954".to_string())
    }
}

impl fmt::Display for CoverColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoverColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CoverColor::parse(&raw).map_err(serde::de::Error::custom)
    }
}
