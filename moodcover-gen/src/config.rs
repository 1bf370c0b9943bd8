//! Configuration resolution for moodcover-gen
//!
//! Turns the `[analysis]` and `[endpoints]` tables of the TOML config into
//! the values the services run with. Priority: CLI → TOML → compiled preset.

use moodcover_common::config::{AnalysisConfig, EndpointsConfig};
use tracing::{info, warn};

use crate::error::{CoverError, CoverResult};
use crate::models::{AnalysisProfile, TempoCorrection};
use crate::services::spotify_client::SpotifyEndpoints;

/// Resolve the analysis profile
///
/// The preset named on the command line wins over `[analysis] profile`;
/// `classic` is used when neither names one. Individual overrides from the
/// TOML table are then applied on top and the result is validated.
pub fn resolve_profile(
    config: &AnalysisConfig,
    cli_profile: Option<&str>,
) -> CoverResult<AnalysisProfile> {
    let name = match (cli_profile, config.profile.as_deref()) {
        (Some(cli), Some(toml)) if !cli.eq_ignore_ascii_case(toml) => {
            warn!(cli = %cli, toml = %toml, "Profile set on command line and in TOML; using command line");
            cli
        }
        (Some(cli), _) => cli,
        (None, Some(toml)) => toml,
        (None, None) => "classic",
    };

    let mut profile = AnalysisProfile::preset(name)?;

    match (config.tempo_correction, config.tempo_correction_threshold) {
        (Some(false), _) => profile.tempo_correction = TempoCorrection::Disabled,
        (Some(true), Some(threshold)) | (None, Some(threshold)) => {
            profile.tempo_correction = TempoCorrection::HalveAbove(threshold)
        }
        (Some(true), None) => {
            if profile.tempo_correction == TempoCorrection::Disabled {
                profile.tempo_correction = AnalysisProfile::extended().tempo_correction;
            }
        }
        (None, None) => {}
    }

    if let Some(bands) = &config.tempo_bands {
        profile.tempo_bands = to_bounds("tempo_bands", bands)?;
    }
    if let Some(bands) = &config.centroid_bands {
        profile.centroid_bands = to_bounds("centroid_bands", bands)?;
    }
    if let Some(bands) = &config.bandwidth_bands {
        profile.bandwidth_bands = to_bounds("bandwidth_bands", bands)?;
    }
    if let Some(limit) = config.result_limit {
        profile.result_limit = limit;
    }
    if let Some(deduplicate) = config.deduplicate {
        profile.deduplicate = deduplicate;
    }

    profile.validate()?;

    info!(
        profile = %profile.name,
        tempo_correction = ?profile.tempo_correction,
        result_limit = profile.result_limit,
        deduplicate = profile.deduplicate,
        "Analysis profile resolved"
    );

    Ok(profile)
}

fn to_bounds<const N: usize>(field: &str, values: &[f64]) -> CoverResult<[f64; N]> {
    values.try_into().map_err(|_| {
        CoverError::Config(format!(
            "{} needs exactly {} boundaries, got {}",
            field,
            N,
            values.len()
        ))
    })
}

/// Upstream base URLs with overrides applied
#[derive(Debug, Clone, Default)]
pub struct ServiceEndpoints {
    pub spotify: SpotifyEndpoints,
    /// `None` means the public Deezer API
    pub deezer_api_url: Option<String>,
    /// `None` means the hosted Stable Diffusion endpoint
    pub image_generation_url: Option<String>,
}

impl ServiceEndpoints {
    pub fn resolve(config: &EndpointsConfig) -> Self {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let defaults = SpotifyEndpoints::default();
        Self {
            spotify: SpotifyEndpoints {
                accounts_url: non_blank(&config.spotify_accounts_url)
                    .unwrap_or(defaults.accounts_url),
                api_url: non_blank(&config.spotify_api_url).unwrap_or(defaults.api_url),
            },
            deezer_api_url: non_blank(&config.deezer_api_url),
            image_generation_url: non_blank(&config.image_generation_url),
        }
    }
}
