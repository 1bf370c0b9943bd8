//! Hugging Face inference client (text-to-image)

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::{CoverError, CoverResult};
use crate::types::ImageGenerator;

pub const HUGGINGFACE_IMAGE_URL: &str =
    "https://router.huggingface.co/hf-inference/models/stabilityai/stable-diffusion-3.5-large";
const USER_AGENT: &str = concat!("moodcover/", env!("CARGO_PKG_VERSION"));
/// Diffusion models routinely take tens of seconds per image
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Hugging Face image generation client
pub struct HuggingFaceClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(api_token: Option<String>, endpoint: Option<String>) -> CoverResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(GENERATION_TIMEOUT)
            .build()
            .map_err(|e| CoverError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.unwrap_or_else(|| HUGGINGFACE_IMAGE_URL.to_string()),
            api_token,
        })
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> CoverResult<Vec<u8>> {
        let token = self.api_token.as_deref().ok_or_else(|| {
            CoverError::Config(
                "Hugging Face token not configured. Set HUGGINGFACE_API_KEY or \
                 [credentials] huggingface_api_key in the config file."
                    .to_string(),
            )
        })?;

        tracing::info!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            "Requesting cover image"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| CoverError::Network(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            // Body is usually a short JSON error; log it, don't surface it
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                detail = %detail.chars().take(200).collect::<String>(),
                "Image generation rejected"
            );
            return Err(CoverError::Generation {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoverError::Network(e.to_string()))?;

        tracing::info!(bytes = bytes.len(), "Cover image received");
        Ok(bytes.to_vec())
    }
}

/// MIME type of generated image bytes, defaulting to JPEG
pub fn detect_content_type(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type())
        .unwrap_or("image/jpeg")
}
