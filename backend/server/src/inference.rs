//! # Inference
//!
//! Emotion classification is delegated to a hosted multimodal model.
//!
//! ## Contract
//! - One `generateContent` call per request, fixed prompt plus the image as inline data
//! - No timeout, no retry, no caching, no concurrency limit on outbound calls
//! - Whatever text comes back is untrusted, validation happens in the route
//!
//! ## Provider
//! `POST {api_base}/models/{model}:generateContent`, key in the `x-goog-api-key` header.
//! The key is read from config and never logged.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{config::Config, image::ImagePayload};

pub const PROMPT: &str = "Look at the face in this image and classify the emotion. \
Answer with exactly one lowercase word from this list: \
happy, sad, angry, neutral, fear, disgust, surprise. \
Do not add punctuation or any other text.";

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Request to inference provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Inference provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Inference provider returned no text")]
    EmptyResponse,
}

/// Anything that can turn an image into a (free text) emotion word.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn classify(&self, image: &ImagePayload) -> Result<String, InferenceError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint(&config.api_base, &config.model),
            api_key: config.api_key.clone(),
        }
    }
}

fn endpoint(api_base: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        model
    )
}

fn build_request(image: &ImagePayload) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: [Content {
            parts: [
                Part::Text { text: PROMPT },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: &image.mime_type,
                        data: image.to_base64(),
                    },
                },
            ],
        }],
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn classify(&self, image: &ImagePayload) -> Result<String, InferenceError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.text().ok_or(InferenceError::EmptyResponse)?;

        debug!(text = ?text, "inference provider answered");
        Ok(text)
    }
}
