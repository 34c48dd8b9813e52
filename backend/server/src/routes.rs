use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use mood::{CanonicalEmotion, Classification, RawLabel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{AppError, ValidationError},
    image::ImagePayload,
    state::AppState,
};

#[derive(Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodResponse {
    pub emotion: RawLabel,
    pub recognized: bool,
    pub canonical: CanonicalEmotion,
}

impl From<&Classification> for MoodResponse {
    fn from(classification: &Classification) -> Self {
        Self {
            emotion: classification.label(),
            recognized: classification.is_recognized(),
            canonical: classification.canonical(),
        }
    }
}

pub async fn mood_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoodRequest>, JsonRejection>,
) -> Result<Json<MoodResponse>, AppError> {
    // a body that is not JSON has no image in it either
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected mood payload: {rejection}");

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ValidationError::PayloadTooLarge
        } else {
            ValidationError::MissingImage
        }
    })?;

    let image = request.image.ok_or(ValidationError::MissingImage)?;
    let image = ImagePayload::from_base64(&image)?;

    debug!(
        mime_type = %image.mime_type,
        bytes = image.bytes.len(),
        "Classifying image"
    );

    let text = state.classifier.classify(&image).await?;
    let classification = Classification::from_response(&text);

    if let Classification::Unrecognized(raw) = &classification {
        warn!(raw = ?raw, "Unrecognized emotion label, falling back to neutral");
    }

    Ok(Json(MoodResponse::from(&classification)))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
