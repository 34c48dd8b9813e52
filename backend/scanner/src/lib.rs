//! # Scanner
//!
//! Command line stand-in for the mood pages of the frontend.
//!
//! - `scan`: webcam capture flow, posts an image file to the mood endpoint and
//!   records the scanned label for today
//! - `score`: mood logging flow, records today's 1-5 score
//! - `set`: avatar picker, records today's emotion directly
//! - `today`: what the avatar and dashboard would show
//!
//! All state lives in one JSON file, one key per signal per day.
use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use mood::{CanonicalEmotion, EmotionStore, FileStore, MoodScore};
use reqwest::Client;
use tracing::{info, warn};

pub mod models;
pub mod utils;

use models::{ErrorBody, MoodRequest, MoodResponse};
use utils::{data_uri, mime_type, mood_url};

pub const DEFAULT_STORE_PATH: &str = "moodlight-store.json";
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

pub type Store = EmotionStore<FileStore>;

pub fn open_store(path: &Path) -> Result<Store> {
    let file_store = FileStore::open(path)
        .with_context(|| format!("Failed to open store {}", path.display()))?;

    Ok(EmotionStore::local(file_store))
}

pub async fn scan(store: &Store, server: &str, image: &Path) -> Result<()> {
    let bytes = fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    let request = MoodRequest {
        image: data_uri(mime_type(image), &bytes),
    };

    info!("Sending {} ({} bytes) to {server}", image.display(), bytes.len());

    let response = Client::new()
        .post(mood_url(server))
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        bail!("Mood endpoint returned {status}: {message}");
    }

    let mood: MoodResponse = response.json().await?;
    if !mood.recognized {
        warn!("Classifier answer was not a known emotion, recorded as neutral");
    }

    println!("Scanned: {} ({})", mood.emotion, mood.canonical);
    store.save_today_scanner_label(mood.emotion.as_str())?;

    Ok(())
}

pub fn record_score(store: &Store, score: i64) -> Result<()> {
    let score = MoodScore::new(score)?;
    store.save_today_mood_score(score)?;

    println!("Mood score {score} saved");
    Ok(())
}

pub fn record_emotion(store: &Store, emotion: &str) -> Result<()> {
    let emotion: CanonicalEmotion = emotion.parse()?;
    store.save_today_emotion(emotion)?;

    println!("Emotion {emotion} saved");
    Ok(())
}

pub fn print_today(store: &Store) -> Result<()> {
    let record = store.today_record();

    println!("{}", serde_json::to_string_pretty(&record)?);
    println!("Today: {}", record.reconcile());

    Ok(())
}
