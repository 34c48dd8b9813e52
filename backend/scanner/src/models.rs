use mood::{CanonicalEmotion, RawLabel};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct MoodRequest {
    pub image: String,
}

#[derive(Deserialize, Debug)]
pub struct MoodResponse {
    pub emotion: RawLabel,
    pub recognized: bool,
    pub canonical: CanonicalEmotion,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
