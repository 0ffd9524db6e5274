//! X API Wire Models
//!
//! X API v2 のリクエスト/レスポンス

use serde::{Deserialize, Serialize};

/// `POST /2/tweets` のリクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetMedia {
    pub media_ids: Vec<String>,
}

impl CreateTweetRequest {
    pub fn new(text: &str, media_ids: Vec<String>) -> Self {
        let media = if media_ids.is_empty() {
            None
        } else {
            Some(TweetMedia { media_ids })
        };
        Self {
            text: text.to_string(),
            media,
        }
    }
}

/// `POST /2/tweets` のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    pub data: Option<TweetData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetData {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// `POST /2/media/upload` のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadResponse {
    pub data: Option<MediaData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaData {
    pub id: Option<String>,
    #[serde(default)]
    pub media_key: Option<String>,
}

/// エラーレスポンス（problem details）
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ProblemResponse {
    pub fn message(&self) -> Option<String> {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }
}
