//! X Social Publisher Implementation
//!
//! SocialPublisherのX API実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::adapter::twitter::client::TwitterApi;
use crate::adapter::twitter::models::CreateTweetRequest;
use crate::domain::entities::{BinaryPayload, MediaHandle};
use crate::domain::repositories::social_publisher::SocialPublisher;

/// X投稿リポジトリ
pub struct TwitterSocialPublisher {
    api: Arc<dyn TwitterApi>,
}

impl TwitterSocialPublisher {
    pub fn new(api: Arc<dyn TwitterApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SocialPublisher for TwitterSocialPublisher {
    async fn upload_media(&self, payload: &BinaryPayload) -> Result<MediaHandle> {
        let response = self
            .api
            .upload_media(payload.bytes().to_vec(), payload.mime_type())
            .await
            .context("X rejected the media upload")?;

        let media_id = response
            .data
            .and_then(|d| d.id)
            .filter(|id| !id.is_empty())
            .context("X media upload returned no media id")?;

        Ok(MediaHandle::new(media_id))
    }

    async fn create_post(&self, text: &str, media: &[MediaHandle]) -> Result<String> {
        let media_ids = media.iter().map(|m| m.as_str().to_string()).collect();
        let request = CreateTweetRequest::new(text, media_ids);

        let response = self
            .api
            .create_tweet(&request)
            .await
            .context("X rejected the post")?;

        let data = response.data.context("X create post returned no data")?;
        Ok(data.id)
    }
}
