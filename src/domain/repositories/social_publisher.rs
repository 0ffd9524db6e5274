//! # Social Publisher Trait
//!
//! ソーシャル投稿（メディアアップロード・投稿作成）を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{BinaryPayload, MediaHandle};

/// ソーシャル投稿リポジトリ
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    /// 画像をアップロードしてメディアIDを返す
    ///
    /// # Errors
    ///
    /// プラットフォームが拒否した、またはIDが返らなかった場合
    async fn upload_media(&self, payload: &BinaryPayload) -> Result<MediaHandle>;

    /// メディア付きの投稿を作成し、投稿IDを返す
    async fn create_post(&self, text: &str, media: &[MediaHandle]) -> Result<String>;
}
