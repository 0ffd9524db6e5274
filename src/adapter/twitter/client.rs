//! X API Client Abstractions
//!
//! クライアントの抽象化と reqwest 実装（OAuth 2.0 ユーザーコンテキストのBearerトークン）

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::models::{CreateTweetRequest, CreateTweetResponse, MediaUploadResponse, ProblemResponse};

/// Trait for X API operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TwitterApi: Send + Sync {
    /// 画像をアップロード
    async fn upload_media(&self, bytes: Vec<u8>, mime_type: &str) -> Result<MediaUploadResponse>;

    /// 投稿を作成
    async fn create_tweet(&self, request: &CreateTweetRequest) -> Result<CreateTweetResponse>;
}

/// reqwest ベースの X API クライアント
pub struct HttpTwitterClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpTwitterClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 成功ステータス以外をエラーにする
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProblemResponse>(&body)
        .ok()
        .and_then(|p| p.message())
        .unwrap_or_else(|| body.chars().take(200).collect());

    bail!(
        "HTTP {} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        message
    )
}

/// MIMEタイプからファイル名を決める
fn file_name_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "image.png",
        "image/gif" => "image.gif",
        "image/webp" => "image.webp",
        _ => "image.jpg",
    }
}

#[async_trait]
impl TwitterApi for HttpTwitterClient {
    async fn upload_media(&self, bytes: Vec<u8>, mime_type: &str) -> Result<MediaUploadResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name_for(mime_type))
            .mime_str(mime_type)
            .with_context(|| format!("Invalid media type: {}", mime_type))?;

        let form = Form::new()
            .part("media", part)
            .text("media_category", "tweet_image")
            .text("media_type", mime_type.to_string());

        let response = self
            .http
            .post(self.url("/2/media/upload"))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .context("X media upload request failed")?;

        check_status(response)
            .await?
            .json::<MediaUploadResponse>()
            .await
            .context("Failed to parse X media upload response")
    }

    async fn create_tweet(&self, request: &CreateTweetRequest) -> Result<CreateTweetResponse> {
        let response = self
            .http
            .post(self.url("/2/tweets"))
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .context("X create post request failed")?;

        check_status(response)
            .await?
            .json::<CreateTweetResponse>()
            .await
            .context("Failed to parse X create post response")
    }
}
