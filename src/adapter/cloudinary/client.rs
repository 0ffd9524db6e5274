//! Cloudinary Client Abstractions
//!
//! クライアントの抽象化と reqwest 実装
//!
//! - Admin API（search / resources）: Basic 認証
//! - Upload API（rename / explicit）: 署名付きフォーム

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, Url};
use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::models::{ErrorResponse, Resource, SearchRequest, SearchResponse};
use super::signature::signed_form;
use crate::adapter::config::CloudinaryCredentials;

/// ダウンロードしたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Trait for Cloudinary API operations
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CloudinaryApi: Send + Sync {
    /// 検索式でリソースを検索
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;

    /// 配信URLからファイルを取得
    async fn download(&self, url: &str) -> Result<DownloadedFile>;

    /// public_id を変更
    async fn rename(&self, from_public_id: &str, to_public_id: &str) -> Result<Resource>;

    /// 表示名を更新（explicit）
    async fn update_display_name(&self, public_id: &str, display_name: &str) -> Result<Resource>;

    /// public_id でリソースを取得
    async fn get_resource(&self, public_id: &str) -> Result<Resource>;
}

/// reqwest ベースの Cloudinary クライアント
pub struct HttpCloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    credentials: CloudinaryCredentials,
}

impl HttpCloudinaryClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - APIのベースURL（通常は `https://api.cloudinary.com`）
    /// * `credentials` - 認証情報
    /// * `timeout` - リクエストタイムアウト（None なら reqwest のデフォルト）
    pub fn new(
        base_url: impl Into<String>,
        credentials: CloudinaryCredentials,
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
            base_url: base_url.into(),
            credentials,
        })
    }

    /// `/v1_1/{cloud_name}/...` のURLを組み立てる（各セグメントはエンコードされる）
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid Cloudinary base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Cloudinary base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push("v1_1")
            .push(&self.credentials.cloud_name)
            .extend(segments);
        Ok(url)
    }

    /// Upload API に署名付きフォームを送る
    async fn post_signed(
        &self,
        action: &str,
        params: BTreeMap<String, String>,
    ) -> Result<Resource> {
        let url = self.endpoint(&["image", action])?;
        let form = signed_form(
            params,
            &self.credentials.api_key,
            &self.credentials.api_secret,
            Utc::now().timestamp(),
        );

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .with_context(|| format!("Cloudinary {} request failed", action))?;

        check_status(response)
            .await?
            .json::<Resource>()
            .await
            .with_context(|| format!("Failed to parse Cloudinary {} response", action))
    }
}

/// 成功ステータス以外をエラーにする
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    bail!(
        "HTTP {} {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown"),
        message
    )
}

#[async_trait]
impl CloudinaryApi for HttpCloudinaryClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.endpoint(&["resources", "search"])?;

        let response = self
            .http
            .post(url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .json(request)
            .send()
            .await
            .context("Cloudinary search request failed")?;

        check_status(response)
            .await?
            .json::<SearchResponse>()
            .await
            .context("Failed to parse Cloudinary search response")
    }

    async fn download(&self, url: &str) -> Result<DownloadedFile> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string());

        let bytes = response
            .bytes()
            .await
            .context("Failed to read image body")?
            .to_vec();

        Ok(DownloadedFile {
            bytes,
            content_type,
        })
    }

    async fn rename(&self, from_public_id: &str, to_public_id: &str) -> Result<Resource> {
        let mut params = BTreeMap::new();
        params.insert("from_public_id".to_string(), from_public_id.to_string());
        params.insert("to_public_id".to_string(), to_public_id.to_string());
        self.post_signed("rename", params).await
    }

    async fn update_display_name(&self, public_id: &str, display_name: &str) -> Result<Resource> {
        let mut params = BTreeMap::new();
        params.insert("public_id".to_string(), public_id.to_string());
        params.insert("type".to_string(), "upload".to_string());
        params.insert("display_name".to_string(), display_name.to_string());
        self.post_signed("explicit", params).await
    }

    async fn get_resource(&self, public_id: &str) -> Result<Resource> {
        let mut segments = vec!["resources", "image", "upload"];
        segments.extend(public_id.split('/'));
        let url = self.endpoint(&segments)?;

        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .send()
            .await
            .context("Cloudinary resource request failed")?;

        check_status(response)
            .await?
            .json::<Resource>()
            .await
            .context("Failed to parse Cloudinary resource response")
    }
}
