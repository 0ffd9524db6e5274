//! Cloudinary Media Store Implementation
//!
//! MediaStoreのCloudinary実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::adapter::cloudinary::client::CloudinaryApi;
use crate::adapter::cloudinary::models::SearchRequest;
use crate::domain::entities::asset::DEFAULT_MIME_TYPE;
use crate::domain::entities::{Asset, BinaryPayload};
use crate::domain::repositories::media_store::{MediaStore, SearchSort};

/// Cloudinaryメディアストア
pub struct CloudinaryMediaStore {
    api: Arc<dyn CloudinaryApi>,
}

impl CloudinaryMediaStore {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<dyn CloudinaryApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn search(
        &self,
        expression: &str,
        max_results: u32,
        sort: Option<&SearchSort>,
    ) -> Result<Vec<Asset>> {
        let request = SearchRequest::new(expression, max_results, sort);
        let response = self
            .api
            .search(&request)
            .await
            .context("Cloudinary search failed")?;

        let resources = response
            .resources
            .context("no response from Cloudinary search (missing resources)")?;

        info!(
            "Cloudinary search returned {} resource(s) (total_count={:?})",
            resources.len(),
            response.total_count
        );

        Ok(resources.into_iter().map(|r| r.into_asset()).collect())
    }

    async fn fetch_binary(&self, url: &str) -> Result<BinaryPayload> {
        let file = self.api.download(url).await?;
        debug!("Downloaded {} bytes from {}", file.bytes.len(), url);

        let mime_type = file
            .content_type
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        Ok(BinaryPayload::new(file.bytes, mime_type))
    }

    async fn rename(&self, old_id: &str, new_id: &str) -> Result<String> {
        let resource = self
            .api
            .rename(old_id, new_id)
            .await
            .with_context(|| format!("Failed to rename {} to {}", old_id, new_id))?;
        Ok(resource.public_id)
    }

    async fn set_display_label(&self, id: &str, label: &str) -> Result<()> {
        self.api
            .update_display_name(id, label)
            .await
            .with_context(|| format!("Failed to set display name of {}", id))?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Asset> {
        let resource = self
            .api
            .get_resource(id)
            .await
            .with_context(|| format!("Failed to look up {}", id))?;
        Ok(resource.into_asset())
    }
}
