//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::cloudinary::client::HttpCloudinaryClient;
use crate::adapter::config::Config;
use crate::adapter::repositories::cloudinary_media_store::CloudinaryMediaStore;
use crate::adapter::repositories::twitter_social_publisher::TwitterSocialPublisher;
use crate::adapter::twitter::client::HttpTwitterClient;
use crate::application::use_cases::post_random_image::PostRandomImageUseCase;
use crate::domain::entities::{PostReport, RunStatus};
use crate::domain::errors::PipelineError;

/// 実行結果のバナー文字列
pub fn render_outcome(outcome: &Result<PostReport, PipelineError>) -> String {
    match outcome {
        Ok(report) if report.status == RunStatus::DryRun => format!(
            "✓ Dry run complete. Selected {} ({})",
            report.asset_id, report.image_url
        ),
        Ok(report) if report.is_posted() => format!(
            "✅ Post published. Image URL: {}",
            report.image_url
        ),
        Ok(report) => format!(
            "⚠ Post was not published, asset processed anyway. Image URL: {}",
            report.image_url
        ),
        Err(e) => format!("❌ Failed to publish post: {}", e),
    }
}

/// Post Image Workflow
pub struct PostImageWorkflow {
    config: Config,
    use_case: PostRandomImageUseCase<CloudinaryMediaStore, TwitterSocialPublisher>,
}

impl PostImageWorkflow {
    /// Create a new workflow instance with dependency injection
    ///
    /// クライアントはここで1回だけ構築され、実行中は共有される
    pub fn new(config: Config) -> Result<Self> {
        let timeout = config.settings.request_timeout_secs.map(Duration::from_secs);

        let cloudinary = HttpCloudinaryClient::new(
            config.settings.cloudinary_base_url.clone(),
            config.credentials.cloudinary.clone(),
            timeout,
        )?;
        let twitter = HttpTwitterClient::new(
            config.settings.twitter_base_url.clone(),
            config.credentials.twitter_access_token.clone(),
            timeout,
        )?;

        let media_store = Arc::new(CloudinaryMediaStore::new(Arc::new(cloudinary)));
        let publisher = Arc::new(TwitterSocialPublisher::new(Arc::new(twitter)));
        let use_case = PostRandomImageUseCase::new(media_store, publisher);

        Ok(Self { config, use_case })
    }

    /// Execute the posting workflow
    ///
    /// 成功・失敗に関わらず結果を表示して正常に戻る
    pub async fn execute(&self, dry_run: bool) -> Result<Option<PostReport>> {
        info!("Starting picpost...");
        info!("Dry run: {}", dry_run);

        let post_config = self.config.settings.to_post_config(dry_run);

        println!("✓ Using configuration:");
        println!("  Cloud: {}", self.config.credentials.cloudinary.cloud_name);
        println!(
            "  Folder: {}",
            post_config.source_folder.as_deref().unwrap_or("(any)")
        );
        println!("  Search: {}", post_config.search_expression());
        println!("  Max results: {}", post_config.max_results);

        let outcome = self.use_case.execute(&post_config).await;

        let banner = render_outcome(&outcome);
        match &outcome {
            Ok(report) => {
                for warning in &report.warnings {
                    info!("Non-fatal: {}", warning);
                }
                println!("{}", banner);
            }
            Err(e) => {
                error!("Run failed: {}", e);
                eprintln!("{}", banner);
            }
        }

        Ok(outcome.ok())
    }
}
