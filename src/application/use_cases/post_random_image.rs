//! # Post Random Image Use Case
//!
//! ランダム画像投稿ユースケース
//!
//! `Select → Download → Upload → Post → MarkPosted → Done` の一方向のみ。
//! Select / Download / Upload の失敗は致命的で、後続の呼び出しは行わない。
//! Post 以降の失敗は警告として記録し、可能な限り先へ進む。
//!
//! マーキングは投稿の後に行うため、その間で落ちた場合は
//! 同じアセットが次回も選択対象になる。

use std::fmt;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::dto::post_config::PostConfig;
use crate::domain::entities::asset::base_name;
use crate::domain::entities::{Asset, MediaHandle, PostReport, RunStatus};
use crate::domain::errors::{error_chain_to_string, PipelineError};
use crate::domain::repositories::media_store::MediaStore;
use crate::domain::repositories::social_publisher::SocialPublisher;
use crate::domain::services::SelectionService;

/// パイプラインのステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Select,
    Download,
    Upload,
    Post,
    MarkPosted,
}

impl PipelineStep {
    pub const TOTAL: usize = 5;

    /// 1始まりのステップ番号
    pub fn number(&self) -> usize {
        match self {
            PipelineStep::Select => 1,
            PipelineStep::Download => 2,
            PipelineStep::Upload => 3,
            PipelineStep::Post => 4,
            PipelineStep::MarkPosted => 5,
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStep::Select => "Selecting a random image",
            PipelineStep::Download => "Downloading image",
            PipelineStep::Upload => "Uploading media",
            PipelineStep::Post => "Creating post",
            PipelineStep::MarkPosted => "Marking asset as posted",
        };
        write!(f, "[{}/{}] {}", self.number(), Self::TOTAL, label)
    }
}

/// ランダム画像投稿ユースケース
pub struct PostRandomImageUseCase<M: MediaStore, S: SocialPublisher> {
    media_store: Arc<M>,
    publisher: Arc<S>,
    rng: Mutex<StdRng>,
}

impl<M: MediaStore, S: SocialPublisher> PostRandomImageUseCase<M, S> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `media_store` - メディアストア
    /// * `publisher` - ソーシャル投稿リポジトリ
    pub fn new(media_store: Arc<M>, publisher: Arc<S>) -> Self {
        Self::with_rng(media_store, publisher, StdRng::from_os_rng())
    }

    /// 乱数生成器を指定して作成（テスト用のシード固定など）
    pub fn with_rng(media_store: Arc<M>, publisher: Arc<S>, rng: StdRng) -> Self {
        Self {
            media_store,
            publisher,
            rng: Mutex::new(rng),
        }
    }

    /// パイプラインを1回実行
    ///
    /// # Errors
    ///
    /// 致命的なエラー（Search / Download / Upload）のみを返す。
    /// それ以外は `PostReport::warnings` に記録される
    pub async fn execute(&self, config: &PostConfig) -> Result<PostReport, PipelineError> {
        println!("{}", PipelineStep::Select);
        let asset = self.select(config).await?;
        println!("  Selected: {} ({})", asset.public_id, asset.secure_url);

        println!("{}", PipelineStep::Download);
        let payload = self
            .media_store
            .fetch_binary(&asset.secure_url)
            .await
            .map_err(|e| PipelineError::Download(error_chain_to_string(&e)))?;
        println!("  Downloaded {} bytes ({})", payload.len(), payload.mime_type());

        if config.dry_run {
            info!("Dry run: skipping upload, post and marking");
            return Ok(PostReport {
                status: RunStatus::DryRun,
                asset_id: asset.public_id.clone(),
                image_url: asset.secure_url.clone(),
                final_location: asset.secure_url,
                media_id: None,
                post_id: None,
                marked: false,
                warnings: vec![],
            });
        }

        println!("{}", PipelineStep::Upload);
        let handle = self
            .publisher
            .upload_media(&payload)
            .await
            .map_err(|e| PipelineError::Upload(error_chain_to_string(&e)))?;
        drop(payload);
        println!("  Media ID: {}", handle);

        let mut warnings = Vec::new();

        println!("{}", PipelineStep::Post);
        let post_id = self.post(config, &handle, &mut warnings).await;

        println!("{}", PipelineStep::MarkPosted);
        let (asset_id, marked) = self.mark_posted(&asset, config, &mut warnings).await;
        let final_location = self.resolve_location(&asset_id, &mut warnings).await;

        Ok(PostReport {
            status: RunStatus::Posted,
            asset_id,
            image_url: asset.secure_url,
            final_location,
            media_id: Some(handle.as_str().to_string()),
            post_id,
            marked,
            warnings,
        })
    }

    /// 候補を検索して1つ選ぶ
    async fn select(&self, config: &PostConfig) -> Result<Asset, PipelineError> {
        let expression = config.search_expression();
        info!(
            "Searching media store: expression={:?}, max_results={}",
            expression, config.max_results
        );

        let candidates = self
            .media_store
            .search(&expression, config.max_results, config.sort.as_ref())
            .await
            .map_err(|e| PipelineError::Search(format!("no response: {}", error_chain_to_string(&e))))?;

        info!("Found {} candidate(s)", candidates.len());

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| PipelineError::Search("random source unavailable".to_string()))?;

        SelectionService::pick_random(&candidates, &mut *rng)
            .cloned()
            .ok_or_else(|| PipelineError::Search(format!("no assets matched '{}'", expression)))
    }

    /// 投稿を作成（失敗は警告）
    async fn post(
        &self,
        config: &PostConfig,
        handle: &MediaHandle,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        match self
            .publisher
            .create_post(&config.post_text, std::slice::from_ref(handle))
            .await
        {
            Ok(post_id) => {
                println!("  Post ID: {}", post_id);
                Some(post_id)
            }
            Err(e) => {
                record(warnings, PipelineError::Post(error_chain_to_string(&e)));
                None
            }
        }
    }

    /// リネームと表示名の同期
    ///
    /// # Returns
    ///
    /// (最終的なID, リネーム成功したか)。失敗時は元のIDで続行する
    async fn mark_posted(
        &self,
        asset: &Asset,
        config: &PostConfig,
        warnings: &mut Vec<String>,
    ) -> (String, bool) {
        let new_id = config
            .marking
            .posted_id(&asset.public_id, config.source_folder.as_deref());

        if new_id == asset.public_id {
            info!("Asset {} already carries the posted marker", asset.public_id);
            return (new_id, true);
        }

        let asset_id = match self.media_store.rename(&asset.public_id, &new_id).await {
            Ok(renamed) => {
                println!("  Renamed: {} -> {}", asset.public_id, renamed);
                renamed
            }
            Err(e) => {
                record(warnings, PipelineError::Rename(error_chain_to_string(&e)));
                return (asset.public_id.clone(), false);
            }
        };

        if config.sync_display_name {
            let label = base_name(&asset_id);
            if let Err(e) = self.media_store.set_display_label(&asset_id, label).await {
                record(warnings, PipelineError::LabelUpdate(error_chain_to_string(&e)));
            }
        }

        (asset_id, true)
    }

    /// 最終URLを取得（失敗時は入力IDをそのまま返す）
    async fn resolve_location(&self, asset_id: &str, warnings: &mut Vec<String>) -> String {
        match self.media_store.get_by_id(asset_id).await {
            Ok(asset) => asset.secure_url,
            Err(e) => {
                record(warnings, PipelineError::Lookup(error_chain_to_string(&e)));
                asset_id.to_string()
            }
        }
    }
}

/// 致命的でないエラーをログに残して記録
fn record(warnings: &mut Vec<String>, error: PipelineError) {
    warn!("{}", error);
    println!("⚠ {}", error);
    warnings.push(error.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    use crate::domain::entities::BinaryPayload;
    use crate::domain::repositories::media_store::SearchSort;
    use crate::domain::services::MarkingScheme;

    /// 呼び出し順を記録するフェイク
    #[derive(Default)]
    struct Fakes {
        calls: Mutex<Vec<String>>,
        candidates: Option<Vec<Asset>>,
        fail_download: bool,
        fail_upload: bool,
        fail_post: bool,
        fail_rename: bool,
        fail_label: bool,
        fail_lookup: bool,
    }

    impl Fakes {
        fn with_candidates(candidates: Vec<Asset>) -> Self {
            Self {
                candidates: Some(candidates),
                ..Default::default()
            }
        }

        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaStore for Fakes {
        async fn search(
            &self,
            expression: &str,
            max_results: u32,
            _sort: Option<&SearchSort>,
        ) -> Result<Vec<Asset>> {
            self.push(format!("search:{}:{}", expression, max_results));
            match &self.candidates {
                Some(list) => Ok(list.clone()),
                None => anyhow::bail!("no response from media store"),
            }
        }

        async fn fetch_binary(&self, url: &str) -> Result<BinaryPayload> {
            self.push(format!("download:{}", url));
            if self.fail_download {
                anyhow::bail!("HTTP 404 Not Found");
            }
            Ok(BinaryPayload::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg"))
        }

        async fn rename(&self, old_id: &str, new_id: &str) -> Result<String> {
            self.push(format!("rename:{}->{}", old_id, new_id));
            if self.fail_rename {
                anyhow::bail!("rename rejected");
            }
            Ok(new_id.to_string())
        }

        async fn set_display_label(&self, id: &str, label: &str) -> Result<()> {
            self.push(format!("label:{}={}", id, label));
            if self.fail_label {
                anyhow::bail!("explicit rejected");
            }
            Ok(())
        }

        async fn get_by_id(&self, id: &str) -> Result<Asset> {
            self.push(format!("lookup:{}", id));
            if self.fail_lookup {
                anyhow::bail!("not found");
            }
            Ok(Asset::new(id, format!("http://x/{}.jpg", id)))
        }
    }

    #[async_trait]
    impl SocialPublisher for Fakes {
        async fn upload_media(&self, payload: &BinaryPayload) -> Result<MediaHandle> {
            self.push(format!("upload:{}", payload.len()));
            if self.fail_upload {
                anyhow::bail!("media rejected");
            }
            Ok(MediaHandle::new("H1"))
        }

        async fn create_post(&self, _text: &str, media: &[MediaHandle]) -> Result<String> {
            let ids: Vec<&str> = media.iter().map(|m| m.as_str()).collect();
            self.push(format!("post:{}", ids.join(",")));
            if self.fail_post {
                anyhow::bail!("403 Forbidden");
            }
            Ok("T1".to_string())
        }
    }

    fn use_case(fakes: Arc<Fakes>) -> PostRandomImageUseCase<Fakes, Fakes> {
        PostRandomImageUseCase::with_rng(fakes.clone(), fakes, StdRng::seed_from_u64(1))
    }

    fn config() -> PostConfig {
        PostConfig::new(Some("Messi".to_string()), 100, MarkingScheme::default())
    }

    fn messi_a1() -> Vec<Asset> {
        vec![Asset::new("Messi/a1", "http://x/a1.jpg")]
    }

    fn has_call(calls: &[String], prefix: &str) -> bool {
        calls.iter().any(|c| c.starts_with(prefix))
    }

    #[tokio::test]
    async fn test_full_run_success() {
        let fakes = Arc::new(Fakes::with_candidates(messi_a1()));
        let report = use_case(fakes.clone()).execute(&config()).await.unwrap();

        assert_eq!(report.status, RunStatus::Posted);
        assert_eq!(report.image_url, "http://x/a1.jpg");
        assert_eq!(report.asset_id, "MessiPosted/a1");
        assert_eq!(report.media_id.as_deref(), Some("H1"));
        assert_eq!(report.post_id.as_deref(), Some("T1"));
        assert_eq!(report.final_location, "http://x/MessiPosted/a1.jpg");
        assert!(report.marked);
        assert!(report.is_clean());

        assert_eq!(
            fakes.calls(),
            vec![
                "search:folder:Messi:100",
                "download:http://x/a1.jpg",
                "upload:3",
                "post:H1",
                "rename:Messi/a1->MessiPosted/a1",
                "label:MessiPosted/a1=a1",
                "lookup:MessiPosted/a1",
            ]
        );
    }

    #[tokio::test]
    async fn test_prefix_scheme() {
        let fakes = Arc::new(Fakes::with_candidates(messi_a1()));
        let mut config = config();
        config.marking = MarkingScheme::Prefix {
            prefix: "Posted-".to_string(),
        };

        let report = use_case(fakes.clone()).execute(&config).await.unwrap();

        assert_eq!(report.asset_id, "Posted-Messi/a1");
        assert!(fakes
            .calls()
            .contains(&"search:folder:Messi AND -public_id:Posted-*:100".to_string()));
    }

    #[tokio::test]
    async fn test_search_no_response_is_fatal() {
        let fakes = Arc::new(Fakes::default());
        let err = use_case(fakes.clone()).execute(&config()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Search(_)));
        assert!(err.to_string().contains("no response"));
        assert_eq!(fakes.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_fatal() {
        let fakes = Arc::new(Fakes::with_candidates(vec![]));
        let err = use_case(fakes.clone()).execute(&config()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Search(_)));
        let calls = fakes.calls();
        assert!(!has_call(&calls, "download"));
        assert!(!has_call(&calls, "upload"));
        assert!(!has_call(&calls, "post"));
    }

    #[tokio::test]
    async fn test_download_failure_is_fatal() {
        let fakes = Arc::new(Fakes {
            fail_download: true,
            ..Fakes::with_candidates(messi_a1())
        });
        let err = use_case(fakes.clone()).execute(&config()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Download(_)));
        assert!(err.is_fatal());
        let calls = fakes.calls();
        assert!(!has_call(&calls, "upload"));
        assert!(!has_call(&calls, "post"));
        assert!(!has_call(&calls, "rename"));
    }

    #[tokio::test]
    async fn test_upload_failure_is_fatal() {
        let fakes = Arc::new(Fakes {
            fail_upload: true,
            ..Fakes::with_candidates(messi_a1())
        });
        let err = use_case(fakes.clone()).execute(&config()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Upload(_)));
        let calls = fakes.calls();
        assert!(!has_call(&calls, "post"));
        assert!(!has_call(&calls, "rename"));
    }

    #[tokio::test]
    async fn test_post_failure_still_marks() {
        let fakes = Arc::new(Fakes {
            fail_post: true,
            ..Fakes::with_candidates(messi_a1())
        });
        let report = use_case(fakes.clone()).execute(&config()).await.unwrap();

        assert!(report.post_id.is_none());
        assert!(!report.is_posted());
        assert!(report.marked);
        assert_eq!(report.asset_id, "MessiPosted/a1");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("post failed"));
        assert!(has_call(&fakes.calls(), "rename:Messi/a1->MessiPosted/a1"));
    }

    #[tokio::test]
    async fn test_rename_failure_keeps_original_id() {
        let fakes = Arc::new(Fakes {
            fail_rename: true,
            ..Fakes::with_candidates(messi_a1())
        });
        let report = use_case(fakes.clone()).execute(&config()).await.unwrap();

        assert_eq!(report.asset_id, "Messi/a1");
        assert!(!report.marked);
        assert!(report.is_posted());
        let calls = fakes.calls();
        assert!(!has_call(&calls, "label"));
        assert!(has_call(&calls, "lookup:Messi/a1"));
    }

    #[tokio::test]
    async fn test_label_and_lookup_failures_are_warnings() {
        let fakes = Arc::new(Fakes {
            fail_label: true,
            fail_lookup: true,
            ..Fakes::with_candidates(messi_a1())
        });
        let report = use_case(fakes).execute(&config()).await.unwrap();

        assert!(report.marked);
        assert_eq!(report.warnings.len(), 2);
        // lookup失敗時は入力IDがそのまま返る
        assert_eq!(report.final_location, "MessiPosted/a1");
    }

    #[tokio::test]
    async fn test_display_sync_disabled() {
        let fakes = Arc::new(Fakes::with_candidates(messi_a1()));
        let mut config = config();
        config.sync_display_name = false;

        use_case(fakes.clone()).execute(&config).await.unwrap();

        assert!(!has_call(&fakes.calls(), "label"));
    }

    #[tokio::test]
    async fn test_mark_happens_after_post() {
        let fakes = Arc::new(Fakes::with_candidates(messi_a1()));
        use_case(fakes.clone()).execute(&config()).await.unwrap();

        let calls = fakes.calls();
        let post = calls.iter().position(|c| c.starts_with("post")).unwrap();
        let rename = calls.iter().position(|c| c.starts_with("rename")).unwrap();
        assert!(post < rename);
    }

    #[tokio::test]
    async fn test_already_marked_asset_is_not_renamed() {
        let fakes = Arc::new(Fakes::with_candidates(vec![Asset::new(
            "MessiPosted/a1",
            "http://x/a1.jpg",
        )]));
        let report = use_case(fakes.clone()).execute(&config()).await.unwrap();

        assert_eq!(report.asset_id, "MessiPosted/a1");
        assert!(report.marked);
        assert!(!has_call(&fakes.calls(), "rename"));
    }

    #[tokio::test]
    async fn test_dry_run_skips_side_effects() {
        let fakes = Arc::new(Fakes::with_candidates(messi_a1()));
        let mut config = config();
        config.dry_run = true;

        let report = use_case(fakes.clone()).execute(&config).await.unwrap();

        assert_eq!(report.status, RunStatus::DryRun);
        assert_eq!(report.image_url, "http://x/a1.jpg");
        assert_eq!(
            fakes.calls(),
            vec!["search:folder:Messi:100", "download:http://x/a1.jpg"]
        );
    }

    #[test]
    fn test_step_display() {
        assert_eq!(
            PipelineStep::Select.to_string(),
            "[1/5] Selecting a random image"
        );
        assert_eq!(
            PipelineStep::MarkPosted.to_string(),
            "[5/5] Marking asset as posted"
        );
    }
}
