//! # Post Configuration DTO
//!
//! パイプライン設定のData Transfer Object

use crate::domain::repositories::media_store::SearchSort;
use crate::domain::services::MarkingScheme;

/// 1回の検索で取得する候補の上限
pub const MAX_SEARCH_RESULTS: u32 = 500;

/// パイプライン設定
///
/// 認証情報は含まない（クライアント構築時に注入済み）
#[derive(Debug, Clone)]
pub struct PostConfig {
    /// 選択元フォルダ（None ならフォルダで絞り込まない）
    pub source_folder: Option<String>,
    /// 検索件数の上限
    pub max_results: u32,
    /// 検索のソート指定
    pub sort: Option<SearchSort>,
    /// 投稿済みマーキング方式
    pub marking: MarkingScheme,
    /// リネーム後に表示名を同期するか
    pub sync_display_name: bool,
    /// 投稿本文
    pub post_text: String,
    /// ドライラン（選択とダウンロードのみ）
    pub dry_run: bool,
}

impl PostConfig {
    /// 新しい設定を作成します。
    ///
    /// `max_results` は `1..=MAX_SEARCH_RESULTS` に丸められます。
    ///
    /// # 例
    ///
    /// ```
    /// use picpost::application::dto::post_config::PostConfig;
    /// use picpost::domain::services::MarkingScheme;
    ///
    /// let config = PostConfig::new(Some("Messi".to_string()), 10_000, MarkingScheme::default());
    /// assert_eq!(config.max_results, 500);
    /// assert!(config.sync_display_name);
    /// assert!(!config.dry_run);
    /// ```
    pub fn new(source_folder: Option<String>, max_results: u32, marking: MarkingScheme) -> Self {
        Self {
            source_folder,
            max_results: max_results.clamp(1, MAX_SEARCH_RESULTS),
            sort: Some(SearchSort::default()),
            marking,
            sync_display_name: true,
            post_text: String::new(),
            dry_run: false,
        }
    }

    /// 選択用の検索式
    pub fn search_expression(&self) -> String {
        self.marking.search_expression(self.source_folder.as_deref())
    }
}
