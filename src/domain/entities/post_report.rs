//! # Post Report
//!
//! 1回の実行結果（呼び出し元に返される唯一の出力）

/// 実行ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// 投稿まで進んだ（投稿失敗は warnings に記録される）
    Posted,
    /// ドライラン（選択とダウンロードのみ）
    DryRun,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct PostReport {
    pub status: RunStatus,
    /// 最終的なアセットID（リネーム失敗時は元のID）
    pub asset_id: String,
    /// 投稿に使った画像URL
    pub image_url: String,
    /// マーキング後に取得したURL（取得失敗時はアセットID）
    pub final_location: String,
    /// アップロードしたメディアID
    pub media_id: Option<String>,
    /// 作成された投稿ID（投稿失敗時は None）
    pub post_id: Option<String>,
    /// リネームが成功したか
    pub marked: bool,
    /// 致命的でないエラーのメッセージ
    pub warnings: Vec<String>,
}

impl PostReport {
    /// 投稿が作成されたかチェックします。
    ///
    /// # 例
    ///
    /// ```
    /// use picpost::domain::entities::{PostReport, RunStatus};
    ///
    /// let report = PostReport {
    ///     status: RunStatus::Posted,
    ///     asset_id: "MessiPosted/a1".to_string(),
    ///     image_url: "http://x/a1.jpg".to_string(),
    ///     final_location: "http://x/MessiPosted/a1.jpg".to_string(),
    ///     media_id: Some("H1".to_string()),
    ///     post_id: Some("T1".to_string()),
    ///     marked: true,
    ///     warnings: vec![],
    /// };
    /// assert!(report.is_posted());
    /// assert!(report.is_clean());
    /// ```
    pub fn is_posted(&self) -> bool {
        self.status == RunStatus::Posted && self.post_id.is_some()
    }

    /// 警告なしで完了したか
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
