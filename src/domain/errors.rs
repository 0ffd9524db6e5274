//! # Pipeline Errors
//!
//! パイプラインのエラー分類
//!
//! Search / Download / Upload は致命的（実行を中断）。
//! それ以外はその場でログに記録され、フォールバック値で続行する。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// 検索の応答がない、または候補が0件
    #[error("search failed: {0}")]
    Search(String),

    /// 画像のダウンロードが成功ステータスを返さなかった
    #[error("download failed: {0}")]
    Download(String),

    /// メディアのアップロードが拒否された、またはIDが返らなかった
    #[error("media upload failed: {0}")]
    Upload(String),

    /// 投稿の作成が拒否された
    #[error("post failed: {0}")]
    Post(String),

    #[error("rename failed: {0}")]
    Rename(String),

    #[error("display label update failed: {0}")]
    LabelUpdate(String),

    #[error("asset lookup failed: {0}")]
    Lookup(String),
}

impl PipelineError {
    /// 実行を中断すべきエラーか
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::Search(_) | PipelineError::Download(_) | PipelineError::Upload(_)
        )
    }
}

/// エラーチェーン全体を1行の文字列にする
pub fn error_chain_to_string(e: &anyhow::Error) -> String {
    e.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}
