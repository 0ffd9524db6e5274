//! # Media Store Trait
//!
//! メディアライブラリ（検索・取得・リネーム・表示名更新）を抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Asset, BinaryPayload};

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// 検索結果のソート指定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchSort {
    pub field: String,
    pub direction: SortDirection,
}

impl SearchSort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Default for SearchSort {
    fn default() -> Self {
        Self::new("public_id", SortDirection::Desc)
    }
}

/// メディアストア
///
/// 画像の選択候補の検索と、投稿済みマーキングを担当するリポジトリ
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// 検索式に一致するアセットを最大 `max_results` 件返す
    ///
    /// # Errors
    ///
    /// バックエンドに到達できない、または応答に `resources` が無い場合。
    /// 0件は空のベクターで返す（エラーではない）
    async fn search(
        &self,
        expression: &str,
        max_results: u32,
        sort: Option<&SearchSort>,
    ) -> Result<Vec<Asset>>;

    /// URLから画像をダウンロード
    ///
    /// # Errors
    ///
    /// HTTPステータスが成功でない場合
    async fn fetch_binary(&self, url: &str) -> Result<BinaryPayload>;

    /// アセットIDを変更し、新しいIDを返す
    async fn rename(&self, old_id: &str, new_id: &str) -> Result<String>;

    /// 表示名を設定
    async fn set_display_label(&self, id: &str, label: &str) -> Result<()>;

    /// IDでアセットを取得
    async fn get_by_id(&self, id: &str) -> Result<Asset>;
}
