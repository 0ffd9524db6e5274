//! Cloudinary Wire Models
//!
//! Cloudinary API のリクエスト/レスポンス

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::entities::Asset;
use crate::domain::repositories::media_store::SearchSort;

/// `POST /resources/search` のリクエスト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub expression: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort_by: Vec<BTreeMap<String, String>>,
    pub max_results: u32,
}

impl SearchRequest {
    pub fn new(expression: &str, max_results: u32, sort: Option<&SearchSort>) -> Self {
        let sort_by = sort
            .map(|s| {
                let mut entry = BTreeMap::new();
                entry.insert(s.field.clone(), s.direction.as_str().to_string());
                vec![entry]
            })
            .unwrap_or_default();

        Self {
            expression: expression.to_string(),
            sort_by,
            max_results,
        }
    }
}

/// `POST /resources/search` のレスポンス
///
/// `resources` が無い場合は「応答なし」として扱う
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub resources: Option<Vec<Resource>>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// 1つのリソース
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resource {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub asset_folder: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Resource {
    /// ドメインのアセットに変換
    pub fn into_asset(self) -> Asset {
        // asset_folder は動的フォルダモード、folder は固定フォルダモード
        let non_empty = |f: &String| !f.is_empty();
        let folder = self
            .asset_folder
            .filter(non_empty)
            .or(self.folder.filter(non_empty));

        Asset {
            public_id: self.public_id,
            secure_url: self.secure_url,
            folder,
        }
    }
}

/// エラーレスポンス `{"error": {"message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}
