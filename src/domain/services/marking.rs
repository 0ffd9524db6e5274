//! # Marking Scheme
//!
//! 投稿済みマーキングのルール
//!
//! マーキング後のIDと、マーキング済みを除外する検索式は
//! 同じスキームから作られる。片方だけ変えると投稿済み画像が再選択される。

use serde::{Deserialize, Serialize};

/// 投稿済みマーキングの方式
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum MarkingScheme {
    /// 別フォルダへ移動（"Messi/a1" → "MessiPosted/a1"）
    Folder { posted_folder: String },
    /// IDにプレフィックスを付与（"Messi/a1" → "Posted-Messi/a1"）
    Prefix { prefix: String },
}

impl Default for MarkingScheme {
    fn default() -> Self {
        MarkingScheme::Folder {
            posted_folder: "MessiPosted".to_string(),
        }
    }
}

impl MarkingScheme {
    /// IDが既にマーキング済みか
    pub fn is_marked(&self, public_id: &str) -> bool {
        match self {
            MarkingScheme::Folder { posted_folder } => public_id
                .strip_prefix(posted_folder.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
            MarkingScheme::Prefix { prefix } => public_id.starts_with(prefix.as_str()),
        }
    }

    /// マーキング後のIDを返す
    ///
    /// マーキング済みのIDはそのまま返す（冪等）
    ///
    /// # 例
    ///
    /// ```
    /// use picpost::domain::services::MarkingScheme;
    ///
    /// let folder = MarkingScheme::Folder { posted_folder: "MessiPosted".to_string() };
    /// assert_eq!(folder.posted_id("Messi/a1", Some("Messi")), "MessiPosted/a1");
    ///
    /// let prefix = MarkingScheme::Prefix { prefix: "Posted-".to_string() };
    /// assert_eq!(prefix.posted_id("Messi/a1", Some("Messi")), "Posted-Messi/a1");
    /// ```
    pub fn posted_id(&self, public_id: &str, source_folder: Option<&str>) -> String {
        if self.is_marked(public_id) {
            return public_id.to_string();
        }

        match self {
            MarkingScheme::Folder { posted_folder } => {
                let rest = source_folder
                    .and_then(|folder| public_id.strip_prefix(folder))
                    .and_then(|rest| rest.strip_prefix('/'))
                    .unwrap_or(public_id);
                format!("{}/{}", posted_folder, rest)
            }
            MarkingScheme::Prefix { prefix } => format!("{}{}", prefix, public_id),
        }
    }

    /// マーキング済みを除外する検索式
    pub fn search_expression(&self, source_folder: Option<&str>) -> String {
        let folder_clause = source_folder.map(|folder| format!("folder:{}", quote(folder)));

        match self {
            // 移動済みのアセットはフォルダ条件で自然に除外される
            MarkingScheme::Folder { posted_folder } => match folder_clause {
                Some(clause) => clause,
                // folder: は完全一致なので、サブフォルダはワイルドカードで除外する
                None => {
                    let posted = quote(posted_folder);
                    format!("-folder:{} AND -folder:{}/*", posted, posted)
                }
            },
            MarkingScheme::Prefix { prefix } => {
                let exclusion = format!("-public_id:{}*", quote(prefix));
                match folder_clause {
                    Some(clause) => format!("{} AND {}", clause, exclusion),
                    None => exclusion,
                }
            }
        }
    }
}

/// 検索式の値に空白や記号が含まれる場合は引用符で囲む
fn quote(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/'));
    if plain {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}
