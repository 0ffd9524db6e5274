//! # Asset Entity
//!
//! メディアライブラリ上の画像と、パイプライン中で扱う値オブジェクト

/// デフォルトのMIMEタイプ（Content-Typeが取得できない場合）
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// メディアライブラリ上の1つの画像
///
/// `public_id` は一意だが可変（投稿後にリネームされる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// アセットID（例: "Messi/a1"）
    pub public_id: String,
    /// HTTPSの配信URL
    pub secure_url: String,
    /// 所属フォルダ（APIが返した場合のみ）
    pub folder: Option<String>,
}

impl Asset {
    /// 新しいアセットを作成
    pub fn new(public_id: impl Into<String>, secure_url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            secure_url: secure_url.into(),
            folder: None,
        }
    }

    /// フォルダ付きで作成
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// IDの最後のセグメント（"Messi/a1" → "a1"）
    pub fn base_name(&self) -> &str {
        base_name(&self.public_id)
    }
}

/// IDの最後のパスセグメントを返す
pub fn base_name(public_id: &str) -> &str {
    public_id.rsplit('/').next().unwrap_or(public_id)
}

/// ダウンロードした画像データ
///
/// 1回の実行だけが所有し、アップロード後に破棄される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl BinaryPayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// バイト列への参照
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// バイト列の所有権を移動して返す
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// ソーシャル側でアップロード後に返されるメディアID
///
/// 投稿の作成で1回だけ使われる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
