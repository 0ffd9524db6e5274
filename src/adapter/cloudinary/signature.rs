//! Cloudinary Upload API Signature
//!
//! Upload API（rename / explicit）のリクエスト署名

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// 署名対象から除外するパラメータ
const UNSIGNED_PARAMS: &[&str] = &["file", "cloud_name", "resource_type", "api_key", "signature"];

/// パラメータに署名する
///
/// キーのアルファベット順に `k=v` を `&` で連結し、末尾に API secret を付けて
/// SHA-256 の16進ダイジェストを取る。空の値は除外される
pub fn sign_params(params: &BTreeMap<String, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .filter(|(key, value)| !value.is_empty() && !UNSIGNED_PARAMS.contains(&key.as_str()))
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// 署名済みのフォームパラメータを組み立てる
///
/// `timestamp` を追加して署名し、`api_key` と `signature` を付与する
pub fn signed_form(
    mut params: BTreeMap<String, String>,
    api_key: &str,
    api_secret: &str,
    timestamp: i64,
) -> BTreeMap<String, String> {
    params.insert("timestamp".to_string(), timestamp.to_string());
    let signature = sign_params(&params, api_secret);
    params.insert("api_key".to_string(), api_key.to_string());
    params.insert("signature".to_string(), signature);
    params
}
