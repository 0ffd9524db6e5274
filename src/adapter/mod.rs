//! Adapter Layer
//!
//! 外部システム（Cloudinary, X API, 環境変数/設定ファイル）との統合

pub mod cloudinary;
pub mod config;
pub mod repositories;
pub mod twitter;
