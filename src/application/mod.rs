//! # Application Layer
//!
//! 投稿パイプライン（ユースケース）
//!
//! ## 特徴
//!
//! - 選択・ダウンロード・アップロード・投稿・マーキングを順番に実行
//! - Repository traitに依存（Cloudinary / X の実装には依存しない）
//! - どの失敗で中断し、どの失敗で続行するかをここで決める
//!
//! ## 構成要素
//!
//! - **dto**: パイプライン設定
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
