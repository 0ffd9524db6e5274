//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（HTTPやCloudinary/Xについて何も知らない）
//! - 純粋なビジネスロジック（選択・マーキングのルール）
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Asset, MediaHandle, PostReportなど）
//! - **errors**: パイプラインのエラー分類
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（ランダム選択、投稿済みマーキング）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
