//! # Use Cases
//!
//! アプリケーション固有のビジネスフロー
//!
//! ## ユースケース
//!
//! - **PostRandomImageUseCase**: ランダム画像の選択から投稿済みマーキングまで

pub mod post_random_image;
