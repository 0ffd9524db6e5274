//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクト

pub mod asset;
pub mod post_report;

pub use asset::{Asset, BinaryPayload, MediaHandle};
pub use post_report::{PostReport, RunStatus};
