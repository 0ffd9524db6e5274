//! Cloudinary Integration
//!
//! Cloudinary（メディアライブラリ）との連携

pub mod client;
pub mod models;
pub mod signature;
