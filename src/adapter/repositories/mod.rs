//! Repository Implementations
//!
//! Domain層のRepository traitの具体的な実装

pub mod cloudinary_media_store;
pub mod twitter_social_publisher;
