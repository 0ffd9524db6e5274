//! # Data Transfer Objects
//!
//! レイヤー間でやり取りする設定値

pub mod post_config;
