//! Adapter Layer
//!
//! 外部システム（HTTP変換サービス、ファイルシステム）との統合

pub mod candidate;
pub mod config;
pub mod http;
pub mod repositories;
