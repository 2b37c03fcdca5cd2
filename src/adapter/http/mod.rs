//! HTTP Adapter Modules
//!
//! 変換サービス（`POST /generate`）との通信

pub mod client;
