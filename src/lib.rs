//! # Reelcrop
//!
//! スクリーンショットを変換サービスに送り、Instagramリール用の縦長画像を受け取るツール
//!
//! 4層のクリーンアーキテクチャで構成されています：
//!
//! - **Domain層**: 状態・遷移・ハンドルの所有権（外部依存なし）
//! - **Application層**: アップロードワークフロー（ユースケース）
//! - **Adapter層**: HTTP変換サービス、ファイルシステム、設定
//! - **Driver層**: CLI、描画、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
