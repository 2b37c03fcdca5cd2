//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **UploadWorkflow**: ファイル選択・送信・ダウンロード・リセットの制御

pub mod upload_workflow;
