//! # Driver Layer (Presentation)
//!
//! CLIを提供し、全ての依存を組み立てる
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **render**: スナップショットの描画（テキスト / JSON）
//! - **workflow**: 1回の実行のオーケストレーション

pub mod cli;
pub mod render;
pub mod workflow;

pub use cli::Args;
pub use workflow::{resolve_output_dir, ReelCropWorkflow, RunReport};
