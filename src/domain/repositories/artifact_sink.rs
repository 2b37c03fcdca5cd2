//! # Artifact Sink Trait
//!
//! 変換結果の保存先を抽象化

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// 成果物の保存先
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// データを指定した名前で保存し、保存先のパスを返す
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf>;
}
