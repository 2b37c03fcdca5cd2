//! Directory Artifact Sink
//!
//! ArtifactSinkのファイルシステム実装（出力ディレクトリに保存）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::artifact_sink::ArtifactSink;

/// 出力ディレクトリへの保存先
pub struct DirectoryArtifactSink {
    dir: PathBuf,
}

impl DirectoryArtifactSink {
    /// 新しい保存先を作成
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// ファイルに保存する（同期処理）
    fn save_sync(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let path = dir.join(file_name);
        fs::write(&path, data)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl ArtifactSink for DirectoryArtifactSink {
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf> {
        let dir = self.dir.clone();
        let file_name = file_name.to_string();
        let data = data.to_vec();

        tokio::task::spawn_blocking(move || Self::save_sync(&dir, &file_name, &data))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}
