//! Temp Directory Handle Store
//!
//! HandleStoreのファイル実装（各ハンドルを一時ディレクトリ内のファイルとして保持）
//!
//! 表示層はハンドルの場所（ファイルパス）を開いて画像を表示できる。

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::domain::entities::handle::{HandleId, HandleRole};
use crate::domain::repositories::handle_store::{HandleStore, StoredHandle};

use super::lock_or_recover;

/// 一時ディレクトリのハンドルストア
///
/// ストアを drop すると一時ディレクトリごと削除される
pub struct TempDirHandleStore {
    dir: TempDir,
    next_id: AtomicU64,
    live: Mutex<HashMap<HandleId, PathBuf>>,
}

impl TempDirHandleStore {
    /// 新しい一時ディレクトリを作成してストアを初期化
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("reelcrop-")
            .tempdir()
            .context("Failed to create handle directory")?;
        debug!("Handle directory: {}", dir.path().display());

        Ok(Self {
            dir,
            next_id: AtomicU64::new(0),
            live: Mutex::new(HashMap::new()),
        })
    }

    /// 一時ディレクトリのパス
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl HandleStore for TempDirHandleStore {
    fn create(&self, role: HandleRole, data: Vec<u8>) -> Result<StoredHandle> {
        let id = HandleId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let path = self.dir.path().join(format!("{}-{}", role, id.0));

        fs::write(&path, data)
            .with_context(|| format!("Failed to write handle file {}", path.display()))?;
        lock_or_recover(&self.live).insert(id, path.clone());

        Ok(StoredHandle {
            id,
            location: path.display().to_string(),
        })
    }

    fn read(&self, id: HandleId) -> Result<Vec<u8>> {
        let path = lock_or_recover(&self.live)
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("Handle {} is not live", id))?;

        fs::read(&path).with_context(|| format!("Failed to read handle file {}", path.display()))
    }

    fn release(&self, id: HandleId) -> Result<()> {
        let Some(path) = lock_or_recover(&self.live).remove(&id) else {
            bail!("Handle {} is not live (already released?)", id);
        };

        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove handle file {}", path.display()))
    }
}
