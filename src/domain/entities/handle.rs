//! # Handle Entity
//!
//! プレビュー・結果画像を参照する一時ハンドル
//!
//! `Handle` は所有権で寿命を管理する。`Clone` を実装せず、`Drop` でストアから
//! 解放されるため、解放はちょうど一回になる。

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, warn};
use serde::Serialize;

use crate::domain::repositories::handle_store::HandleStore;

/// ハンドルID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// ハンドルの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleRole {
    Preview,
    Result,
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleRole::Preview => f.write_str("preview"),
            HandleRole::Result => f.write_str("result"),
        }
    }
}

/// スナップショットに載せる非所有のハンドル表現
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandleView {
    pub id: HandleId,
    pub role: HandleRole,
    pub location: String,
}

/// 一時ハンドル
pub struct Handle {
    id: HandleId,
    role: HandleRole,
    location: String,
    store: Arc<dyn HandleStore>,
}

impl Handle {
    /// データをストアに登録してハンドルを取得
    ///
    /// # Errors
    ///
    /// ストアへの登録に失敗した場合にエラーを返す
    pub fn acquire(store: &Arc<dyn HandleStore>, role: HandleRole, data: Vec<u8>) -> Result<Self> {
        let stored = store.create(role, data)?;
        debug!("Acquired {} handle {} at {}", role, stored.id, stored.location);

        Ok(Self {
            id: stored.id,
            role,
            location: stored.location,
            store: Arc::clone(store),
        })
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn role(&self) -> HandleRole {
        self.role
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// 参照先のデータを読み出す
    pub fn read(&self) -> Result<Vec<u8>> {
        self.store.read(self.id)
    }

    /// 非所有のビューを作成
    pub fn view(&self) -> HandleView {
        HandleView {
            id: self.id,
            role: self.role,
            location: self.location.clone(),
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        match self.store.release(self.id) {
            Ok(()) => debug!("Released {} handle {}", self.role, self.id),
            Err(e) => warn!("Failed to release {} handle {}: {}", self.role, self.id, e),
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("location", &self.location)
            .finish()
    }
}
