//! In-Memory Handle Store
//!
//! HandleStoreのメモリ実装（発行と解放をジャーナルに記録する）

use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::entities::handle::{HandleId, HandleRole};
use crate::domain::repositories::handle_store::{HandleStore, StoredHandle};

use super::lock_or_recover;

/// ジャーナルに記録されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleEvent {
    Created(HandleId, HandleRole),
    Released(HandleId),
}

/// メモリ上のハンドルストア
#[derive(Debug, Default)]
pub struct MemoryHandleStore {
    next_id: AtomicU64,
    entries: Mutex<HashMap<HandleId, (HandleRole, Vec<u8>)>>,
    journal: Mutex<Vec<HandleEvent>>,
}

impl MemoryHandleStore {
    /// 新しいストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 生存中のハンドル数
    pub fn live_count(&self) -> usize {
        lock_or_recover(&self.entries).len()
    }

    /// 指定した役割の生存ハンドル
    pub fn live_ids_with_role(&self, role: HandleRole) -> Vec<HandleId> {
        let mut ids: Vec<HandleId> = lock_or_recover(&self.entries)
            .iter()
            .filter(|(_, (r, _))| *r == role)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// これまでの発行・解放の記録
    pub fn journal(&self) -> Vec<HandleEvent> {
        lock_or_recover(&self.journal).clone()
    }

    /// 指定したハンドルが解放された回数
    pub fn release_count(&self, id: HandleId) -> usize {
        lock_or_recover(&self.journal)
            .iter()
            .filter(|event| **event == HandleEvent::Released(id))
            .count()
    }

    fn record(&self, event: HandleEvent) {
        lock_or_recover(&self.journal).push(event);
    }
}

impl HandleStore for MemoryHandleStore {
    fn create(&self, role: HandleRole, data: Vec<u8>) -> Result<StoredHandle> {
        let id = HandleId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        lock_or_recover(&self.entries).insert(id, (role, data));
        self.record(HandleEvent::Created(id, role));

        Ok(StoredHandle {
            id,
            location: format!("memory://{}/{}", role, id.0),
        })
    }

    fn read(&self, id: HandleId) -> Result<Vec<u8>> {
        lock_or_recover(&self.entries)
            .get(&id)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| anyhow!("Handle {} is not live", id))
    }

    fn release(&self, id: HandleId) -> Result<()> {
        if lock_or_recover(&self.entries).remove(&id).is_none() {
            bail!("Handle {} is not live (already released?)", id);
        }
        self.record(HandleEvent::Released(id));
        Ok(())
    }
}
