//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod directory_artifact_sink;
pub mod http_transform_repository;
pub mod memory_handle_store;
pub mod temp_dir_handle_store;

use std::sync::{Mutex, MutexGuard};

/// ロックを取得する（ポイズンされていても中身を取り出して続行）
///
/// ハンドルの解放は `Drop` から呼ばれるため、別スレッドのパニックで
/// 解放できなくなってはいけない。
pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
