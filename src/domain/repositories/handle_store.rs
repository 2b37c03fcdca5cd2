//! # Handle Store Trait
//!
//! 一時的なバイナリハンドルの保管を抽象化

use anyhow::Result;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::handle::{HandleId, HandleRole};

/// ストアに登録されたハンドルの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredHandle {
    /// ハンドルID
    pub id: HandleId,
    /// 表示層がデータを参照するための場所（パスやURIなど）
    pub location: String,
}

/// ハンドルストア
///
/// バイナリデータを一時的に保持し、ハンドル単位で解放する。
/// `release` は同期的に呼ばれる（`Drop` から呼び出されるため）。
#[cfg_attr(test, automock)]
pub trait HandleStore: Send + Sync {
    /// データを登録して新しいハンドルを発行
    ///
    /// # Errors
    ///
    /// データの保存に失敗した場合にエラーを返す
    fn create(&self, role: HandleRole, data: Vec<u8>) -> Result<StoredHandle>;

    /// ハンドルが参照するデータを読み出す
    ///
    /// # Errors
    ///
    /// 未知のハンドル、または読み込みに失敗した場合にエラーを返す
    fn read(&self, id: HandleId) -> Result<Vec<u8>>;

    /// ハンドルを解放
    ///
    /// # Errors
    ///
    /// 未知のハンドル（二重解放を含む）の場合にエラーを返す
    fn release(&self, id: HandleId) -> Result<()>;
}
