//! # CandidateFile Entity
//!
//! ユーザーが選択した（まだ検証前の）入力ファイル

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// 候補ファイルの内容の所在
///
/// 検証は内容を読まないため、ディスク上のファイルは受理されるまで読み込まない
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateContent {
    /// メモリ上のデータ
    Memory(Vec<u8>),
    /// ディスク上のファイル
    Disk(PathBuf),
}

/// 候補ファイル
///
/// ファイル選択やドラッグ＆ドロップから得られる生の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// ファイル名
    pub name: String,
    /// 宣言されたメディアタイプ
    pub media_type: String,
    /// 宣言されたバイトサイズ
    pub size: u64,
    /// 内容
    pub content: CandidateContent,
}

impl CandidateFile {
    /// メモリ上のデータから候補ファイルを作成
    ///
    /// サイズはデータ長から決まる
    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: data.len() as u64,
            content: CandidateContent::Memory(data),
        }
    }

    /// 内容を読み込む
    ///
    /// # Errors
    ///
    /// ディスク上のファイルが読めない場合にエラーを返す
    pub fn read_content(&self) -> Result<Vec<u8>> {
        match &self.content {
            CandidateContent::Memory(data) => Ok(data.clone()),
            CandidateContent::Disk(path) => fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// 内容を読み込んで選択済みファイルに変換
    pub fn into_selected(self) -> Result<SelectedFile> {
        let data = self.read_content()?;
        Ok(SelectedFile {
            name: self.name,
            media_type: self.media_type,
            size: self.size,
            data,
        })
    }
}

/// 検証済みで内容を読み込んだファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// スナップショット用の要約
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            size: self.size,
        }
    }
}

/// 選択済みファイルの要約（内容を含まない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub media_type: String,
    pub size: u64,
}
