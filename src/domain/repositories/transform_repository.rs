//! # Transform Repository Trait
//!
//! リモート画像変換サービスの呼び出しを抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::candidate_file::SelectedFile;
use crate::domain::error::RemoteError;

/// 変換サービスに送るアップロード内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// ファイル名
    pub file_name: String,
    /// 宣言されたメディアタイプ
    pub media_type: String,
    /// 画像データ
    pub data: Vec<u8>,
}

impl From<&SelectedFile> for ImageUpload {
    fn from(file: &SelectedFile) -> Self {
        Self {
            file_name: file.name.clone(),
            media_type: file.media_type.clone(),
            data: file.data.clone(),
        }
    }
}

/// 変換リポジトリ
///
/// 1回の呼び出しで1回だけリクエストを送る。リトライはしない。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransformRepository: Send + Sync {
    /// 画像を変換して結果のバイナリを返す
    ///
    /// # Errors
    ///
    /// 2xx 以外のステータスや通信エラーの場合に [`RemoteError`] を返す
    async fn transform(&self, upload: &ImageUpload) -> Result<Vec<u8>, RemoteError>;
}
