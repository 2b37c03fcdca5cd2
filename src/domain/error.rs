//! # Workflow Errors
//!
//! ワークフローのエラー分類

use thiserror::Error;

use super::entities::workflow_state::Phase;

/// リモート変換サービスとのやり取りで発生した失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// 2xx 以外のHTTPステータス
    #[error("Server error: {0}")]
    Status(u16),

    /// 接続失敗やレスポンス本文の読み込み失敗
    #[error("Network error: {0}")]
    Transport(String),

    /// レスポンスは受け取れたが結果ハンドルを作成できなかった
    #[error("Failed to process image: {0}")]
    Processing(String),
}

/// ワークフローのエラー
///
/// すべて回復可能で、`dismiss_error` または `reset` で解消できる
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// 宣言されたメディアタイプが `image/` で始まらない
    #[error("Please select a valid image file")]
    InvalidFileType { media_type: String },

    /// サイズ上限を超えている
    #[error("File size must be less than 10MB")]
    FileTooLarge { size: u64, limit: u64 },

    /// リモート処理の失敗
    #[error(transparent)]
    RemoteFailure(#[from] RemoteError),

    /// 処理中のファイル選択
    #[error("Cannot select a new file while the workflow is {0}")]
    SelectNotAllowed(Phase),

    /// `Ready` 以外のフェーズでの送信
    #[error("Cannot submit while the workflow is {0}")]
    SubmitNotAllowed(Phase),

    /// 結果がない状態でのダウンロード
    #[error("No transformed image is available to download")]
    NoResult,

    /// ファイル内容の読み込みやハンドル作成の失敗
    #[error("Failed to prepare image: {0}")]
    Resource(String),

    /// 保存先への書き込み失敗
    #[error("Failed to save image: {0}")]
    Download(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let invalid = WorkflowError::InvalidFileType {
            media_type: "text/plain".to_string(),
        };
        assert_eq!(invalid.to_string(), "Please select a valid image file");

        let too_large = WorkflowError::FileTooLarge {
            size: 20,
            limit: 10,
        };
        assert_eq!(too_large.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn test_remote_failure_is_transparent() {
        let err: WorkflowError = RemoteError::Status(500).into();
        assert_eq!(err.to_string(), "Server error: 500");

        let err: WorkflowError = RemoteError::Transport("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_submit_not_allowed_names_phase() {
        let err = WorkflowError::SubmitNotAllowed(Phase::Processing);
        assert_eq!(err.to_string(), "Cannot submit while the workflow is processing");

        let err = WorkflowError::SelectNotAllowed(Phase::Processing);
        assert_eq!(
            err.to_string(),
            "Cannot select a new file while the workflow is processing"
        );
    }
}
