//! # File Validation Service
//!
//! 候補ファイルの検証
//!
//! 宣言されたメディアタイプとサイズのみを見る同期的なチェックで、
//! 内容は読まない。

use crate::domain::entities::candidate_file::CandidateFile;
use crate::domain::error::WorkflowError;

/// 受け付けるファイルサイズの上限（10 MiB）
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 受け付けるメディアタイプの接頭辞
pub const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";

/// 検証サービス
pub struct FileValidationService;

impl FileValidationService {
    /// 候補ファイルを検証
    ///
    /// メディアタイプを先に、サイズを後に検査する。
    ///
    /// # 例
    ///
    /// ```
    /// use reelcrop::domain::entities::candidate_file::CandidateFile;
    /// use reelcrop::domain::error::WorkflowError;
    /// use reelcrop::domain::services::file_validation::{FileValidationService, MAX_FILE_SIZE};
    ///
    /// let png = CandidateFile::from_bytes("shot.png", "image/png", vec![0; 16]);
    /// assert!(FileValidationService::validate(&png, MAX_FILE_SIZE).is_ok());
    ///
    /// let text = CandidateFile::from_bytes("notes.txt", "text/plain", vec![0; 16]);
    /// assert!(matches!(
    ///     FileValidationService::validate(&text, MAX_FILE_SIZE),
    ///     Err(WorkflowError::InvalidFileType { .. })
    /// ));
    /// ```
    pub fn validate(candidate: &CandidateFile, max_size: u64) -> Result<(), WorkflowError> {
        if !Self::is_image_media_type(&candidate.media_type) {
            return Err(WorkflowError::InvalidFileType {
                media_type: candidate.media_type.clone(),
            });
        }

        if candidate.size > max_size {
            return Err(WorkflowError::FileTooLarge {
                size: candidate.size,
                limit: max_size,
            });
        }

        Ok(())
    }

    /// メディアタイプが画像を示すか
    pub fn is_image_media_type(media_type: &str) -> bool {
        media_type.starts_with(IMAGE_MEDIA_TYPE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::candidate_file::CandidateContent;
    use std::path::PathBuf;

    fn candidate(media_type: &str, size: u64) -> CandidateFile {
        // 検証が内容を読まないことを確かめるため、存在しないパスを使う
        CandidateFile {
            name: "input".to_string(),
            media_type: media_type.to_string(),
            size,
            content: CandidateContent::Disk(PathBuf::from("/nonexistent/input")),
        }
    }

    #[test]
    fn test_accepts_image_types() {
        for media_type in ["image/png", "image/jpeg", "image/webp", "image/svg+xml"] {
            assert!(
                FileValidationService::validate(&candidate(media_type, 1), MAX_FILE_SIZE).is_ok(),
                "{} should be accepted",
                media_type
            );
        }
    }

    #[test]
    fn test_rejects_non_image_types() {
        for media_type in ["text/plain", "application/pdf", "", "Image/png", "video/mp4"] {
            let result = FileValidationService::validate(&candidate(media_type, 1), MAX_FILE_SIZE);
            assert_eq!(
                result,
                Err(WorkflowError::InvalidFileType {
                    media_type: media_type.to_string()
                })
            );
        }
    }

    #[test]
    fn test_size_boundary() {
        assert!(
            FileValidationService::validate(&candidate("image/png", MAX_FILE_SIZE), MAX_FILE_SIZE)
                .is_ok()
        );

        let result =
            FileValidationService::validate(&candidate("image/png", MAX_FILE_SIZE + 1), MAX_FILE_SIZE);
        assert_eq!(
            result,
            Err(WorkflowError::FileTooLarge {
                size: MAX_FILE_SIZE + 1,
                limit: MAX_FILE_SIZE
            })
        );
    }

    #[test]
    fn test_type_checked_before_size() {
        let result =
            FileValidationService::validate(&candidate("text/plain", MAX_FILE_SIZE * 2), MAX_FILE_SIZE);
        assert!(matches!(result, Err(WorkflowError::InvalidFileType { .. })));
    }

    #[test]
    fn test_max_file_size_is_ten_mebibytes() {
        assert_eq!(MAX_FILE_SIZE, 10_485_760);
    }
}
