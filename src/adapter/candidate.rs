//! Candidate Acquisition
//!
//! ファイルシステム上のパスから候補ファイルを作成
//!
//! メディアタイプは拡張子から、サイズはメタデータから宣言する。
//! 内容はここでは読まない。

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::domain::entities::candidate_file::{CandidateContent, CandidateFile};

/// 未知の拡張子に対して宣言するメディアタイプ
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("mp4", "video/mp4"),
];

/// 拡張子から宣言メディアタイプを決める
pub fn declared_media_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MEDIA_TYPE;
    };
    let ext = ext.to_ascii_lowercase();

    MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

/// パスから候補ファイルを作成
///
/// # Errors
///
/// メタデータが読めない場合、またはパスが通常ファイルでない場合にエラーを返す
pub fn candidate_from_path(path: &Path) -> Result<CandidateFile> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(CandidateFile {
        name,
        media_type: declared_media_type(path).to_string(),
        size: metadata.len(),
        content: CandidateContent::Disk(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_declared_media_type_images() {
        assert_eq!(declared_media_type(Path::new("a.png")), "image/png");
        assert_eq!(declared_media_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(declared_media_type(Path::new("dir/a.jpeg")), "image/jpeg");
        assert_eq!(declared_media_type(Path::new("a.svg")), "image/svg+xml");
    }

    #[test]
    fn test_declared_media_type_non_images() {
        assert_eq!(declared_media_type(Path::new("notes.txt")), "text/plain");
        assert_eq!(declared_media_type(Path::new("archive.zip")), FALLBACK_MEDIA_TYPE);
        assert_eq!(declared_media_type(Path::new("Makefile")), FALLBACK_MEDIA_TYPE);
    }

    #[test]
    fn test_candidate_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("screenshot.png");
        fs::write(&path, vec![0u8; 128]).unwrap();

        let candidate = candidate_from_path(&path).unwrap();

        assert_eq!(candidate.name, "screenshot.png");
        assert_eq!(candidate.media_type, "image/png");
        assert_eq!(candidate.size, 128);
        assert_eq!(candidate.content, CandidateContent::Disk(path));
    }

    #[test]
    fn test_candidate_from_missing_path() {
        assert!(candidate_from_path(Path::new("/nonexistent/screenshot.png")).is_err());
    }

    #[test]
    fn test_candidate_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(candidate_from_path(temp_dir.path()).is_err());
    }
}
