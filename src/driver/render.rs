//! Snapshot Rendering
//!
//! スナップショットをテーマに従って端末向けの行に変換
//!
//! 状態を読むだけで、ワークフローには一切触れない。

use anyhow::{Context, Result};

use crate::adapter::config::ThemeConfig;
use crate::domain::entities::candidate_file::FileSummary;
use crate::domain::entities::workflow_state::{Phase, WorkflowSnapshot};

/// Human readable byte size
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MIB {
        format!("{:.1} MB", bytes_f / MIB)
    } else if bytes_f >= KIB {
        format!("{:.1} KB", bytes_f / KIB)
    } else {
        format!("{} B", bytes)
    }
}

fn describe_file(file: &FileSummary) -> String {
    format!(
        "{} ({}, {})",
        file.name,
        file.media_type,
        format_size(file.size)
    )
}

/// 実行開始時に一度だけ表示する見出し
pub fn render_header(theme: &ThemeConfig) -> Vec<String> {
    let mut lines = vec![
        theme.title.clone(),
        format!("  {}", theme.subtitle),
        format!("  {}", theme.description),
    ];
    lines.extend(
        theme
            .features
            .iter()
            .map(|feature| format!("  • {}: {}", feature.title, feature.description)),
    );
    lines
}

/// スナップショットを表示用の行に変換
pub fn render_snapshot(snapshot: &WorkflowSnapshot, theme: &ThemeConfig) -> Vec<String> {
    let mut lines = Vec::new();

    match snapshot.phase {
        Phase::Idle => {
            lines.push(theme.upload_title.clone());
            lines.push(format!("  {}", theme.supported_formats));
            lines.push(format!("  {}", theme.max_size));
        }
        Phase::Ready => {
            lines.push(theme.ready_title.clone());
            lines.push(format!("  Next: {}", theme.primary_cta));
        }
        Phase::Processing => {
            lines.push(theme.processing_title.clone());
            lines.push(format!("  {}", theme.processing_subtitle));
        }
        Phase::Completed => {
            lines.push(format!("★ {}", theme.result_title));
            lines.push(format!("  {}", theme.result_subtitle));
            lines.push(format!("  Next: {}", theme.download_text));
        }
    }

    if let Some(file) = &snapshot.file {
        lines.push(format!("  Original: {}", describe_file(file)));
    }
    if let Some(preview) = &snapshot.preview {
        lines.push(format!("  Preview:  {}", preview.location));
    }
    if let Some(result) = &snapshot.result {
        lines.push(format!("  Result:   {}", result.location));
    }
    if let Some(error) = &snapshot.error {
        lines.push(format!("✗ {}", error));
    }

    lines
}

/// スナップショットを1行のJSONに変換
pub fn render_json(snapshot: &WorkflowSnapshot) -> Result<String> {
    serde_json::to_string(snapshot).context("Failed to serialize snapshot")
}
