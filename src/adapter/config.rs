//! Configuration
//!
//! JSON設定ファイルの読み込みとバックエンドURLの解決

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// バックエンドURLテンプレート内のプレースホルダ
pub const BACKEND_ROOT_PLACEHOLDER: &str = "$BACKEND_ROOT_URL";

/// デプロイ先のルートURLを渡す環境変数
pub const BACKEND_URL_ENV: &str = "REELCROP_BACKEND_URL";

/// ルートURLが未設定のときに使うローカルのオリジン
pub const DEFAULT_BACKEND_ROOT: &str = "http://localhost:8000";

/// Path of the transformation endpoint, relative to the base URL
pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// `$BACKEND_ROOT_URL` を含むURLテンプレート
    pub backend_url: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_ROOT_PLACEHOLDER.to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

/// 表示層のテーマ（文言）
///
/// ワークフローのロジックには影響しない。サイズ上限やダウンロード名は
/// 固定値なので、ここで変えられるのは表示だけ。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub features: Vec<FeatureConfig>,
    pub upload_title: String,
    pub supported_formats: String,
    pub max_size: String,
    pub ready_title: String,
    pub processing_title: String,
    pub processing_subtitle: String,
    pub result_title: String,
    pub result_subtitle: String,
    pub primary_cta: String,
    pub download_text: String,
}

/// 機能紹介の1項目
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeatureConfig {
    pub title: String,
    pub description: String,
}

impl FeatureConfig {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title: "Instagram Reel Vertical Image Generator".to_string(),
            subtitle: "Upload your screenshot and get a Reel-ready vertical image with a matching background."
                .to_string(),
            description: "Automatically fits any screenshot onto a 1080x1920 canvas filled with its dominant color."
                .to_string(),
            features: vec![
                FeatureConfig::new("Fast", "Get your vertical image in seconds"),
                FeatureConfig::new("Reel-ready", "Sized for Instagram Reels and Stories"),
                FeatureConfig::new("Smart background", "Matches the dominant color of your image"),
                FeatureConfig::new("Private", "Images are processed and never stored"),
            ],
            upload_title: "Upload your image".to_string(),
            supported_formats: "Supports PNG, JPG, GIF and WebP".to_string(),
            max_size: "Maximum file size: 10MB".to_string(),
            ready_title: "Ready to Process".to_string(),
            processing_title: "Processing".to_string(),
            processing_subtitle: "Processing your image...".to_string(),
            result_title: "Your Reel image is ready".to_string(),
            result_subtitle: "Download it and share it on Instagram".to_string(),
            primary_cta: "Transform Image".to_string(),
            download_text: "Download Image".to_string(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    /// 設定ファイルを読み込む（存在しない場合はデフォルト）
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(&expand_path(path)).exists() {
            info!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// 環境変数からルートURLを読み込み、ベースURLを解決
    pub fn resolve_backend_url(&self) -> String {
        let root = std::env::var(BACKEND_URL_ENV).ok();
        resolve_base_url(&self.backend_url, root.as_deref())
    }

    /// `/generate` エンドポイントのURL
    pub fn generate_endpoint(&self) -> String {
        format!("{}{}", self.resolve_backend_url(), GENERATE_PATH)
    }

}

/// Substitutes the deployment root into the URL template.
///
/// A missing or blank root falls back to [`DEFAULT_BACKEND_ROOT`]; trailing
/// slashes are trimmed so that [`GENERATE_PATH`] can be appended directly.
pub fn resolve_base_url(template: &str, root: Option<&str>) -> String {
    let root = root
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_BACKEND_ROOT);

    template
        .replace(BACKEND_ROOT_PLACEHOLDER, root)
        .trim_end_matches('/')
        .to_string()
}

/// Expands tilde in path
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
