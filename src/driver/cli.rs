//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

/// スクリーンショットをInstagramリール用の縦長画像に変換するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "reelcrop")]
#[command(about = "Turn a screenshot into a vertical Instagram Reel image", long_about = None)]
pub struct Args {
    /// Image to transform
    pub image: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = "./reelcrop.json")]
    pub config: String,

    /// Directory the transformed image is saved into
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Dry run mode - validate and preview only, don't submit
    #[arg(long)]
    pub dry_run: bool,

    /// Print each state snapshot as a JSON line
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["reelcrop", "shot.png"]);
        assert_eq!(args.image, PathBuf::from("shot.png"));
        assert_eq!(args.config, "./reelcrop.json");
        assert_eq!(args.output_dir, ".");
        assert!(!args.dry_run);
        assert!(!args.json);
    }

    #[test]
    fn test_args_dry_run() {
        let args = Args::parse_from(["reelcrop", "--dry-run", "shot.png"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_args_custom_paths() {
        let args = Args::parse_from([
            "reelcrop",
            "-c",
            "/custom/reelcrop.json",
            "-o",
            "/tmp/out",
            "shot.png",
        ]);
        assert_eq!(args.config, "/custom/reelcrop.json");
        assert_eq!(args.output_dir, "/tmp/out");
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from(["reelcrop", "--json", "--dry-run", "shot.png"]);
        assert!(args.json);
        assert!(args.dry_run);
    }

    #[test]
    fn test_args_image_required() {
        assert!(Args::try_parse_from(["reelcrop"]).is_err());
    }
}
