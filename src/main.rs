//! Reelcrop - Instagram Reel Image Generator
//!
//! 画像を縦長のリール用画像に変換して保存

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use reelcrop::adapter::config::Config;
use reelcrop::driver::{resolve_output_dir, Args, ReelCropWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (defaults when the file is absent)
    let config = Config::load_or_default(&args.config)?;

    // Create workflow with injected dependencies
    let output_dir = resolve_output_dir(&args.output_dir);
    let mut workflow = ReelCropWorkflow::new(config, &output_dir)?;

    workflow.execute(&args).await?;
    Ok(())
}
