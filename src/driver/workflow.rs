//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション
//!
//! 選択 → 送信 → 保存 → リセット を1回の実行で行い、状態が変わるたびに
//! スナップショットを描画する。

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

use crate::adapter::candidate::candidate_from_path;
use crate::adapter::config::{expand_path, Config};
use crate::adapter::http::client::GenerateClient;
use crate::adapter::repositories::directory_artifact_sink::DirectoryArtifactSink;
use crate::adapter::repositories::http_transform_repository::HttpTransformRepository;
use crate::adapter::repositories::temp_dir_handle_store::TempDirHandleStore;
use crate::application::use_cases::upload_workflow::UploadWorkflow;
use crate::domain::entities::workflow_state::WorkflowSnapshot;
use crate::domain::repositories::artifact_sink::ArtifactSink;
use crate::domain::repositories::handle_store::HandleStore;
use crate::domain::repositories::transform_repository::TransformRepository;

use super::cli::Args;
use super::render::{render_header, render_json, render_snapshot};

/// Resolve the output directory given on the command line
pub fn resolve_output_dir(output_dir: &str) -> PathBuf {
    PathBuf::from(expand_path(output_dir))
}

/// 1回の実行結果
#[derive(Debug, Default)]
pub struct RunReport {
    /// 描画したスナップショット（描画順）
    pub frames: Vec<WorkflowSnapshot>,
    /// 保存先（dry-run では `None`）
    pub saved_to: Option<PathBuf>,
}

/// Reel Crop Workflow
pub struct ReelCropWorkflow {
    config: Config,
    workflow: UploadWorkflow,
    snapshots: watch::Receiver<WorkflowSnapshot>,
}

impl ReelCropWorkflow {
    /// Create a new workflow instance with the real adapters
    pub fn new(config: Config, output_dir: &Path) -> Result<Self> {
        let handle_store = Arc::new(TempDirHandleStore::new()?);
        let client = GenerateClient::new(config.generate_endpoint())?;
        let transformer = Arc::new(HttpTransformRepository::new(client));
        let sink = Arc::new(DirectoryArtifactSink::new(output_dir));

        info!("Transform endpoint: {}", transformer.endpoint());
        info!("Handle directory: {}", handle_store.path().display());

        Ok(Self::with_dependencies(config, handle_store, transformer, sink))
    }

    /// Create a workflow instance with injected repositories
    pub fn with_dependencies(
        config: Config,
        handle_store: Arc<dyn HandleStore>,
        transformer: Arc<dyn TransformRepository>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Self {
        let workflow = UploadWorkflow::new(handle_store, transformer, sink);
        let snapshots = workflow.subscribe();

        Self {
            config,
            workflow,
            snapshots,
        }
    }

    /// 生存中のハンドル数
    pub fn live_handle_count(&self) -> usize {
        self.workflow.live_handle_count()
    }

    /// Execute the crop workflow for a single image
    pub async fn execute(&mut self, args: &Args) -> Result<RunReport> {
        info!("Starting reelcrop...");
        info!("Dry run: {}", args.dry_run);

        let mut report = RunReport::default();

        if !args.json {
            for line in render_header(&self.config.theme) {
                println!("{}", line);
            }
        }

        let candidate = candidate_from_path(&args.image)?;
        let selected = self.workflow.select_file(candidate);
        self.render_changes(args.json, &mut report)?;
        selected?;

        if args.dry_run {
            if !args.json {
                println!("✓ Dry-run mode (not submitting)");
            }
            self.workflow.reset();
            return Ok(report);
        }

        let pending = self.workflow.begin_submit()?;
        self.render_changes(args.json, &mut report)?;

        let outcome = pending.send().await;
        let completion = self.workflow.complete_submit(outcome);
        self.render_changes(args.json, &mut report)?;
        completion?;

        let saved_to = self.workflow.download().await?;
        if !args.json {
            println!("✓ Saved {}", saved_to.display());
        }
        report.saved_to = Some(saved_to);

        // 結果を保存したら一時ハンドルはすべて不要
        self.workflow.reset();

        if !args.json {
            println!("✓ Done!");
        }

        Ok(report)
    }

    fn render_changes(&mut self, json: bool, report: &mut RunReport) -> Result<()> {
        if !self.snapshots.has_changed().unwrap_or(false) {
            return Ok(());
        }
        let snapshot = self.snapshots.borrow_and_update().clone();

        if json {
            println!("{}", render_json(&snapshot)?);
        } else {
            for line in render_snapshot(&snapshot, &self.config.theme) {
                println!("{}", line);
            }
        }

        report.frames.push(snapshot);
        Ok(())
    }
}
