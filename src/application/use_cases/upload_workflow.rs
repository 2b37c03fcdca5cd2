//! # Upload Workflow Use Case
//!
//! 画像の選択・送信・ダウンロード・リセットを制御するユースケース
//!
//! 状態は [`UploadWorkflow`] が排他的に所有し、遷移はすべて
//! [`reduce`] を通して行う。表示層は [`WorkflowSnapshot`] だけを受け取る。

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::domain::entities::candidate_file::CandidateFile;
use crate::domain::entities::handle::{Handle, HandleRole};
use crate::domain::entities::workflow_state::{Phase, RequestId, WorkflowSnapshot, WorkflowState};
use crate::domain::error::{RemoteError, WorkflowError};
use crate::domain::repositories::artifact_sink::ArtifactSink;
use crate::domain::repositories::handle_store::HandleStore;
use crate::domain::repositories::transform_repository::{ImageUpload, TransformRepository};
use crate::domain::services::file_validation::{FileValidationService, MAX_FILE_SIZE};
use crate::domain::services::transition::{reduce, WorkflowEvent};

/// ダウンロード時の固定ファイル名（結果の実際の形式によらない）
pub const DOWNLOAD_FILE_NAME: &str = "instagram-reel-cropped.png";

/// 送信待ちのリクエスト
///
/// [`UploadWorkflow::begin_submit`] が返す。`send` はワークフローの状態に触れない。
pub struct PendingRequest {
    id: RequestId,
    upload: ImageUpload,
    transformer: Arc<dyn TransformRepository>,
}

impl PendingRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// リクエストを1回だけ送信して結果を返す
    pub async fn send(self) -> RequestOutcome {
        debug!(
            "Sending {} ({} bytes) as {}",
            self.upload.file_name,
            self.upload.data.len(),
            self.id
        );
        let result = self.transformer.transform(&self.upload).await;
        RequestOutcome {
            id: self.id,
            result,
        }
    }
}

/// リクエストの結果
#[derive(Debug)]
pub struct RequestOutcome {
    pub id: RequestId,
    pub result: Result<Vec<u8>, RemoteError>,
}

/// 結果の適用状況
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 現在の状態に適用された
    Applied,
    /// 待っていないリクエストの結果なので破棄された
    Stale,
}

/// アップロードワークフロー
pub struct UploadWorkflow {
    handle_store: Arc<dyn HandleStore>,
    transformer: Arc<dyn TransformRepository>,
    sink: Arc<dyn ArtifactSink>,
    state: WorkflowState,
    last_request_id: u64,
    snapshots: watch::Sender<WorkflowSnapshot>,
}

impl UploadWorkflow {
    /// 新しいワークフローを作成（初期状態は `Idle`）
    pub fn new(
        handle_store: Arc<dyn HandleStore>,
        transformer: Arc<dyn TransformRepository>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Self {
        let (snapshots, _) = watch::channel(WorkflowSnapshot::default());

        Self {
            handle_store,
            transformer,
            sink,
            state: WorkflowState::default(),
            last_request_id: 0,
            snapshots,
        }
    }

    /// 現在の状態のスナップショット
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// 状態が保持している生存ハンドル数
    pub fn live_handle_count(&self) -> usize {
        self.state.live_handle_count()
    }

    /// スナップショットの更新を購読
    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.snapshots.subscribe()
    }

    /// ファイルを選択
    ///
    /// 検証に失敗した場合はエラーを状態に記録し、選択中のファイルはそのまま残す。
    /// 処理中は有効なファイルでも差し替えない。
    ///
    /// # Errors
    ///
    /// 拒否された理由を返す（状態にも同じメッセージが入る）。処理中の場合は
    /// [`WorkflowError::SelectNotAllowed`] を返し、状態は変えない
    pub fn select_file(&mut self, candidate: CandidateFile) -> Result<(), WorkflowError> {
        info!(
            "Selecting {} ({}, {} bytes)",
            candidate.name, candidate.media_type, candidate.size
        );

        if let Err(err) = FileValidationService::validate(&candidate, MAX_FILE_SIZE) {
            info!("Rejected {}: {}", candidate.name, err);
            return Err(self.reject(err));
        }

        // 単一フライト: 送信中のリクエストがある間は選択を変えない
        if self.state.phase == Phase::Processing {
            info!("Ignoring {} while {:?} is in flight", candidate.name, self.state.in_flight);
            return Err(WorkflowError::SelectNotAllowed(Phase::Processing));
        }

        let file = match candidate.into_selected() {
            Ok(file) => file,
            Err(e) => return Err(self.reject(WorkflowError::Resource(format!("{:#}", e)))),
        };

        // 新しいプレビューを作る前に、置き換えられるハンドルを解放する
        self.apply(WorkflowEvent::ResetRequested);

        let preview = match Handle::acquire(&self.handle_store, HandleRole::Preview, file.data.clone())
        {
            Ok(preview) => preview,
            Err(e) => return Err(self.reject(WorkflowError::Resource(format!("{:#}", e)))),
        };

        self.dispatch(WorkflowEvent::FileChosen { file, preview });
        Ok(())
    }

    /// 送信を開始
    ///
    /// `Ready` からのみ有効で、ネットワーク処理の前に同期的に `Processing` へ遷移する。
    ///
    /// # Errors
    ///
    /// `Ready` 以外では [`WorkflowError::SubmitNotAllowed`] を返し、状態は変えない
    pub fn begin_submit(&mut self) -> Result<PendingRequest, WorkflowError> {
        let phase = self.state.phase;
        let upload = match (&self.state.file, phase) {
            (Some(file), Phase::Ready) => ImageUpload::from(file),
            _ => return Err(WorkflowError::SubmitNotAllowed(phase)),
        };

        self.last_request_id += 1;
        let id = RequestId(self.last_request_id);
        self.dispatch(WorkflowEvent::RequestStarted { id });
        info!("Submitting {} as {}", upload.file_name, id);

        Ok(PendingRequest {
            id,
            upload,
            transformer: Arc::clone(&self.transformer),
        })
    }

    /// リクエストの結果を適用
    ///
    /// 現在そのリクエストを待っている場合にのみ適用する。
    ///
    /// # Errors
    ///
    /// 適用した結果が失敗だった場合に [`WorkflowError::RemoteFailure`] を返す
    pub fn complete_submit(&mut self, outcome: RequestOutcome) -> Result<Completion, WorkflowError> {
        let RequestOutcome { id, result } = outcome;

        if !self.state.is_awaiting(id) {
            debug!("Discarding stale response for {}", id);
            return Ok(Completion::Stale);
        }

        let acquired = result.and_then(|data| {
            Handle::acquire(&self.handle_store, HandleRole::Result, data)
                .map_err(|e| RemoteError::Processing(format!("{:#}", e)))
        });

        match acquired {
            Ok(result) => {
                info!("{} completed", id);
                self.dispatch(WorkflowEvent::RequestSucceeded { id, result });
                Ok(Completion::Applied)
            }
            Err(err) => {
                warn!("{} failed: {}", id, err);
                self.dispatch(WorkflowEvent::RequestFailed {
                    id,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// 送信して結果を適用するまでを一度に行う
    ///
    /// `&mut self` を保持したまま待つため、処理中に再入できない。
    pub async fn submit(&mut self) -> Result<(), WorkflowError> {
        let pending = self.begin_submit()?;
        let outcome = pending.send().await;
        self.complete_submit(outcome).map(|_| ())
    }

    /// 結果画像を固定のファイル名で保存
    ///
    /// 状態は変更しない。
    ///
    /// # Errors
    ///
    /// 結果がない場合は [`WorkflowError::NoResult`]、保存に失敗した場合は
    /// [`WorkflowError::Download`] を返す
    pub async fn download(&self) -> Result<PathBuf, WorkflowError> {
        let data = match &self.state.result {
            Some(result) => result
                .read()
                .map_err(|e| WorkflowError::Download(format!("{:#}", e)))?,
            None => return Err(WorkflowError::NoResult),
        };

        let path = self
            .sink
            .save(DOWNLOAD_FILE_NAME, &data)
            .await
            .map_err(|e| WorkflowError::Download(format!("{:#}", e)))?;

        info!("Saved result to {}", path.display());
        Ok(path)
    }

    /// すべてのハンドルを解放して初期状態に戻す
    ///
    /// どのフェーズからでも有効。処理中のリクエストは中断されないが、
    /// その結果は破棄される。
    pub fn reset(&mut self) {
        if let Some(id) = self.state.in_flight {
            info!("Resetting while {} is in flight; its response will be discarded", id);
        }
        self.dispatch(WorkflowEvent::ResetRequested);
    }

    /// エラーだけを消す
    pub fn dismiss_error(&mut self) {
        self.dispatch(WorkflowEvent::ErrorDismissed);
    }

    fn reject(&mut self, err: WorkflowError) -> WorkflowError {
        self.dispatch(WorkflowEvent::FileRejected {
            message: err.to_string(),
        });
        err
    }

    fn apply(&mut self, event: WorkflowEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);

        debug_assert!(
            self.state.check_invariants().is_ok(),
            "workflow invariant violated: {:?}",
            self.state.check_invariants()
        );
    }

    fn dispatch(&mut self, event: WorkflowEvent) {
        self.apply(event);

        let next = self.state.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
