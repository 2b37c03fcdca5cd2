//! # Transition Service
//!
//! 状態遷移を計算する純粋なリデューサ
//!
//! `reduce(state, event) -> state` の形で全遷移規則をここに集約する。
//! 置き換えられたハンドルは古い状態と一緒に drop され、その時点で解放される。

use crate::domain::entities::candidate_file::SelectedFile;
use crate::domain::entities::handle::Handle;
use crate::domain::entities::workflow_state::{Phase, RequestId, WorkflowState};

/// ワークフローのイベント
#[derive(Debug)]
pub enum WorkflowEvent {
    /// 検証を通過したファイルが選択された
    FileChosen { file: SelectedFile, preview: Handle },
    /// ファイルが拒否された
    FileRejected { message: String },
    /// リクエストを開始した
    RequestStarted { id: RequestId },
    /// リクエストが成功した
    RequestSucceeded { id: RequestId, result: Handle },
    /// リクエストが失敗した
    RequestFailed { id: RequestId, message: String },
    /// リセットが要求された
    ResetRequested,
    /// エラーが閉じられた
    ErrorDismissed,
}

/// 前の状態とイベントから次の状態を計算
pub fn reduce(state: WorkflowState, event: WorkflowEvent) -> WorkflowState {
    match event {
        WorkflowEvent::FileChosen { file, preview } => {
            // 処理中はファイルを差し替えない（新しいプレビューはここで解放される）
            if state.phase == Phase::Processing {
                return state;
            }
            WorkflowState {
                file: Some(file),
                preview: Some(preview),
                phase: Phase::Ready,
                result: None,
                error: None,
                in_flight: None,
            }
        }

        WorkflowEvent::FileRejected { message } => {
            // 結果とエラーは同時に持たない
            let phase = match state.phase {
                Phase::Completed => Phase::Ready,
                other => other,
            };
            WorkflowState {
                phase,
                result: None,
                error: Some(message),
                ..state
            }
        }

        WorkflowEvent::RequestStarted { id } => {
            if state.phase != Phase::Ready {
                return state;
            }
            WorkflowState {
                phase: Phase::Processing,
                error: None,
                in_flight: Some(id),
                ..state
            }
        }

        WorkflowEvent::RequestSucceeded { id, result } => {
            if !state.is_awaiting(id) {
                return state;
            }
            WorkflowState {
                phase: Phase::Completed,
                result: Some(result),
                error: None,
                in_flight: None,
                ..state
            }
        }

        WorkflowEvent::RequestFailed { id, message } => {
            if !state.is_awaiting(id) {
                return state;
            }
            WorkflowState {
                phase: Phase::Ready,
                result: None,
                error: Some(message),
                in_flight: None,
                ..state
            }
        }

        WorkflowEvent::ResetRequested => WorkflowState::default(),

        WorkflowEvent::ErrorDismissed => WorkflowState {
            error: None,
            ..state
        },
    }
}
