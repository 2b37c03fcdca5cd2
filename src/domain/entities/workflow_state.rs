//! # WorkflowState Entity
//!
//! アップロードワークフローの状態とそのスナップショット

use std::fmt;

use serde::Serialize;

use super::candidate_file::{FileSummary, SelectedFile};
use super::handle::{Handle, HandleView};

/// ワークフローのフェーズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Ready,
    Processing,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Ready => "ready",
            Phase::Processing => "processing",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// 送信リクエストの識別子
///
/// 古いレスポンスが新しい状態を上書きしないよう、完了時に照合する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// ワークフローの状態
///
/// ハンドルを所有するため `Clone` は実装しない。外部には
/// [`WorkflowSnapshot`] のみを渡す。
#[derive(Debug, Default)]
pub struct WorkflowState {
    pub file: Option<SelectedFile>,
    pub preview: Option<Handle>,
    pub phase: Phase,
    pub result: Option<Handle>,
    pub error: Option<String>,
    pub in_flight: Option<RequestId>,
}

impl WorkflowState {
    /// 指定したリクエストの完了を待っているか
    pub fn is_awaiting(&self, id: RequestId) -> bool {
        self.phase == Phase::Processing && self.in_flight == Some(id)
    }

    /// 状態が保持している生存ハンドル数
    pub fn live_handle_count(&self) -> usize {
        usize::from(self.preview.is_some()) + usize::from(self.result.is_some())
    }

    /// 不変条件を検査
    ///
    /// # Errors
    ///
    /// 破られている条件の説明を返す
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.file.is_some() != self.preview.is_some() {
            return Err("preview must be present exactly when a file is selected".to_string());
        }
        if self.result.is_some() && self.phase != Phase::Completed {
            return Err(format!("result present while phase is {}", self.phase));
        }
        if self.result.is_some() && self.error.is_some() {
            return Err("result and error present at the same time".to_string());
        }
        if self.in_flight.is_some() != (self.phase == Phase::Processing) {
            return Err(format!(
                "in-flight request {:?} does not match phase {}",
                self.in_flight, self.phase
            ));
        }
        if self.phase != Phase::Idle && self.file.is_none() {
            return Err(format!("phase {} requires a selected file", self.phase));
        }
        Ok(())
    }

    /// 読み取り専用のスナップショットを作成
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            file: self.file.as_ref().map(SelectedFile::summary),
            preview: self.preview.as_ref().map(Handle::view),
            phase: self.phase,
            result: self.result.as_ref().map(Handle::view),
            error: self.error.clone(),
        }
    }
}

/// 表示層に渡す不変のスナップショット
///
/// ハンドルは非所有のビューとして保持するため、スナップショットを
/// 保持してもハンドルの寿命は延びない
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowSnapshot {
    pub file: Option<FileSummary>,
    pub preview: Option<HandleView>,
    pub phase: Phase,
    pub result: Option<HandleView>,
    pub error: Option<String>,
}

impl WorkflowSnapshot {
    /// 初期状態（空）かどうか
    pub fn is_initial(&self) -> bool {
        *self == WorkflowSnapshot::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle_and_valid() {
        let state = WorkflowState::default();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.live_handle_count(), 0);
        assert!(state.check_invariants().is_ok());
        assert!(state.snapshot().is_initial());
    }

    #[test]
    fn test_file_without_preview_is_invalid() {
        let state = WorkflowState {
            file: Some(SelectedFile {
                name: "a.png".to_string(),
                media_type: "image/png".to_string(),
                size: 1,
                data: vec![0],
            }),
            phase: Phase::Ready,
            ..Default::default()
        };

        assert!(state.check_invariants().is_err());
    }

    #[test]
    fn test_in_flight_requires_processing() {
        let state = WorkflowState {
            in_flight: Some(RequestId(1)),
            ..Default::default()
        };

        assert!(state.check_invariants().is_err());
        assert!(!state.is_awaiting(RequestId(1)));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Completed.to_string(), "completed");
        assert_eq!(RequestId(4).to_string(), "request-4");
    }
}
