//! # Domain Entities
//!
//! ワークフローのエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **WorkflowState**: ワークフローの状態（フェーズ、選択ファイル、ハンドル、エラー）
//! - **CandidateFile**: 検証前の入力ファイル
//! - **Handle**: プレビュー・結果画像を参照する一時ハンドル

pub mod candidate_file;
pub mod handle;
pub mod workflow_state;
