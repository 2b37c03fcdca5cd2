//! # Domain Layer
//!
//! このモジュールはワークフローの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - HTTPやファイルシステムの詳細を知らない
//! - 状態遷移は純粋関数として表現する
//! - ハンドルの寿命は所有権で管理する
//!
//! ## 構成要素
//!
//! - **entities**: エンティティ（WorkflowState, CandidateFile, Handle）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（検証と状態遷移）
//! - **error**: エラー分類

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
