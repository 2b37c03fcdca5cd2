//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスルール
//!
//! - **file_validation**: 候補ファイルの検証
//! - **transition**: 状態遷移を計算する純粋なリデューサ

pub mod file_validation;
pub mod transition;
