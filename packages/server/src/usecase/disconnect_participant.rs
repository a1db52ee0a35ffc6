//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時にレジストリからレコードが削除されること
//!
//! ### なぜこのテストが必要か
//! - 切断済みの接続がレジストリに残らないことを保証
//! - 二重切断や未登録の切断が安全であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みクライアントの切断
//! - エッジケース：二重切断、未登録ハンドルの切断
//! - 切断しても退出イベントは自動送信されない

use std::sync::Arc;

use crate::domain::{ConnectionHandle, ConnectionRecord, ConnectionRepository};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// 未登録のハンドルに対しては何もしない。
    ///
    /// # Returns
    ///
    /// * `Some(ConnectionRecord)` - 削除されたレコード
    /// * `None` - 該当するレコードがなかった
    pub async fn execute(&self, handle: &ConnectionHandle) -> Option<ConnectionRecord> {
        let removed = self.repository.remove(handle).await;

        match &removed {
            Some(record) => tracing::info!(
                id = %record.id(),
                address = %record.address(),
                "Client disconnected and removed from registry"
            ),
            None => tracing::debug!(handle = %handle, "Disconnect for unknown handle ignored"),
        }

        removed
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.repository.count().await
    }
}
