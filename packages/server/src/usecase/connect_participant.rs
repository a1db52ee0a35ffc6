//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続時にレジストリへレコードが登録されること
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに一意な ID が払い出されることを保証
//! - 接続直後のクライアントはどのルームにも属さないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規クライアントの接続
//! - 連続接続：ID が単調増加する

use std::sync::Arc;

use crate::domain::{
    ClientSender, ConnectionHandle, ConnectionRecord, ConnectionRepository, PeerAddress,
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 参加者接続を実行
    ///
    /// 新しいクライアントはサインインするまで何もブロードキャストしない。
    ///
    /// # Arguments
    ///
    /// * `handle` - トランスポートが払い出した接続ハンドル
    /// * `address` - 接続元アドレス
    /// * `sender` - メッセージ送信チャンネル
    pub async fn execute(
        &self,
        handle: ConnectionHandle,
        address: PeerAddress,
        sender: ClientSender,
    ) -> ConnectionRecord {
        let record = self.repository.add(handle, address, sender).await;

        tracing::info!(
            id = %record.id(),
            address = %address,
            "New client connected and was given id {}",
            record.id()
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionHandleFactory, ConnectionId},
        infrastructure::repository::InMemoryConnectionRepository,
    };
    use tokio::sync::mpsc;

    fn create_test_repository() -> Arc<InMemoryConnectionRepository> {
        Arc::new(InMemoryConnectionRepository::new())
    }

    fn peer() -> PeerAddress {
        PeerAddress::new("127.0.0.1:50000".parse().unwrap())
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新規クライアントがレジストリに登録される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandleFactory::generate();

        // when (操作):
        let record = usecase.execute(handle, peer(), tx).await;

        // then (期待する結果):
        assert_eq!(repository.count().await, 1);
        assert_eq!(record.handle(), handle);
        assert_eq!(record.address(), peer());
        assert!(record.room().is_none());
    }

    #[tokio::test]
    async fn test_connect_assigns_increasing_ids() {
        // テスト項目: 連続した接続に単調増加する ID が払い出される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());

        // when (操作):
        let mut ids = Vec::new();
        for _ in 0..5 {
            let (tx, _rx) = mpsc::unbounded_channel();
            let record = usecase
                .execute(ConnectionHandleFactory::generate(), peer(), tx)
                .await;
            ids.push(record.id());
        }

        // then (期待する結果):
        let expected: Vec<_> = (1..=5).map(ConnectionId::new).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_connect_does_not_broadcast() {
        // テスト項目: 接続しただけでは既存クライアントに何も送られない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase
            .execute(ConnectionHandleFactory::generate(), peer(), tx1)
            .await;

        // when (操作):
        usecase
            .execute(ConnectionHandleFactory::generate(), peer(), tx2)
            .await;

        // then (期待する結果):
        assert!(rx1.try_recv().is_err());
    }
}
