//! UseCase: セッションのライフサイクル
//!
//! トランスポートが呼び出す 3 つの入口（接続・受信・切断）をまとめる。
//! ここで発生したエラーはすべてログに出して吸収し、接続やプロセスには伝播させない。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - on_connect / on_message / on_disconnect の一連の流れ
//! - 不正なメッセージや未知のアクションが黙って捨てられること
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続 → サインイン → 発言 → ユーザー一覧 の往復
//! - 異常系：JSON でない入力、未知のアクション、登録前のメッセージ

use std::{borrow::Cow, sync::Arc};

use crate::{
    domain::{
        ClientSender, ConnectionHandle, ConnectionId, ConnectionRepository, PeerAddress,
        SignOutPolicy,
    },
    infrastructure::dto::websocket::decode_command,
};

use super::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, RouteMessageUseCase,
    error::RelayError,
};

/// Longest prefix of an inbound message written to the log
const LOG_PREVIEW_CHARS: usize = 200;

/// トランスポートから呼び出されるセッションの入口
#[derive(Clone)]
pub struct SessionLifecycle {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
    sign_out_policy: SignOutPolicy,
}

impl SessionLifecycle {
    /// 新しい SessionLifecycle を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>, sign_out_policy: SignOutPolicy) -> Self {
        Self {
            repository,
            sign_out_policy,
        }
    }

    /// 接続時の処理。レジストリに登録するだけで何も送信しない。
    pub async fn on_connect(
        &self,
        handle: ConnectionHandle,
        address: PeerAddress,
        sender: ClientSender,
    ) -> ConnectionId {
        ConnectParticipantUseCase::new(self.repository.clone())
            .execute(handle, address, sender)
            .await
            .id()
    }

    /// 受信時の処理。失敗はログに出して捨てる。
    pub async fn on_message(&self, handle: &ConnectionHandle, raw: &str) {
        let Some(id) = self.repository.find(handle).await.map(|record| record.id()) else {
            tracing::debug!(handle = %handle, "Message from unregistered connection dropped");
            return;
        };
        tracing::debug!(id = %id, message = %log_preview(raw), "Client said");

        match self.handle_message(handle, raw).await {
            Ok(delivered) => {
                tracing::trace!(id = %id, delivered, "Message routed");
            }
            Err(RelayError::UnknownConnection(_)) => {
                // Disconnected while the message was being routed
                tracing::debug!(id = %id, "Message from departed connection dropped");
            }
            Err(e @ (RelayError::MalformedMessage(_) | RelayError::UnknownAction(_))) => {
                tracing::warn!(id = %id, error = %e, "Dropping inbound message");
            }
            Err(e @ RelayError::DeliverySendFailure(_)) => {
                tracing::warn!(id = %id, error = %e, "Reply could not be delivered");
            }
            Err(e @ RelayError::Encode(_)) => {
                tracing::error!(id = %id, error = %e, "Outbound message encoding failed");
            }
        }
    }

    /// 受信メッセージをデコードしてルーティングする
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信に成功した受信者数
    /// * `Err(RelayError)` - デコード失敗やルーティング失敗
    pub async fn handle_message(
        &self,
        handle: &ConnectionHandle,
        raw: &str,
    ) -> Result<usize, RelayError> {
        let command = decode_command(raw)?;
        RouteMessageUseCase::new(self.repository.clone(), self.sign_out_policy)
            .execute(handle, raw, command)
            .await
    }

    /// 切断時の処理。退出イベントは送信しない。
    pub async fn on_disconnect(&self, handle: &ConnectionHandle) {
        DisconnectParticipantUseCase::new(self.repository.clone())
            .execute(handle)
            .await;
    }
}

/// Truncate a message for logging, marking the cut with `..`
fn log_preview(raw: &str) -> Cow<'_, str> {
    match raw.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}..", &raw[..cut])),
        None => Cow::Borrowed(raw),
    }
}
