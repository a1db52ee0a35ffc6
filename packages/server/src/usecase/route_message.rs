//! UseCase: メッセージのルーティング
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteMessageUseCase::execute() のアクションごとの振る舞い
//! - unicast / multicast の配信対象と失敗時の隔離
//!
//! ### なぜこのテストが必要か
//! - ルームをまたいでメッセージが漏れないことを保証
//! - 1 人への送信失敗が他の受信者への配信を止めないことを確認
//! - 空のルーム名が「全員宛て」として扱われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：USER_SAYS / SIGN_IN / SIGN_OUT / REQUEST_USERS
//! - 異常系：未登録ハンドルからのメッセージ、受信側が閉じた接続
//! - 設定：SIGN_OUT 後にレコードを削除するポリシー

use std::sync::Arc;

use crate::{
    domain::{
        Command, ConnectionHandle, ConnectionRecord, ConnectionRepository, RelayEvent, RoomName,
        SignOutPolicy,
    },
    infrastructure::dto::websocket::OutboundMessage,
};

use super::error::RelayError;

/// メッセージルーティングのユースケース
///
/// 呼び出し間で状態を持たず、状態はすべてレジストリに委ねる。
pub struct RouteMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
    /// SIGN_OUT 後のレコードの扱い
    sign_out_policy: SignOutPolicy,
}

impl RouteMessageUseCase {
    /// 新しい RouteMessageUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>, sign_out_policy: SignOutPolicy) -> Self {
        Self {
            repository,
            sign_out_policy,
        }
    }

    /// 受信したコマンドをルーティングする
    ///
    /// # Arguments
    ///
    /// * `handle` - 送信元の接続ハンドル
    /// * `raw` - 受信したままのテキスト（USER_SAYS はこれをそのまま転送する）
    /// * `command` - `raw` をデコードしたコマンド
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信に成功した受信者数
    /// * `Err(RelayError)` - 送信元が未登録、返信の送信失敗など
    pub async fn execute(
        &self,
        handle: &ConnectionHandle,
        raw: &str,
        command: Command,
    ) -> Result<usize, RelayError> {
        let sender = self
            .repository
            .find(handle)
            .await
            .ok_or(RelayError::UnknownConnection(*handle))?;
        tracing::debug!(
            id = %sender.id(),
            action = %command.action(),
            room = %command.room(),
            "Routing message"
        );

        match command {
            Command::UserSays { room } => Ok(self.multicast(raw, &room).await),
            Command::SignIn { room, user } => {
                if !self.repository.update(handle, room.clone(), user.clone()).await {
                    // Disconnected between find and update
                    return Err(RelayError::UnknownConnection(*handle));
                }
                tracing::info!(id = %sender.id(), room = %room, user = %user, "Client signed in");

                let payload = encode(&RelayEvent::UserIn {
                    room: room.clone(),
                    user,
                })?;
                Ok(self.multicast(&payload, &room).await)
            }
            Command::SignOut { room, user } => {
                // Room and user come from the payload, not the stored record
                let payload = encode(&RelayEvent::UserOut {
                    room: room.clone(),
                    user: user.clone(),
                })?;
                let delivered = self.multicast(&payload, &room).await;
                tracing::info!(id = %sender.id(), room = %room, user = %user, "Client signed out");

                if self.sign_out_policy == SignOutPolicy::Remove
                    && self.repository.remove(handle).await.is_some()
                {
                    tracing::info!(id = %sender.id(), "Removed signed-out client from registry");
                }
                Ok(delivered)
            }
            Command::RequestUsers { room } => {
                let users = self
                    .repository
                    .members_of(&room)
                    .await
                    .iter()
                    .filter_map(|record| record.display_name_in(&room).cloned())
                    .collect();
                let payload = encode(&RelayEvent::AllUsers { users })?;
                self.unicast(&sender, payload)?;
                Ok(1)
            }
        }
    }

    /// 1 つの接続にペイロードを 1 回だけ送信する（再送はしない）
    pub fn unicast(&self, recipient: &ConnectionRecord, payload: String) -> Result<(), RelayError> {
        recipient.send(payload).map_err(|e| {
            tracing::warn!(id = %recipient.id(), error = %e, "Failed to send message to client");
            RelayError::from(e)
        })
    }

    /// ルームのメンバー全員にペイロードを送信する
    ///
    /// `room` が空文字の場合はルームに関係なく全接続に送信する。
    /// 送信はレジストリのスナップショットに対してロック外で行い、
    /// 個々の送信失敗はループを止めない。
    ///
    /// # Returns
    ///
    /// 配信に成功した受信者数
    pub async fn multicast(&self, payload: &str, room: &RoomName) -> usize {
        let recipients = if room.is_empty() {
            self.repository.all().await
        } else {
            self.repository.members_of(room).await
        };

        let delivered = recipients
            .iter()
            .filter(|recipient| self.unicast(recipient, payload.to_string()).is_ok())
            .count();

        tracing::debug!(
            room = %room,
            recipients = recipients.len(),
            delivered,
            "Multicast complete"
        );

        delivered
    }
}

fn encode(event: &RelayEvent) -> Result<String, RelayError> {
    Ok(OutboundMessage::from(event).to_json()?)
}
