//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! 単一の Mutex で ID 順のマップとハンドル索引をまとめて保護します。
//!
//! 送信処理はロック外で行う前提のため、すべての取得系メソッドは
//! レコードのスナップショット（クローン）を返します。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use hiroba_shared::time::get_jst_timestamp;
use tokio::sync::Mutex;

use crate::domain::{
    ClientSender, ConnectionHandle, ConnectionId, ConnectionRecord, ConnectionRepository,
    DisplayName, PeerAddress, RoomName, RoomSummary, Timestamp,
};

/// Registry contents guarded by one lock
#[derive(Debug)]
struct RegistryState {
    /// Next id to hand out; ids start at 1
    next_id: u64,
    /// Records in id (connection) order
    records: BTreeMap<ConnectionId, ConnectionRecord>,
    /// Transport handle to record id
    index: HashMap<ConnectionHandle, ConnectionId>,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    fn allocate_id(&mut self) -> ConnectionId {
        let id = ConnectionId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn remove(&mut self, handle: &ConnectionHandle) -> Option<ConnectionRecord> {
        let id = self.index.remove(handle)?;
        self.records.remove(&id)
    }

    fn get(&self, handle: &ConnectionHandle) -> Option<&ConnectionRecord> {
        let id = self.index.get(handle)?;
        self.records.get(id)
    }

    fn get_mut(&mut self, handle: &ConnectionHandle) -> Option<&mut ConnectionRecord> {
        let id = self.index.get(handle)?;
        self.records.get_mut(id)
    }
}

/// インメモリ Connection Repository 実装
///
/// ドメイン層の ConnectionRepository trait を実装します（依存性の逆転）。
#[derive(Debug)]
pub struct InMemoryConnectionRepository {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRepository {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::new()),
        }
    }
}

impl Default for InMemoryConnectionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn add(
        &self,
        handle: ConnectionHandle,
        address: PeerAddress,
        sender: ClientSender,
    ) -> ConnectionRecord {
        let connected_at = Timestamp::new(get_jst_timestamp());
        let mut state = self.state.lock().await;

        // One record per live connection: a reused handle replaces its old record
        if let Some(stale) = state.remove(&handle) {
            tracing::warn!(
                handle = %handle,
                stale_id = %stale.id(),
                "Handle registered twice; replacing previous record"
            );
        }

        let id = state.allocate_id();
        let record = ConnectionRecord::new(id, handle, address, connected_at, sender);
        state.index.insert(handle, id);
        state.records.insert(id, record.clone());

        record
    }

    async fn remove(&self, handle: &ConnectionHandle) -> Option<ConnectionRecord> {
        let mut state = self.state.lock().await;
        state.remove(handle)
    }

    async fn find(&self, handle: &ConnectionHandle) -> Option<ConnectionRecord> {
        let state = self.state.lock().await;
        state.get(handle).cloned()
    }

    async fn update(
        &self,
        handle: &ConnectionHandle,
        room: RoomName,
        display_name: DisplayName,
    ) -> bool {
        let mut state = self.state.lock().await;
        match state.get_mut(handle) {
            Some(record) => {
                record.sign_in(room, display_name);
                true
            }
            None => false,
        }
    }

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionRecord> {
        let state = self.state.lock().await;
        state
            .records
            .values()
            .filter(|record| record.is_in_room(room))
            .cloned()
            .collect()
    }

    async fn all(&self) -> Vec<ConnectionRecord> {
        let state = self.state.lock().await;
        state.records.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let state = self.state.lock().await;
        state.records.len()
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;
        let mut summaries: Vec<RoomSummary> = Vec::new();

        for record in state.records.values() {
            let (Some(room), Some(user)) = (record.room(), record.display_name()) else {
                continue;
            };
            match summaries.iter_mut().find(|summary| &summary.room == room) {
                Some(summary) => summary.users.push(user.clone()),
                None => summaries.push(RoomSummary {
                    room: room.clone(),
                    users: vec![user.clone()],
                }),
            }
        }

        summaries
    }
}
