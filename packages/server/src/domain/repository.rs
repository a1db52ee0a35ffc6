//! Repository trait for the connection registry.
//!
//! The domain layer defines the interface; the infrastructure layer supplies
//! the implementation (dependency inversion).

use async_trait::async_trait;

use super::{
    ClientSender, ConnectionHandle, ConnectionRecord, DisplayName, PeerAddress, RoomName,
    RoomSummary,
};

/// Authoritative set of live connections.
///
/// Every method returns detached snapshots; callers never hold the
/// registry's internal lock while using the results. None of the
/// operations fail: unknown handles are treated as no-ops.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Register a new connection with a freshly allocated id
    async fn add(
        &self,
        handle: ConnectionHandle,
        address: PeerAddress,
        sender: ClientSender,
    ) -> ConnectionRecord;

    /// Remove the record for `handle`, returning it if it existed
    async fn remove(&self, handle: &ConnectionHandle) -> Option<ConnectionRecord>;

    async fn find(&self, handle: &ConnectionHandle) -> Option<ConnectionRecord>;

    /// Set room and display name. Returns `false` if the handle is unknown.
    async fn update(
        &self,
        handle: &ConnectionHandle,
        room: RoomName,
        display_name: DisplayName,
    ) -> bool;

    /// Records whose room equals `room`, in registry order
    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionRecord>;

    /// Every record, in registry order
    async fn all(&self) -> Vec<ConnectionRecord>;

    async fn count(&self) -> usize;

    /// Each populated room with its signed-in display names
    async fn rooms(&self) -> Vec<RoomSummary>;
}
