//! Core domain models for the relay.

use tokio::sync::mpsc::UnboundedSender;

use super::{
    error::DeliveryError,
    value_object::{ConnectionHandle, ConnectionId, DisplayName, PeerAddress, RoomName, Timestamp},
};

/// Send capability back to the transport for one connection.
pub type ClientSender = UnboundedSender<String>;

/// One live client connection as tracked by the registry.
///
/// `room` and `display_name` stay unset until the client signs in. A record
/// without a room never matches a room filter.
#[derive(Debug, Clone)]
pub struct ConnectionRecord {
    id: ConnectionId,
    handle: ConnectionHandle,
    address: PeerAddress,
    connected_at: Timestamp,
    room: Option<RoomName>,
    display_name: Option<DisplayName>,
    sender: ClientSender,
}

impl ConnectionRecord {
    /// Create a record in the "connected but not joined" state
    pub fn new(
        id: ConnectionId,
        handle: ConnectionHandle,
        address: PeerAddress,
        connected_at: Timestamp,
        sender: ClientSender,
    ) -> Self {
        Self {
            id,
            handle,
            address,
            connected_at,
            room: None,
            display_name: None,
            sender,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn handle(&self) -> ConnectionHandle {
        self.handle
    }

    pub fn address(&self) -> PeerAddress {
        self.address
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    pub fn room(&self) -> Option<&RoomName> {
        self.room.as_ref()
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Associate the connection with a room and display name.
    ///
    /// Signing in again overwrites both fields.
    pub fn sign_in(&mut self, room: RoomName, display_name: DisplayName) {
        self.room = Some(room);
        self.display_name = Some(display_name);
    }

    /// Whether this record belongs to `room`. Records with no room never match.
    pub fn is_in_room(&self, room: &RoomName) -> bool {
        self.room.as_ref() == Some(room)
    }

    /// Display name if the record is signed into `room`.
    pub fn display_name_in(&self, room: &RoomName) -> Option<&DisplayName> {
        if self.is_in_room(room) {
            self.display_name.as_ref()
        } else {
            None
        }
    }

    /// Deliver a payload to exactly this connection.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ReceiverClosed` if the transport has dropped its end.
    pub fn send(&self, payload: String) -> Result<(), DeliveryError> {
        self.sender
            .send(payload)
            .map_err(|_| DeliveryError::ReceiverClosed(self.id))
    }
}

/// Snapshot of one populated room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room: RoomName,
    /// Display names in registry order
    pub users: Vec<DisplayName>,
}

impl RoomSummary {
    pub fn member_count(&self) -> usize {
        self.users.len()
    }
}
