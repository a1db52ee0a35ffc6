//! Domain factories for creating domain entities and value objects.

use super::ConnectionHandle;

/// Factory for generating ConnectionHandle instances.
///
/// The transport asks for a fresh handle for every accepted socket.
pub struct ConnectionHandleFactory;

impl ConnectionHandleFactory {
    /// Generate a new ConnectionHandle with a random UUID v4.
    pub fn generate() -> ConnectionHandle {
        ConnectionHandle::from_uuid(uuid::Uuid::new_v4())
    }
}
