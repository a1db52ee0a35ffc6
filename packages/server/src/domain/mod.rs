//! Domain layer for the relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use entity::{ClientSender, ConnectionRecord, RoomSummary};
pub use error::{DecodeError, DeliveryError};
pub use factory::ConnectionHandleFactory;
pub use message::{Action, Command, RelayEvent};
pub use policy::SignOutPolicy;
pub use repository::ConnectionRepository;
#[cfg(test)]
pub use repository::MockConnectionRepository;
pub use value_object::{
    ConnectionHandle, ConnectionId, DisplayName, PeerAddress, RoomName, Timestamp,
};
