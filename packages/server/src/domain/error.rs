//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors raised while turning inbound text into a [`Command`](super::Command).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Text is not a structured message or lacks a required field
    #[error("malformed message: {0}")]
    Malformed(String),

    /// Well-formed message carrying an action outside the recognized set
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

/// Errors raised by a connection's send capability
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The transport side of the connection has gone away
    #[error("connection {0} is no longer receiving")]
    ReceiverClosed(ConnectionId),
}
