//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionHandle, ConnectionId, DecodeError, DeliveryError};

/// メッセージ処理中に発生するエラー
///
/// どのバリアントもセッションのライフサイクル層で吸収され、
/// 接続やプロセスを落とすことはない。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Inbound text is not a valid structured message
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Action outside the recognized set
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// No record is registered for the handle
    #[error("no connection registered for handle {0}")]
    UnknownConnection(ConnectionHandle),

    /// A recipient's send capability failed
    #[error("failed to deliver to connection {0}")]
    DeliverySendFailure(ConnectionId),

    /// Outbound event could not be serialized
    #[error("failed to encode outbound message: {0}")]
    Encode(String),
}

impl From<DecodeError> for RelayError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Malformed(reason) => Self::MalformedMessage(reason),
            DecodeError::UnknownAction(action) => Self::UnknownAction(action),
        }
    }
}

impl From<DeliveryError> for RelayError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::ReceiverClosed(id) => Self::DeliverySendFailure(id),
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
