//! WebSocket wire format for the relay.
//!
//! Every frame is a JSON object with the string fields `action`, `room`,
//! `user` and `message`.

use serde::{Deserialize, Serialize};

use crate::domain::{Action, Command, DecodeError, DisplayName, RelayEvent, RoomName};

/// Message as received from a client.
///
/// `action` and `room` are always required. `user` is required by
/// `SIGN_IN` and `SIGN_OUT`; `message` is only carried through verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub action: String,
    pub room: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InboundMessage {
    /// Parse raw text into an inbound message.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    /// Validate the message and turn it into a domain command.
    ///
    /// # Errors
    ///
    /// * `DecodeError::UnknownAction` - action is not one clients may send
    /// * `DecodeError::Malformed` - a required field is missing
    pub fn into_command(self) -> Result<Command, DecodeError> {
        let action: Action = self.action.parse()?;
        if !action.is_inbound() {
            return Err(DecodeError::UnknownAction(self.action));
        }

        let room = RoomName::new(self.room);
        match action {
            Action::UserSays => Ok(Command::UserSays { room }),
            Action::RequestUsers => Ok(Command::RequestUsers { room }),
            Action::SignIn => Ok(Command::SignIn {
                room,
                user: required_user(action, self.user)?,
            }),
            Action::SignOut => Ok(Command::SignOut {
                room,
                user: required_user(action, self.user)?,
            }),
            Action::UserIn | Action::UserOut | Action::AllUsers => {
                Err(DecodeError::UnknownAction(self.action))
            }
        }
    }
}

fn required_user(action: Action, user: Option<String>) -> Result<DisplayName, DecodeError> {
    let user = user
        .ok_or_else(|| DecodeError::Malformed(format!("{action} requires a 'user' field")))?;
    Ok(DisplayName::new(user))
}

/// Decode raw text straight into a command.
pub fn decode_command(text: &str) -> Result<Command, DecodeError> {
    InboundMessage::decode(text)?.into_command()
}

/// Server-generated message.
///
/// Field order matches what clients expect to see on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub action: String,
    pub message: String,
    pub room: String,
    pub user: String,
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&RelayEvent> for OutboundMessage {
    fn from(event: &RelayEvent) -> Self {
        let action = event.action().as_str().to_string();
        match event {
            RelayEvent::UserIn { room, user } | RelayEvent::UserOut { room, user } => Self {
                action,
                message: String::new(),
                room: room.as_str().to_string(),
                user: user.as_str().to_string(),
            },
            RelayEvent::AllUsers { users } => Self {
                action,
                message: users
                    .iter()
                    .map(DisplayName::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
                room: String::new(),
                user: String::new(),
            },
        }
    }
}
