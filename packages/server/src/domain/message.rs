//! Message model: actions, inbound commands and server-generated events.

use std::{fmt, str::FromStr};

use super::{
    error::DecodeError,
    value_object::{DisplayName, RoomName},
};

/// Every action name that can appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    UserSays,
    SignIn,
    SignOut,
    RequestUsers,
    UserIn,
    UserOut,
    AllUsers,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserSays => "USER_SAYS",
            Self::SignIn => "SIGN_IN",
            Self::SignOut => "SIGN_OUT",
            Self::RequestUsers => "REQUEST_USERS",
            Self::UserIn => "USER_IN",
            Self::UserOut => "USER_OUT",
            Self::AllUsers => "ALL_USERS",
        }
    }

    /// Whether clients may send this action to the server
    pub fn is_inbound(&self) -> bool {
        matches!(
            self,
            Self::UserSays | Self::SignIn | Self::SignOut | Self::RequestUsers
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER_SAYS" => Ok(Self::UserSays),
            "SIGN_IN" => Ok(Self::SignIn),
            "SIGN_OUT" => Ok(Self::SignOut),
            "REQUEST_USERS" => Ok(Self::RequestUsers),
            "USER_IN" => Ok(Self::UserIn),
            "USER_OUT" => Ok(Self::UserOut),
            "ALL_USERS" => Ok(Self::AllUsers),
            other => Err(DecodeError::UnknownAction(other.to_string())),
        }
    }
}

/// A decoded client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Relay the raw payload to everyone in `room`
    UserSays { room: RoomName },
    SignIn { room: RoomName, user: DisplayName },
    SignOut { room: RoomName, user: DisplayName },
    RequestUsers { room: RoomName },
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Self::UserSays { .. } => Action::UserSays,
            Self::SignIn { .. } => Action::SignIn,
            Self::SignOut { .. } => Action::SignOut,
            Self::RequestUsers { .. } => Action::RequestUsers,
        }
    }

    pub fn room(&self) -> &RoomName {
        match self {
            Self::UserSays { room }
            | Self::SignIn { room, .. }
            | Self::SignOut { room, .. }
            | Self::RequestUsers { room } => room,
        }
    }
}

/// Events generated by the server itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    UserIn { room: RoomName, user: DisplayName },
    UserOut { room: RoomName, user: DisplayName },
    /// Reply to `REQUEST_USERS`; names in registry order
    AllUsers { users: Vec<DisplayName> },
}

impl RelayEvent {
    pub fn action(&self) -> Action {
        match self {
            Self::UserIn { .. } => Action::UserIn,
            Self::UserOut { .. } => Action::UserOut,
            Self::AllUsers { .. } => Action::AllUsers,
        }
    }
}
