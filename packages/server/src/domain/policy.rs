//! Behaviour switches for routing.

use std::{fmt, str::FromStr};

/// What happens to the sender's registry record after `SIGN_OUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignOutPolicy {
    /// Announce the departure and keep the record. The client is expected
    /// to disconnect on its own.
    #[default]
    Retain,
    /// Announce the departure, then drop the record. The transport closes
    /// the socket once the record's send capability is gone.
    Remove,
}

impl SignOutPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for SignOutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignOutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "remove" => Ok(Self::Remove),
            other => Err(format!(
                "unknown sign-out policy '{other}' (expected 'retain' or 'remove')"
            )),
        }
    }
}
