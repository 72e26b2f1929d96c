use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Session changes broadcast to every mounted listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "profile", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A reader signed in or finished signing up.
    Login(Profile),
    /// The stored profile was removed.
    Logout,
}

impl SessionEvent {
    pub const LOGIN: &'static str = "login";
    pub const LOGOUT: &'static str = "logout";

    /// Event name, as listeners filter on it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => Self::LOGIN,
            Self::Logout => Self::LOGOUT,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Login(profile) => Some(profile),
            Self::Logout => None,
        }
    }
}
