use std::fmt;

use serde::{Deserialize, Serialize};

/// An entry in the users.toml directory. The table key is the identifier
/// stored on records as `created_by`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Normal,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Normal => write!(f, "normal"),
        }
    }
}
