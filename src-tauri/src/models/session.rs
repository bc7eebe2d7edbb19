use serde::{Deserialize, Serialize};

/// Access level attached to an authenticated account. The variant names
/// match the `role_name` text stored in the `Roles` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Professor,
    Student,
}

impl Role {
    /// Parse the `role_name` text that came back with a credential row.
    /// Anything outside the closed set is not a role this client serves.
    pub fn from_role_name(name: &str) -> Option<Role> {
        match name {
            "Admin" => Some(Role::Admin),
            "Professor" => Some(Role::Professor),
            "Student" => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Professor => write!(f, "Professor"),
            Role::Student => write!(f, "Student"),
        }
    }
}

/// The authenticated identity held for one dashboard lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub role: Role,
}

/// Fixed menu of action labels for one role, computed once at sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleMenu {
    pub reads: Vec<String>,
    pub writes: Vec<String>,
    pub read_only: bool,
}

/// Session payload shipped to the frontend after `sign_in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: i32,
    pub role: Role,
    pub menu: RoleMenu,
    /// Whitelisted table names for the Admin view selector; empty for
    /// the other roles.
    pub tables: Vec<String>,
}
