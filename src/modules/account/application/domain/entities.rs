use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Privilege level, integer-ordered so that `role >= required` is the whole
/// authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Normal = 1,
    Superuser = 2,
    Admin = 3,
}

impl Role {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Role::Normal),
            2 => Some(Role::Superuser),
            3 => Some(Role::Admin),
            _ => None,
        }
    }
}

/// One registered account. Deliberately NOT `Serialize`: the password hash
/// must never reach a response body, so anything outward-facing goes through
/// an explicit DTO instead.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_banned: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a fresh account row. Flags and role are never caller
/// supplied; the repository pins them to the unprivileged defaults.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}
