use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::Identifiable;

/// What a request wants to do to a protected resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Create,
    Update,
    Delete,
}

/// User role, from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
    #[default]
    Viewer,
}

impl UserRole {
    /// Role → permitted access, fixed at compile time.
    pub fn allows(self, access: Access) -> bool {
        match (self, access) {
            (Self::Admin, _) => true,
            (Self::Manager, Access::Read | Access::Create | Access::Update) => true,
            (Self::Manager, Access::Delete) => false,
            (Self::Employee | Self::Viewer, Access::Read) => true,
            (Self::Employee | Self::Viewer, _) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
            Self::Viewer => "viewer",
        }
    }

    /// Case-insensitive parse; `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Parse, falling back to the least-privileged default.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// base64(salt ‖ derived key)
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Identifiable for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
