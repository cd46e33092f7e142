//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: `u8` (0 = Normal, 1 = Admin). Stored as the `is_admin` flag on the user row
/// and carried as the `role` claim in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Normal = 0,
    Admin = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Normal),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Normal }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Maximum username length.
pub const USERNAME_MAX_LEN: usize = 150;

/// Minimum password length accepted at registration and password change.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Validate a username: 1-150 chars of ASCII letters, digits and `.@+-_`.
/// Reserved: "me" (collides with `/users/me/`).
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return false;
    }
    if username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

/// Minimal email shape check: one `@` with non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
