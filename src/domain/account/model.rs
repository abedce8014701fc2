use chrono::{DateTime, Utc};

/// Account role. Fixed at creation and mirrored by exactly one
/// role profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Normal,
    Admin,
    Superadmin,
}

impl Role {
    /// Resolve the `type` discriminator sent on account creation.
    ///
    /// Only the exact strings `"superAdmin"` and `"admin"` select an
    /// elevated role; anything else, including no value at all, creates
    /// a normal account.
    pub fn from_discriminator(kind: Option<&str>) -> Self {
        match kind {
            Some("superAdmin") => Role::Superadmin,
            Some("admin") => Role::Admin,
            _ => Role::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Normal => "normal",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person who can authenticate. `email` is the lookup key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role-specific satellite record owned by exactly one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleProfile {
    pub id: String,
    pub account_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_selects_elevated_roles_exactly() {
        assert_eq!(Role::from_discriminator(Some("superAdmin")), Role::Superadmin);
        assert_eq!(Role::from_discriminator(Some("admin")), Role::Admin);
    }

    #[test]
    fn unknown_or_missing_discriminator_defaults_to_normal() {
        for kind in [None, Some(""), Some("normal"), Some("Admin"), Some("superadmin"), Some("root")] {
            assert_eq!(Role::from_discriminator(kind), Role::Normal, "kind = {kind:?}");
        }
    }

    #[test]
    fn display_uses_the_storage_name() {
        assert_eq!(Role::Superadmin.to_string(), "superadmin");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Normal.to_string(), "normal");
    }
}
