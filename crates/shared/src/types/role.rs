//! User roles as a closed, typed set.
//!
//! Roles used to be compared as loose strings; the enum below is the only
//! place role names exist. The wire/database representation keeps the
//! original labels, including the space in "Super Admin".

use serde::{Deserialize, Serialize};

/// Roles recognized by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access, including user management.
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    /// Administrative access to employee management.
    Admin,
    /// Ordinary staff member; sees only their own record.
    Employee,
}

/// Roles permitted on administrative pages (user/employee management).
pub const ADMIN_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin];

impl Role {
    /// Database/wire string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }

    /// Parses a role from its database/wire string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Super Admin" => Some(Self::SuperAdmin),
            "Admin" => Some(Self::Admin),
            "Employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Whether this role may use administrative pages.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown role: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::SuperAdmin, "Super Admin")]
    #[case(Role::Admin, "Admin")]
    #[case(Role::Employee, "Employee")]
    fn test_role_roundtrip(#[case] role: Role, #[case] label: &str) {
        assert_eq!(role.as_str(), label);
        assert_eq!(Role::parse(label), Some(role));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        // Registration forms submit the role label with stray whitespace.
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("Super Admin\n"), Some(Role::SuperAdmin));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(Role::parse("Manager"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_admin_roles() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Employee.is_admin());
    }
}
