//! Role-based capability checks.
//!
//! A capability check takes the current principal (if any) and the set of
//! roles permitted for the operation. Missing authentication and wrong role
//! are distinct failures and map to 401 and 403 respectively.

use thiserror::Error;

use staffly_shared::types::{Role, UserId};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// User account ID.
    pub id: UserId,
    /// Role assigned to the account.
    pub role: Role,
}

/// Policy check failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// No principal present.
    #[error("authentication required")]
    Unauthenticated,

    /// Principal present but its role is not in the permitted set.
    #[error("role {0} is not permitted for this operation")]
    Forbidden(Role),
}

/// Checks that a principal exists and holds one of the permitted roles.
///
/// Returns the principal on success so handlers can chain into data-layer
/// restrictions (an Employee principal still only sees its own record).
///
/// # Errors
///
/// `PolicyError::Unauthenticated` when there is no principal;
/// `PolicyError::Forbidden` when the principal's role is not permitted.
pub fn authorize<'a>(
    principal: Option<&'a Principal>,
    allowed: &[Role],
) -> Result<&'a Principal, PolicyError> {
    let principal = principal.ok_or(PolicyError::Unauthenticated)?;

    if allowed.contains(&principal.role) {
        Ok(principal)
    } else {
        Err(PolicyError::Forbidden(principal.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffly_shared::types::ADMIN_ROLES;

    fn principal(role: Role) -> Principal {
        Principal {
            id: UserId::new(),
            role,
        }
    }

    #[test]
    fn test_admin_is_accepted_on_admin_pages() {
        let admin = principal(Role::Admin);
        let granted = authorize(Some(&admin), ADMIN_ROLES).unwrap();
        assert_eq!(granted, &admin);
    }

    #[test]
    fn test_super_admin_is_accepted_on_admin_pages() {
        let sa = principal(Role::SuperAdmin);
        assert!(authorize(Some(&sa), ADMIN_ROLES).is_ok());
    }

    #[test]
    fn test_employee_is_forbidden_on_admin_pages() {
        let emp = principal(Role::Employee);
        assert_eq!(
            authorize(Some(&emp), ADMIN_ROLES),
            Err(PolicyError::Forbidden(Role::Employee))
        );
    }

    #[test]
    fn test_missing_principal_is_a_distinct_failure() {
        // Anonymous callers must not be conflated with wrong-role callers.
        assert_eq!(
            authorize(None, ADMIN_ROLES),
            Err(PolicyError::Unauthenticated)
        );
    }

    #[test]
    fn test_employee_allowed_where_permitted() {
        let emp = principal(Role::Employee);
        assert!(authorize(Some(&emp), &[Role::Employee, Role::Admin]).is_ok());
    }
}
