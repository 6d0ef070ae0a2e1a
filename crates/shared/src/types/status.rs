//! Active/Inactive status for users and employees.
//!
//! Records are never physically deleted; an administrative toggle flips them
//! between the two states instead.

use serde::{Deserialize, Serialize};

/// Two-state lifecycle flag for users and employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Record is live and usable.
    #[default]
    Active,
    /// Record is soft-disabled.
    Inactive,
}

impl Status {
    /// The single transition of the status state machine.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    /// Database string for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Parses a status from its database string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Whether the record is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_state() {
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
    }

    #[test]
    fn test_double_toggle_is_idempotent() {
        for status in [Status::Active, Status::Inactive] {
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn test_database_roundtrip() {
        for status in [Status::Active, Status::Inactive] {
            assert_eq!(Status::parse(status.as_str()), Some(status));
        }
        assert_eq!(Status::parse("Y"), None);
        assert_eq!(Status::parse(""), None);
    }
}
