use serde::{Deserialize, Serialize};

/// Access level of a user account.
///
/// The directory has exactly two levels; there is no general policy engine.
/// Administrators may mutate any store or review; standard users only their
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Standard,
    Administrator,
}

impl Role {
    pub fn is_administrator(self) -> bool {
        matches!(self, Role::Administrator)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Administrator => "administrator",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
