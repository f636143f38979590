//! Access scopes for the target API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authorization class limiting what operations a token permits.
///
/// The scope selects which singleton client is used and is sent verbatim
/// as the `scope` form parameter of the token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Read-only operations (GET endpoints).
    Read,

    /// Mutating operations (POST, PUT, PATCH, DELETE endpoints).
    Write,
}

impl Scope {
    /// Get the scope name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_as_str() {
        assert_eq!(Scope::Read.as_str(), "read");
        assert_eq!(Scope::Write.as_str(), "write");
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Read.to_string(), "read");
        assert_eq!(Scope::Write.to_string(), "write");
    }

    #[test]
    fn test_scope_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Scope::Write).unwrap(), "\"write\"");
        let parsed: Scope = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(parsed, Scope::Read);
    }
}
