use thiserror::Error;

use crate::identity::AccountId;

/// Errors surfaced by registry operations.
///
/// Every operation validates all of its preconditions before mutating any
/// state; the first violated precondition aborts the call with exactly one of
/// these kinds. Nothing is logged-and-swallowed, and no event is emitted for
/// a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The caller lacks the role the operation requires.
    #[error("caller {caller} lacks the required {required} role")]
    Unauthorized {
        caller: AccountId,
        required: Role,
    },

    /// A null or otherwise malformed identity was supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The curator is already registered.
    #[error("curator {0} is already registered")]
    AlreadyExists(AccountId),

    /// The addressed curator or builder record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// The two privileged roles of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Curator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Curator => write!(f, "curator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_display_names_caller_and_role() {
        let caller = AccountId::new();
        let err = RegistryError::Unauthorized {
            caller,
            required: Role::Owner,
        };
        let text = err.to_string();
        assert!(text.contains(&caller.to_string()));
        assert!(text.contains("owner"));
    }

    #[test]
    fn invalid_argument_display() {
        let err = RegistryError::InvalidArgument("builder identity is nil");
        assert_eq!(
            err.to_string(),
            "invalid argument: builder identity is nil"
        );
    }

    #[test]
    fn not_found_display() {
        let err = RegistryError::NotFound("builder record");
        assert_eq!(err.to_string(), "builder record not found");
    }
}
