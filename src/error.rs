use thiserror::Error;

/// Errors surfaced by timefold.
///
/// Navigation never fails (an out-of-range jump is a no-op) and patch
/// inconsistencies are logged rather than returned, so the only hard failures
/// are a bad configuration, caught when the config is built, and malformed
/// JSON handed to [`Seed::from_json`](crate::Seed::from_json).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A control action type was configured as the empty string.
    #[error("action type for `{role}` must not be empty")]
    EmptyActionType {
        /// The config field that was left empty.
        role: &'static str,
    },

    /// The same action type was bound to two control roles, so one of them
    /// could never be dispatched.
    #[error("action type `{action_type}` is bound to both `{first}` and `{second}`")]
    DuplicateActionType {
        /// The offending action type.
        action_type: String,
        /// The role that claimed the type first (in dispatch order).
        first: &'static str,
        /// The role that would be shadowed.
        second: &'static str,
    },

    /// `action_field` was given an insert method it does not know.
    #[error("unrecognized insert method `{0}` for action_field (expected \"actionType\" or \"action\")")]
    UnknownInsertMethod(String),

    /// An incoming JSON value could not be read as a history or a state.
    #[error("failed to read seed state: {0}")]
    Json(#[from] serde_json::Error),
}
