use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved action types understood by [`Undoable`](crate::Undoable) when the
/// config does not override them.
pub mod types {
    /// Step back one entry.
    pub const UNDO: &str = "@@timefold/UNDO";
    /// Step forward one entry.
    pub const REDO: &str = "@@timefold/REDO";
    /// Jump to `future[index]`.
    pub const JUMP_TO_FUTURE: &str = "@@timefold/JUMP_TO_FUTURE";
    /// Jump to `past[index]`.
    pub const JUMP_TO_PAST: &str = "@@timefold/JUMP_TO_PAST";
    /// Jump `index` steps, negative for the past.
    pub const JUMP: &str = "@@timefold/JUMP";
    /// Drop past and future, keep the present.
    pub const CLEAR_HISTORY: &str = "@@timefold/CLEAR_HISTORY";
    /// Reset to the initial history.
    pub const INIT: &str = "@@timefold/INIT";
    /// Sent to the wrapped reducer once, to produce the first present.
    pub const CREATE_HISTORY: &str = "@@timefold/CREATE_HISTORY";
}

/// An action dispatched through a wrapped reducer.
///
/// Control actions (undo, redo, jumps) only use `index`; everything else is
/// passed to the wrapped reducer untouched. Like the event payloads of an
/// event log, `payload` is untyped ([`serde_json::Value`]) and the reducer
/// decides what it means.
///
/// # Examples
///
/// ```
/// use timefold::Action;
/// use serde_json::json;
///
/// let action = Action::new("todo_added").with_payload(json!({"text": "buy milk"}));
/// assert_eq!(action.action_type, "todo_added");
/// assert_eq!(action.payload["text"], "buy milk");
/// assert_eq!(action.index, None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Action {
    /// The action type identifier. Serialized as `"type"`.
    #[serde(rename = "type")]
    pub action_type: String,

    /// Target index or step count for jump actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,

    /// Arbitrary payload for the wrapped reducer.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl Action {
    /// Create an action with the given type, no index and a null payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Action {
            action_type: action_type.into(),
            index: None,
            payload: Value::Null,
        }
    }

    /// Set the jump index.
    ///
    /// # Examples
    ///
    /// ```
    /// use timefold::Action;
    ///
    /// let action = Action::new("@@timefold/JUMP").with_index(-2);
    /// assert_eq!(action.index, Some(-2));
    /// ```
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Step back one entry.
///
/// # Examples
///
/// ```
/// let action = timefold::undo();
/// assert_eq!(action.action_type, timefold::types::UNDO);
/// ```
pub fn undo() -> Action {
    Action::new(types::UNDO)
}

/// Step forward one entry.
pub fn redo() -> Action {
    Action::new(types::REDO)
}

/// Jump `n` steps: positive into the future, negative into the past.
pub fn jump(n: i64) -> Action {
    Action::new(types::JUMP).with_index(n)
}

/// Jump to the entry at `index` in `past`.
pub fn jump_to_past(index: i64) -> Action {
    Action::new(types::JUMP_TO_PAST).with_index(index)
}

/// Jump to the entry at `index` in `future`.
pub fn jump_to_future(index: i64) -> Action {
    Action::new(types::JUMP_TO_FUTURE).with_index(index)
}

/// Forget past and future, keeping the present.
pub fn clear_history() -> Action {
    Action::new(types::CLEAR_HISTORY)
}
