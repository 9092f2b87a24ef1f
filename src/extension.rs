//! Hooks that decorate a history after it changes.
//!
//! An [`Extension`] sees every transition that produced a new history (an
//! action that was recorded, filtered or grouped, a navigation, a clear) and
//! may write its own fields into [`History::extra`]. Those fields are
//! flattened into the persisted layout next to `past`, `present` and
//! `future`.

use crate::action::Action;
use crate::error::Error;
use crate::history::History;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A post-transition hook on a history.
///
/// # Examples
///
/// ```
/// use timefold::{Action, Extension, History};
/// use serde_json::json;
///
/// struct Counted;
///
/// impl<T, E> Extension<T, E> for Counted {
///     fn extend(&self, mut history: History<T, E>, _action: &Action) -> History<T, E> {
///         let seen = history.extra.get("seen").and_then(|v| v.as_u64()).unwrap_or(0);
///         history.extra.insert("seen".into(), json!(seen + 1));
///         history
///     }
/// }
///
/// let history = Counted.extend(History::<i32>::new(0), &Action::new("tick"));
/// assert_eq!(history.extra["seen"], 1);
/// ```
pub trait Extension<T, E> {
    /// Decorate `history`, the result of dispatching `action`.
    fn extend(&self, history: History<T, E>, action: &Action) -> History<T, E>;
}

/// Where [`ActionField`] puts the last action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMethod {
    /// Only the type, under `"actionType"`.
    ActionType,
    /// The whole action, under `"action"`.
    Action,
}

impl InsertMethod {
    fn field(self) -> &'static str {
        match self {
            InsertMethod::ActionType => "actionType",
            InsertMethod::Action => "action",
        }
    }
}

impl FromStr for InsertMethod {
    type Err = Error;

    /// Parse `"actionType"` or `"action"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timefold::InsertMethod;
    ///
    /// assert_eq!("action".parse::<InsertMethod>().unwrap(), InsertMethod::Action);
    /// assert!("inline".parse::<InsertMethod>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actionType" => Ok(InsertMethod::ActionType),
            "action" => Ok(InsertMethod::Action),
            other => Err(Error::UnknownInsertMethod(other.to_string())),
        }
    }
}

/// Records the most recent included action in the history.
///
/// When an action is not included, whatever was recorded before stays, so
/// the field always names the last included action.
pub struct ActionField {
    method: InsertMethod,
    include: Option<Box<dyn Fn(&Action) -> bool>>,
}

impl fmt::Debug for ActionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionField")
            .field("method", &self.method)
            .field("include", &self.include.is_some())
            .finish()
    }
}

impl ActionField {
    /// Record every action with `method`.
    pub fn new(method: InsertMethod) -> Self {
        ActionField {
            method,
            include: None,
        }
    }

    /// Only record actions for which `include` returns true.
    pub fn with_include<F>(mut self, include: F) -> Self
    where
        F: Fn(&Action) -> bool + 'static,
    {
        self.include = Some(Box::new(include));
        self
    }
}

impl<T, E> Extension<T, E> for ActionField {
    fn extend(&self, mut history: History<T, E>, action: &Action) -> History<T, E> {
        if self.include.as_ref().is_some_and(|include| !include(action)) {
            return history;
        }
        let value = match self.method {
            InsertMethod::ActionType => Value::String(action.action_type.clone()),
            InsertMethod::Action => match serde_json::to_value(action) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!(target: "timefold::extension", "cannot record action: {e}");
                    return history;
                }
            },
        };
        history.extra.insert(self.method.field().to_string(), value);
        history
    }
}

/// An [`ActionField`] extension with the given insert method.
///
/// # Examples
///
/// ```
/// use timefold::{Action, Extension, History, InsertMethod, action_field};
///
/// let extension = action_field(InsertMethod::ActionType);
/// let history = extension.extend(History::<i32>::new(1), &Action::new("increment"));
/// assert_eq!(history.extra["actionType"], "increment");
/// ```
pub fn action_field(method: InsertMethod) -> ActionField {
    ActionField::new(method)
}

/// Run several extensions as one, in order.
pub fn combine_extensions<T, E>(extensions: Vec<Box<dyn Extension<T, E>>>) -> Combined<T, E> {
    Combined(extensions)
}

/// Extensions run one after another; see [`combine_extensions`].
pub struct Combined<T, E>(Vec<Box<dyn Extension<T, E>>>);

impl<T, E> Extension<T, E> for Combined<T, E> {
    fn extend(&self, history: History<T, E>, action: &Action) -> History<T, E> {
        self.0
            .iter()
            .fold(history, |history, extension| extension.extend(history, action))
    }
}
