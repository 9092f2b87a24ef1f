use crate::action::{Action, types};
use crate::error::Error;
use crate::extension::{ActionField, Extension, InsertMethod};
use crate::history::{GroupKey, History};
use std::fmt;

/// Decides whether an action's result becomes a history entry.
///
/// Receives the action, the state the wrapped reducer returned, and the
/// history before the action.
pub type FilterFn<T, E> = Box<dyn Fn(&Action, &T, &History<T, E>) -> bool>;

/// Computes the group key for an action's result; consecutive results with
/// the same key collapse into a single entry.
pub type GroupByFn<T, E> = Box<dyn Fn(&Action, &T, &History<T, E>) -> Option<GroupKey>>;

/// One or more action types, e.g. the types that clear history.
///
/// Accepts a single type or a list:
///
/// ```
/// use timefold::ActionTypeSet;
///
/// let one = ActionTypeSet::from("reset");
/// let many = ActionTypeSet::from(["reset", "logout"]);
/// assert!(one.contains("reset"));
/// assert!(many.contains("logout"));
/// assert!(!many.contains("login"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTypeSet(Vec<String>);

impl ActionTypeSet {
    /// An empty set.
    pub fn new() -> Self {
        ActionTypeSet(Vec::new())
    }

    /// Whether `action_type` is in the set.
    pub fn contains(&self, action_type: &str) -> bool {
        self.0.iter().any(|t| t == action_type)
    }

    /// The types in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether the set holds no types.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ActionTypeSet {
    fn from(action_type: &str) -> Self {
        ActionTypeSet(vec![action_type.to_string()])
    }
}

impl From<String> for ActionTypeSet {
    fn from(action_type: String) -> Self {
        ActionTypeSet(vec![action_type])
    }
}

impl<S: Into<String>> From<Vec<S>> for ActionTypeSet {
    fn from(types: Vec<S>) -> Self {
        ActionTypeSet(types.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ActionTypeSet {
    fn from(types: [&str; N]) -> Self {
        ActionTypeSet(types.iter().map(|t| t.to_string()).collect())
    }
}

/// Configuration for an [`Undoable`](crate::Undoable).
///
/// Built with [`UndoConfig::builder`] and validated when built, so an
/// `UndoConfig` always has distinct, non-empty control action types.
///
/// # Examples
///
/// ```
/// use timefold::{UndoConfig, exclude_action};
///
/// let config: UndoConfig<i64> = UndoConfig::builder()
///     .limit(10)
///     .filter(exclude_action(["cursor_moved"]))
///     .undo_type("UNDO")
///     .redo_type("REDO")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.limit, Some(10));
/// assert_eq!(config.undo_type, "UNDO");
/// ```
#[non_exhaustive]
pub struct UndoConfig<T, E = T> {
    /// Maximum number of recorded points (past + present). `None` or `0`
    /// means unbounded.
    pub limit: Option<usize>,
    /// Steps back one entry.
    pub undo_type: String,
    /// Steps forward one entry.
    pub redo_type: String,
    /// Moves by the action's signed `index`.
    pub jump_type: String,
    /// Makes `past[index]` the present.
    pub jump_to_past_type: String,
    /// Makes `future[index]` the present.
    pub jump_to_future_type: String,
    /// Types that drop past and future, keeping the present.
    pub clear_history_types: ActionTypeSet,
    /// Types that reset the history to the initial one.
    pub init_types: ActionTypeSet,
    /// Run the wrapped reducer after undo, redo, jumps and clears too.
    pub never_skip_reducer: bool,
    /// Keep the initial present out of the undoable past.
    pub ignore_initial_state: bool,
    /// Move the baseline along with filtered actions, so undo skips back
    /// past them too.
    pub sync_filter: bool,
    /// Trace every transition at `debug` level.
    pub debug: bool,
    filter: Option<FilterFn<T, E>>,
    group_by: Option<GroupByFn<T, E>>,
    extensions: Vec<Box<dyn Extension<T, E>>>,
}

impl<T, E> fmt::Debug for UndoConfig<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoConfig")
            .field("limit", &self.limit)
            .field("undo_type", &self.undo_type)
            .field("redo_type", &self.redo_type)
            .field("jump_type", &self.jump_type)
            .field("jump_to_past_type", &self.jump_to_past_type)
            .field("jump_to_future_type", &self.jump_to_future_type)
            .field("clear_history_types", &self.clear_history_types)
            .field("init_types", &self.init_types)
            .field("never_skip_reducer", &self.never_skip_reducer)
            .field("ignore_initial_state", &self.ignore_initial_state)
            .field("sync_filter", &self.sync_filter)
            .field("debug", &self.debug)
            .field("filter", &self.filter.is_some())
            .field("group_by", &self.group_by.is_some())
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

impl<T, E> UndoConfig<T, E> {
    /// Start a configuration with every option at its default.
    pub fn builder() -> UndoConfigBuilder<T, E> {
        UndoConfigBuilder {
            limit: None,
            undo_type: types::UNDO.to_string(),
            redo_type: types::REDO.to_string(),
            jump_type: types::JUMP.to_string(),
            jump_to_past_type: types::JUMP_TO_PAST.to_string(),
            jump_to_future_type: types::JUMP_TO_FUTURE.to_string(),
            clear_history_types: ActionTypeSet::from(types::CLEAR_HISTORY),
            init_types: ActionTypeSet::from(types::INIT),
            never_skip_reducer: false,
            ignore_initial_state: false,
            sync_filter: false,
            debug: false,
            filter: None,
            group_by: None,
            extensions: Vec::new(),
            action_fields: Vec::new(),
        }
    }

    /// The group key for `candidate`; `None` without a `group_by`.
    pub fn group_key(
        &self,
        action: &Action,
        candidate: &T,
        prior: &History<T, E>,
    ) -> Option<GroupKey> {
        self.group_by
            .as_ref()
            .and_then(|group_by| group_by(action, candidate, prior))
    }

    /// Whether `candidate` should be recorded; true without a filter.
    pub fn allows(&self, action: &Action, candidate: &T, prior: &History<T, E>) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|filter| filter(action, candidate, prior))
    }

    /// Run the configured extensions, in order.
    pub fn extend(&self, history: History<T, E>, action: &Action) -> History<T, E> {
        self.extensions
            .iter()
            .fold(history, |history, extension| extension.extend(history, action))
    }
}

impl<T, E> Default for UndoConfig<T, E> {
    fn default() -> Self {
        UndoConfig::<T, E>::builder().assemble()
    }
}

/// Builder for [`UndoConfig`].
pub struct UndoConfigBuilder<T, E = T> {
    limit: Option<usize>,
    undo_type: String,
    redo_type: String,
    jump_type: String,
    jump_to_past_type: String,
    jump_to_future_type: String,
    clear_history_types: ActionTypeSet,
    init_types: ActionTypeSet,
    never_skip_reducer: bool,
    ignore_initial_state: bool,
    sync_filter: bool,
    debug: bool,
    filter: Option<FilterFn<T, E>>,
    group_by: Option<GroupByFn<T, E>>,
    extensions: Vec<Box<dyn Extension<T, E>>>,
    action_fields: Vec<String>,
}

impl<T, E> fmt::Debug for UndoConfigBuilder<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoConfigBuilder")
            .field("limit", &self.limit)
            .field("undo_type", &self.undo_type)
            .field("redo_type", &self.redo_type)
            .field("extensions", &self.extensions.len())
            .finish_non_exhaustive()
    }
}

impl<T, E> UndoConfigBuilder<T, E> {
    /// Keep at most `limit` recorded points (past + present). `0` means
    /// unbounded.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only record results the filter accepts; see
    /// [`include_action`](crate::include_action) and friends.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Action, &T, &History<T, E>) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Collapse consecutive results that share a group key.
    pub fn group_by<F>(mut self, group_by: F) -> Self
    where
        F: Fn(&Action, &T, &History<T, E>) -> Option<GroupKey> + 'static,
    {
        self.group_by = Some(Box::new(group_by));
        self
    }

    /// Action type that steps back.
    pub fn undo_type(mut self, action_type: impl Into<String>) -> Self {
        self.undo_type = action_type.into();
        self
    }

    /// Action type that steps forward.
    pub fn redo_type(mut self, action_type: impl Into<String>) -> Self {
        self.redo_type = action_type.into();
        self
    }

    /// Action type that jumps by a signed offset.
    pub fn jump_type(mut self, action_type: impl Into<String>) -> Self {
        self.jump_type = action_type.into();
        self
    }

    /// Action type that jumps to a past index.
    pub fn jump_to_past_type(mut self, action_type: impl Into<String>) -> Self {
        self.jump_to_past_type = action_type.into();
        self
    }

    /// Action type that jumps to a future index.
    pub fn jump_to_future_type(mut self, action_type: impl Into<String>) -> Self {
        self.jump_to_future_type = action_type.into();
        self
    }

    /// Action type(s) that clear past and future.
    pub fn clear_history_types(mut self, types: impl Into<ActionTypeSet>) -> Self {
        self.clear_history_types = types.into();
        self
    }

    /// Shorthand for a single clear type.
    pub fn clear_history_type(self, action_type: &str) -> Self {
        self.clear_history_types(action_type)
    }

    /// Action type(s) that reset to the initial history.
    pub fn init_types(mut self, types: impl Into<ActionTypeSet>) -> Self {
        self.init_types = types.into();
        self
    }

    /// Run the wrapped reducer after navigation and clears too.
    pub fn never_skip_reducer(mut self, yes: bool) -> Self {
        self.never_skip_reducer = yes;
        self
    }

    /// Keep the initial present out of the undoable past.
    pub fn ignore_initial_state(mut self, yes: bool) -> Self {
        self.ignore_initial_state = yes;
        self
    }

    /// Let filtered results move the baseline.
    pub fn sync_filter(mut self, yes: bool) -> Self {
        self.sync_filter = yes;
        self
    }

    /// Trace every transition through `log` at `debug` level.
    pub fn debug(mut self, yes: bool) -> Self {
        self.debug = yes;
        self
    }

    /// Run `extension` after every transition that changes the history.
    /// Extensions run in the order they were added.
    pub fn extension(mut self, extension: impl Extension<T, E> + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Record the last action in the history under the named insert method
    /// (`"actionType"` or `"action"`). The name is checked by
    /// [`build`](Self::build).
    pub fn action_field(mut self, insert_method: impl Into<String>) -> Self {
        self.action_fields.push(insert_method.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyActionType`] if a control action type is empty.
    /// - [`Error::DuplicateActionType`] if one action type is bound to two
    ///   control roles.
    /// - [`Error::UnknownInsertMethod`] if an
    ///   [`action_field`](Self::action_field) method is not recognized.
    pub fn build(mut self) -> Result<UndoConfig<T, E>, Error> {
        let mut seen: Vec<(&str, &'static str)> = Vec::new();
        for (role, action_type) in self.roles() {
            if action_type.is_empty() {
                return Err(Error::EmptyActionType { role });
            }
            if let Some(&(_, first)) = seen.iter().find(|(t, _)| *t == action_type) {
                return Err(Error::DuplicateActionType {
                    action_type: action_type.to_string(),
                    first,
                    second: role,
                });
            }
            seen.push((action_type, role));
        }

        for name in std::mem::take(&mut self.action_fields) {
            let method: InsertMethod = name.parse()?;
            self.extensions.push(Box::new(ActionField::new(method)));
        }

        Ok(self.assemble())
    }

    /// Every control action type with the role it plays, in dispatch order.
    fn roles(&self) -> Vec<(&'static str, &str)> {
        let mut roles = vec![
            ("undo_type", self.undo_type.as_str()),
            ("redo_type", self.redo_type.as_str()),
            ("jump_to_past_type", self.jump_to_past_type.as_str()),
            ("jump_to_future_type", self.jump_to_future_type.as_str()),
            ("jump_type", self.jump_type.as_str()),
        ];
        for (role, set) in [
            ("clear_history_types", &self.clear_history_types),
            ("init_types", &self.init_types),
        ] {
            let mut own: Vec<&str> = Vec::new();
            for action_type in set.iter() {
                if !own.contains(&action_type) {
                    own.push(action_type);
                }
            }
            roles.extend(own.into_iter().map(|t| (role, t)));
        }
        roles
    }

    fn assemble(self) -> UndoConfig<T, E> {
        UndoConfig {
            limit: self.limit,
            undo_type: self.undo_type,
            redo_type: self.redo_type,
            jump_type: self.jump_type,
            jump_to_past_type: self.jump_to_past_type,
            jump_to_future_type: self.jump_to_future_type,
            clear_history_types: self.clear_history_types,
            init_types: self.init_types,
            never_skip_reducer: self.never_skip_reducer,
            ignore_initial_state: self.ignore_initial_state,
            sync_filter: self.sync_filter,
            debug: self.debug,
            filter: self.filter,
            group_by: self.group_by,
            extensions: self.extensions,
        }
    }
}
