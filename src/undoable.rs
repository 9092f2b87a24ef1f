use crate::action::Action;
use crate::config::UndoConfig;
use crate::history::{History, Seed};
use crate::navigate;
use crate::policy::{self, Disposition};
use crate::storage::{Snapshots, Storage};
use std::cell::OnceCell;
use std::fmt;
use std::marker::PhantomData;

/// A reducer that receives an extra, read-only context alongside the action.
pub type ReduceWithFn<T, C> = Box<dyn Fn(T, &Action, &C) -> T>;

/// A reducer wrapped in an undoable history.
///
/// `Undoable` owns a pure `(state, action) -> state` function and turns it
/// into a `(history, action) -> history` function. Undo, redo and jump
/// actions move through the history without calling the wrapped reducer;
/// everything else is passed to it and the result is recorded according to
/// the [`UndoConfig`].
///
/// `S` selects how entries are stored ([`Snapshots`] or
/// [`Diffs`](crate::Diffs)); `C` is an optional context handed to the
/// wrapped reducer by [`reduce_with`](Undoable::reduce_with).
///
/// # Examples
///
/// ```
/// use timefold::{Action, Seed, Undoable, UndoConfig};
///
/// fn counter(state: i64, action: &Action) -> i64 {
///     match action.action_type.as_str() {
///         "increment" => state + 1,
///         _ => state,
///     }
/// }
///
/// let undoable: Undoable<i64> = Undoable::new(counter, UndoConfig::default());
///
/// let history = undoable.reduce(Seed::Unset, &Action::new("increment"));
/// let history = undoable.reduce(history, &Action::new("increment"));
/// assert_eq!(history.present, 2);
///
/// let history = undoable.reduce(history, &timefold::undo());
/// assert_eq!(history.present, 1);
/// assert_eq!(history.future, vec![2]);
/// ```
pub struct Undoable<T, S = Snapshots, C = ()>
where
    S: Storage<T>,
{
    reducer: ReduceWithFn<T, C>,
    config: UndoConfig<T, S::Entry>,
    initial: OnceCell<History<T, S::Entry>>,
    storage: PhantomData<S>,
}

impl<T, S, C> fmt::Debug for Undoable<T, S, C>
where
    T: fmt::Debug,
    S: Storage<T>,
    S::Entry: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Undoable")
            .field("config", &self.config)
            .field("initial", &self.initial.get())
            .finish()
    }
}

impl<T, S> Undoable<T, S, ()>
where
    T: Clone + PartialEq + Default,
    S: Storage<T>,
{
    /// Wrap `reducer`.
    pub fn new<F>(reducer: F, config: UndoConfig<T, S::Entry>) -> Self
    where
        F: Fn(T, &Action) -> T + 'static,
    {
        Self::with_context(move |state, action: &Action, _: &()| reducer(state, action), config)
    }

    /// Dispatch `action` against `state`.
    ///
    /// `state` is anything that converts into a [`Seed`]: the history
    /// returned by the previous call, [`Seed::Unset`] on the very first
    /// call, or a [`Seed::Present`] to start tracking an existing state.
    pub fn reduce(
        &self,
        state: impl Into<Seed<T, S::Entry>>,
        action: &Action,
    ) -> History<T, S::Entry> {
        self.reduce_with(state, action, &())
    }
}

impl<T, S, C> Undoable<T, S, C>
where
    T: Clone + PartialEq + Default,
    S: Storage<T>,
{
    /// Wrap a reducer that also takes a context.
    ///
    /// # Examples
    ///
    /// ```
    /// use timefold::{Action, Seed, Undoable, UndoConfig};
    ///
    /// struct Step(i64);
    ///
    /// let undoable: Undoable<i64, timefold::Snapshots, Step> = Undoable::with_context(
    ///     |state, _action: &Action, step: &Step| state + step.0,
    ///     UndoConfig::default(),
    /// );
    ///
    /// let history = undoable.reduce_with(Seed::Present(0), &Action::new("add"), &Step(5));
    /// assert_eq!(history.present, 5);
    /// assert_eq!(history.past, vec![0]);
    /// ```
    pub fn with_context<F>(reducer: F, config: UndoConfig<T, S::Entry>) -> Self
    where
        F: Fn(T, &Action, &C) -> T + 'static,
    {
        Undoable {
            reducer: Box::new(reducer),
            config,
            initial: OnceCell::new(),
            storage: PhantomData,
        }
    }

    /// The configuration this reducer was built with.
    pub fn config(&self) -> &UndoConfig<T, S::Entry> {
        &self.config
    }

    /// The history the first call started from, once there has been one.
    /// Init actions reset to it.
    pub fn initial_history(&self) -> Option<&History<T, S::Entry>> {
        self.initial.get()
    }

    /// Dispatch `action` against `state`, handing `context` to the wrapped
    /// reducer.
    pub fn reduce_with(
        &self,
        state: impl Into<Seed<T, S::Entry>>,
        action: &Action,
        context: &C,
    ) -> History<T, S::Entry> {
        let history = self.seed(state.into(), context);
        let config = &self.config;
        let before = (history.past.len(), history.future.len());

        let (next, performed) = if action.action_type == config.undo_type {
            (navigate::undo::<T, S>(history), "undo")
        } else if action.action_type == config.redo_type {
            (navigate::redo::<T, S>(history), "redo")
        } else if action.action_type == config.jump_to_past_type {
            let next = match target_index(action) {
                Some(index) => navigate::jump_to_past::<T, S>(history, index),
                None => history,
            };
            (next, "jump to past")
        } else if action.action_type == config.jump_to_future_type {
            let next = match target_index(action) {
                Some(index) => navigate::jump_to_future::<T, S>(history, index),
                None => history,
            };
            (next, "jump to future")
        } else if action.action_type == config.jump_type {
            let next = match action.index {
                Some(n) => navigate::jump::<T, S>(history, n),
                None => history,
            };
            (next, "jump")
        } else if config.clear_history_types.contains(&action.action_type) {
            (History::new(history.present), "clear history")
        } else if config.init_types.contains(&action.action_type) {
            let next = match self.initial.get() {
                Some(initial) => initial.clone(),
                None => history,
            };
            self.trace(action, "reset to initial history", before, &next);
            return next;
        } else {
            return self.record(history, action, context, before);
        };

        let moved = config.clear_history_types.contains(&action.action_type)
            || (next.past.len(), next.future.len()) != before;
        let mut next = next;
        if config.never_skip_reducer {
            next.present = (self.reducer)(next.present, action, context);
        }
        if moved {
            next = config.extend(next, action);
        }
        self.trace(action, performed, before, &next);
        next
    }

    /// Run the wrapped reducer and file its result.
    fn record(
        &self,
        history: History<T, S::Entry>,
        action: &Action,
        context: &C,
        before: (usize, usize),
    ) -> History<T, S::Entry> {
        let candidate = (self.reducer)(history.present.clone(), action, context);
        let disposition = policy::decide(action, &candidate, &history, &self.config);
        let performed = match &disposition {
            Disposition::Unchanged => return history,
            Disposition::Filtered => "filtered, present updated",
            Disposition::Grouped => "grouped into the current entry",
            Disposition::Insert(_) => "inserted new entry",
        };
        let next = policy::commit::<T, S>(history, candidate, disposition, &self.config);
        let next = self.config.extend(next, action);
        self.trace(action, performed, before, &next);
        next
    }

    /// Turn the incoming state into a history, initializing on first use.
    fn seed(&self, state: Seed<T, S::Entry>, context: &C) -> History<T, S::Entry> {
        let ignore_initial_state = self.config.ignore_initial_state;
        if let Some(initial) = self.initial.get() {
            return match state {
                Seed::Unset => initial.clone(),
                Seed::History(history) => history,
                Seed::Present(present) => History::create(present, ignore_initial_state),
            };
        }

        let history = match state {
            Seed::Unset => {
                let create = Action::new(crate::action::types::CREATE_HISTORY);
                let present = (self.reducer)(T::default(), &create, context);
                History::create(present, ignore_initial_state)
            }
            Seed::History(mut history) => {
                if !ignore_initial_state {
                    history.latest_unfiltered = Some(history.present.clone());
                }
                history
            }
            Seed::Present(present) => History::create(present, ignore_initial_state),
        };
        if self.config.debug {
            log::debug!(
                target: "timefold",
                "initial history: {} past, {} future",
                history.past.len(),
                history.future.len()
            );
        }
        self.initial.get_or_init(|| history).clone()
    }

    fn trace(
        &self,
        action: &Action,
        performed: &str,
        before: (usize, usize),
        after: &History<T, S::Entry>,
    ) {
        if self.config.debug {
            log::debug!(
                target: "timefold",
                "{}: {performed}; past {} -> {}, future {} -> {}",
                action.action_type,
                before.0,
                after.past.len(),
                before.1,
                after.future.len()
            );
        }
    }
}

/// A non-negative `index`, or `None` when missing or negative.
fn target_index(action: &Action) -> Option<usize> {
    action.index.and_then(|index| usize::try_from(index).ok())
}
