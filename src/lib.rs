//! Undo, redo and time travel for pure reducers.
//!
//! Wrap any `(state, action) -> state` function in an [`Undoable`] and it
//! becomes a `(history, action) -> history` function: every recorded result
//! lands in a [`History`] that undo, redo and jump actions move through.
//!
//! ```
//! use timefold::{Action, Seed, UndoConfig, Undoable};
//!
//! fn counter(state: i64, action: &Action) -> i64 {
//!     match action.action_type.as_str() {
//!         "increment" => state + 1,
//!         "decrement" => state - 1,
//!         _ => state,
//!     }
//! }
//!
//! let undoable: Undoable<i64> = Undoable::new(counter, UndoConfig::default());
//! let mut history = undoable.reduce(Seed::Present(0), &Action::new("increment"));
//! history = undoable.reduce(history, &Action::new("increment"));
//! history = undoable.reduce(history, &timefold::jump(-2));
//! assert_eq!(history.present, 0);
//! assert_eq!(history.future, vec![1, 2]);
//! ```
//!
//! Large states can keep structural diffs instead of full snapshots; see
//! [`Diffs`] and the [`diff`] module.

mod action;
mod config;
pub mod diff;
mod error;
pub mod extension;
mod filters;
mod history;
pub mod navigate;
pub mod policy;
mod storage;
mod undoable;

pub use action::{Action, clear_history, jump, jump_to_future, jump_to_past, redo, types, undo};
pub use config::{ActionTypeSet, FilterFn, GroupByFn, UndoConfig, UndoConfigBuilder};
pub use error::Error;
pub use extension::{ActionField, Extension, InsertMethod, action_field, combine_extensions};
pub use filters::{combine_filters, exclude_action, group_by_action_types, include_action};
pub use history::{GroupKey, History, Seed, is_history};
pub use storage::{Diffs, Snapshots, Storage};
pub use undoable::{ReduceWithFn, Undoable};
