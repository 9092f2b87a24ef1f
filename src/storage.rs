//! How history entries are stored in `past` and `future`.
//!
//! [`Snapshots`] keeps every recorded state whole. [`Diffs`] keeps only the
//! structural diff between neighbouring states, which bounds memory for large
//! states that change a little at a time. Only the present (and the latest
//! unfiltered baseline) is ever materialized in diff mode.
//!
//! The strategy is chosen by type, e.g. `Undoable<Doc, Diffs>`; see
//! [`Undoable`](crate::Undoable).

use crate::diff::{self, Diff};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

mod sealed {
    pub trait Sealed {}
}

/// A representation for history entries.
///
/// Every operation works relative to the *baseline*, the latest committed
/// state (`History::latest_unfiltered`). It can be absent when the initial
/// state was excluded from history; strategies that need a starting point
/// fall back to the present.
///
/// This trait is sealed: the two strategies in this module are the only ones.
pub trait Storage<T>: sealed::Sealed {
    /// What `past` and `future` hold.
    type Entry: Clone;

    /// The entry pushed onto `past` when `next` is committed after `baseline`.
    fn record(baseline: &T, next: &T) -> Self::Entry;

    /// Cross one `past` entry backwards.
    ///
    /// Returns the new present and the entry to push onto the front of
    /// `future`, if any.
    fn step_back(
        present: &T,
        baseline: Option<T>,
        entry: Self::Entry,
    ) -> (T, Option<Self::Entry>);

    /// Cross one `future` entry forwards.
    ///
    /// Returns the new present and the entry to push onto the end of `past`,
    /// if any.
    fn step_forward(
        present: &T,
        baseline: Option<T>,
        entry: Self::Entry,
    ) -> (T, Option<Self::Entry>);

    /// Re-anchor the last `past` entry after the baseline moved from `old`
    /// to `new` without a new entry being recorded (grouping, synced
    /// filtering).
    fn reanchor_past(entry: Self::Entry, old: &T, new: &T) -> Self::Entry;

    /// Re-anchor the first `future` entry after the baseline moved from
    /// `old` to `new`.
    fn reanchor_future(entry: Self::Entry, old: &T, new: &T) -> Self::Entry;
}

/// Entries are full copies of each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshots;

impl sealed::Sealed for Snapshots {}

impl<T: Clone> Storage<T> for Snapshots {
    type Entry = T;

    fn record(baseline: &T, _next: &T) -> T {
        baseline.clone()
    }

    fn step_back(_present: &T, baseline: Option<T>, entry: T) -> (T, Option<T>) {
        (entry, baseline)
    }

    fn step_forward(_present: &T, baseline: Option<T>, entry: T) -> (T, Option<T>) {
        (entry, baseline)
    }

    fn reanchor_past(entry: T, _old: &T, _new: &T) -> T {
        entry
    }

    fn reanchor_future(entry: T, _old: &T, _new: &T) -> T {
        entry
    }
}

/// Entries are edit scripts between neighbouring states.
///
/// `past[i]` turns state *i* into state *i + 1* and the last past entry
/// ends at the baseline; `future[0]` turns the baseline into the next state.
/// States cross the diff engine as [`serde_json::Value`]s, so `T` must
/// round-trip through serde_json.
///
/// # Examples
///
/// ```
/// use timefold::{Diffs, Storage};
/// use serde_json::json;
///
/// let entry = <Diffs as Storage<_>>::record(&json!({"n": 1}), &json!({"n": 2}));
/// let now = json!({"n": 2});
/// let (back, moved) = <Diffs as Storage<_>>::step_back(&now, Some(now.clone()), entry);
/// assert_eq!(back, json!({"n": 1}));
/// assert!(moved.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diffs;

impl sealed::Sealed for Diffs {}

impl<T> Storage<T> for Diffs
where
    T: Serialize + DeserializeOwned + Clone,
{
    type Entry = Diff;

    fn record(baseline: &T, next: &T) -> Diff {
        match (to_tree(baseline), to_tree(next)) {
            (Some(from), Some(to)) => diff::diff(&from, &to),
            _ => Diff::new(),
        }
    }

    fn step_back(present: &T, baseline: Option<T>, entry: Diff) -> (T, Option<Diff>) {
        let base = baseline.unwrap_or_else(|| present.clone());
        (patch(base, &entry, diff::revert), Some(entry))
    }

    fn step_forward(present: &T, baseline: Option<T>, entry: Diff) -> (T, Option<Diff>) {
        let base = baseline.unwrap_or_else(|| present.clone());
        (patch(base, &entry, diff::apply), Some(entry))
    }

    fn reanchor_past(entry: Diff, old: &T, new: &T) -> Diff {
        let previous = patch(old.clone(), &entry, diff::revert);
        <Self as Storage<T>>::record(&previous, new)
    }

    fn reanchor_future(entry: Diff, old: &T, new: &T) -> Diff {
        let next = patch(old.clone(), &entry, diff::apply);
        <Self as Storage<T>>::record(new, &next)
    }
}

fn to_tree<T: Serialize>(state: &T) -> Option<Value> {
    match serde_json::to_value(state) {
        Ok(tree) => Some(tree),
        Err(e) => {
            log::warn!(target: "timefold::storage", "state cannot be diffed: {e}");
            None
        }
    }
}

/// Run `op` over the tree form of `base`, falling back to `base` itself if
/// the state doesn't survive the trip through serde_json.
fn patch<T>(base: T, entry: &Diff, op: fn(Value, &[diff::Change]) -> Value) -> T
where
    T: Serialize + DeserializeOwned,
{
    let Some(tree) = to_tree(&base) else {
        return base;
    };
    match serde_json::from_value(op(tree, entry)) {
        Ok(state) => state,
        Err(e) => {
            log::warn!(
                target: "timefold::storage",
                "patched state no longer matches its type: {e}"
            );
            base
        }
    }
}
