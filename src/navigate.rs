//! Moving the present through a history.
//!
//! Every function here is pure and total: an out-of-range target returns
//! the history untouched, never an error. A successful move sets the
//! baseline to the new present and clears the group, so the next action
//! always starts a fresh entry.
//!
//! ```
//! use timefold::History;
//! use timefold::navigate::{jump, redo, undo};
//! use timefold::Snapshots;
//!
//! let history: History<i32> = History::from_parts(vec![0, 1], 2, vec![]);
//!
//! let back = undo::<_, Snapshots>(history.clone());
//! assert_eq!((back.past.clone(), back.present, back.future.clone()), (vec![0], 1, vec![2]));
//! assert_eq!(redo::<_, Snapshots>(back), history);
//!
//! let start = jump::<_, Snapshots>(history, -2);
//! assert_eq!((start.present, start.future), (0, vec![1, 2]));
//! ```

use crate::history::History;
use crate::storage::Storage;

/// Step back one entry. No-op when `past` is empty.
pub fn undo<T: Clone, S: Storage<T>>(history: History<T, S::Entry>) -> History<T, S::Entry> {
    match history.past.len() {
        0 => history,
        n => jump_to_past::<T, S>(history, n - 1),
    }
}

/// Step forward one entry. No-op when `future` is empty.
pub fn redo<T: Clone, S: Storage<T>>(history: History<T, S::Entry>) -> History<T, S::Entry> {
    jump_to_future::<T, S>(history, 0)
}

/// Make the state at `past[index]` the present.
///
/// Entries after `index` and the old present move to the front of `future`
/// in order; `past` keeps `past[..index]`. No-op when `index` is out of
/// range.
pub fn jump_to_past<T: Clone, S: Storage<T>>(
    history: History<T, S::Entry>,
    index: usize,
) -> History<T, S::Entry> {
    if index >= history.past.len() {
        return history;
    }

    let History {
        mut past,
        present,
        future,
        latest_unfiltered,
        extra,
        ..
    } = history;

    let crossed = past.split_off(index);
    let mut moved = Vec::with_capacity(crossed.len() + future.len());
    let mut current = present;
    let mut baseline = latest_unfiltered;
    for entry in crossed.into_iter().rev() {
        let (state, carried) = S::step_back(&current, baseline.take(), entry);
        moved.extend(carried);
        baseline = Some(state.clone());
        current = state;
    }
    moved.reverse();
    moved.extend(future);

    History {
        past,
        present: current,
        future: moved,
        latest_unfiltered: baseline,
        group: None,
        extra,
    }
}

/// Make the state at `future[index]` the present.
///
/// The old present and `future[..index]` move to the end of `past` in
/// order. No-op when `index` is out of range.
pub fn jump_to_future<T: Clone, S: Storage<T>>(
    history: History<T, S::Entry>,
    index: usize,
) -> History<T, S::Entry> {
    if index >= history.future.len() {
        return history;
    }

    let History {
        mut past,
        present,
        mut future,
        latest_unfiltered,
        extra,
        ..
    } = history;

    let remaining = future.split_off(index + 1);
    let mut current = present;
    let mut baseline = latest_unfiltered;
    for entry in future {
        let (state, carried) = S::step_forward(&current, baseline.take(), entry);
        past.extend(carried);
        baseline = Some(state.clone());
        current = state;
    }

    History {
        past,
        present: current,
        future: remaining,
        latest_unfiltered: baseline,
        group: None,
        extra,
    }
}

/// Move `n` steps: forward into the future for positive `n`, back into the
/// past for negative `n`. `0` and out-of-range steps are no-ops.
pub fn jump<T: Clone, S: Storage<T>>(
    history: History<T, S::Entry>,
    n: i64,
) -> History<T, S::Entry> {
    match n {
        0 => history,
        n if n > 0 => match usize::try_from(n - 1) {
            Ok(index) => jump_to_future::<T, S>(history, index),
            Err(_) => history,
        },
        n => {
            let back = n.unsigned_abs();
            match usize::try_from(back) {
                Ok(back) if back <= history.past.len() => {
                    let index = history.past.len() - back;
                    jump_to_past::<T, S>(history, index)
                }
                _ => history,
            }
        }
    }
}
