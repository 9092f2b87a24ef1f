//! What happens to a state the wrapped reducer produced.

use crate::action::Action;
use crate::config::UndoConfig;
use crate::history::{GroupKey, History};
use crate::storage::Storage;

/// Commit `state` as a new entry.
///
/// The future is discarded. If there is a baseline it is recorded onto the
/// end of `past` through the storage strategy; then the oldest entries are
/// evicted until `past.len() + 1 <= limit`. A `limit` of `None` or `0` never
/// evicts.
///
/// Evicting the oldest entry is safe in diff mode too: diffs chain outwards
/// from the materialized present, and the oldest one is only ever needed to
/// reach the oldest state.
pub fn insert<T: Clone, S: Storage<T>>(
    history: History<T, S::Entry>,
    state: T,
    limit: Option<usize>,
    group: Option<GroupKey>,
) -> History<T, S::Entry> {
    let History {
        mut past,
        latest_unfiltered,
        extra,
        ..
    } = history;

    if let Some(baseline) = &latest_unfiltered {
        past.push(S::record(baseline, &state));
    }
    if let Some(limit) = limit.filter(|&l| l > 0) {
        let keep = limit - 1;
        if past.len() > keep {
            past.drain(..past.len() - keep);
        }
    }

    History {
        past,
        latest_unfiltered: Some(state.clone()),
        present: state,
        future: Vec::new(),
        group,
        extra,
    }
}

/// How an action's result is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The reducer returned the present unchanged; nothing happens.
    Unchanged,
    /// The filter rejected the action: the present moves, history doesn't.
    Filtered,
    /// Same group as the current entry: the present replaces that entry.
    Grouped,
    /// A new entry, tagged with the given group.
    Insert(Option<GroupKey>),
}

/// Decide what to do with `candidate`, the state the wrapped reducer
/// returned for `action` on top of `prior`.
///
/// Order matters: an unchanged state short-circuits before the group or
/// filter callbacks run, and the group key is computed before filtering.
pub fn decide<T: PartialEq, E>(
    action: &Action,
    candidate: &T,
    prior: &History<T, E>,
    config: &UndoConfig<T, E>,
) -> Disposition {
    if *candidate == prior.present {
        return Disposition::Unchanged;
    }
    let group = config.group_key(action, candidate, prior);
    if !config.allows(action, candidate, prior) {
        return Disposition::Filtered;
    }
    match group {
        Some(key) if prior.group.as_ref() == Some(&key) => Disposition::Grouped,
        group => Disposition::Insert(group),
    }
}

/// Apply a [`Disposition`] to `prior`.
pub fn commit<T: Clone, S: Storage<T>>(
    prior: History<T, S::Entry>,
    candidate: T,
    disposition: Disposition,
    config: &UndoConfig<T, S::Entry>,
) -> History<T, S::Entry> {
    match disposition {
        Disposition::Unchanged => prior,
        Disposition::Filtered if config.sync_filter => {
            let mut next = move_baseline::<T, S>(prior, candidate.clone());
            next.present = candidate;
            next
        }
        Disposition::Filtered => History {
            present: candidate,
            ..prior
        },
        Disposition::Grouped => {
            let mut next = move_baseline::<T, S>(prior, candidate.clone());
            next.present = candidate;
            next
        }
        Disposition::Insert(group) => insert::<T, S>(prior, candidate, config.limit, group),
    }
}

/// Replace the baseline without recording an entry, re-anchoring the
/// neighbouring entries so they still lead to and from it.
fn move_baseline<T: Clone, S: Storage<T>>(
    mut history: History<T, S::Entry>,
    baseline: T,
) -> History<T, S::Entry> {
    if let Some(old) = history.latest_unfiltered.take() {
        if let Some(last) = history.past.pop() {
            history.past.push(S::reanchor_past(last, &old, &baseline));
        }
        if !history.future.is_empty() {
            let first = history.future.remove(0);
            history
                .future
                .insert(0, S::reanchor_future(first, &old, &baseline));
        }
    }
    history.latest_unfiltered = Some(baseline);
    history
}
