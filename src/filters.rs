//! Ready-made filter and group-by callbacks for [`UndoConfigBuilder`](crate::UndoConfigBuilder).

use crate::action::Action;
use crate::config::{ActionTypeSet, FilterFn};
use crate::history::{GroupKey, History};

/// Record only actions whose type is in `types`.
///
/// # Examples
///
/// ```
/// use timefold::{Action, History, include_action};
///
/// let filter = include_action(["add", "remove"]);
/// let history: History<i32> = History::new(0);
/// assert!(filter(&Action::new("add"), &1, &history));
/// assert!(!filter(&Action::new("hover"), &1, &history));
/// ```
pub fn include_action<T: 'static, E: 'static>(
    types: impl Into<ActionTypeSet>,
) -> impl Fn(&Action, &T, &History<T, E>) -> bool + 'static {
    matching(types.into(), true)
}

/// Record every action except those whose type is in `types`.
pub fn exclude_action<T: 'static, E: 'static>(
    types: impl Into<ActionTypeSet>,
) -> impl Fn(&Action, &T, &History<T, E>) -> bool + 'static {
    matching(types.into(), false)
}

fn matching<T: 'static, E: 'static>(
    types: ActionTypeSet,
    wanted: bool,
) -> impl Fn(&Action, &T, &History<T, E>) -> bool + 'static {
    move |action: &Action, _: &T, _: &History<T, E>| types.contains(&action.action_type) == wanted
}

/// A filter that records an action only if every filter in `filters` does.
///
/// Evaluation stops at the first rejection. No filters at all records
/// everything.
///
/// # Examples
///
/// ```
/// use timefold::{Action, History, combine_filters, exclude_action};
/// use timefold::FilterFn;
///
/// let filters: Vec<FilterFn<i32, i32>> = vec![
///     Box::new(exclude_action(["hover"])),
///     Box::new(|_: &Action, state: &i32, _: &History<i32>| *state < 10),
/// ];
/// let filter = combine_filters(filters);
/// let history = History::new(0);
///
/// assert!(filter(&Action::new("add"), &3, &history));
/// assert!(!filter(&Action::new("add"), &30, &history));
/// assert!(!filter(&Action::new("hover"), &3, &history));
/// ```
pub fn combine_filters<T: 'static, E: 'static>(
    filters: Vec<FilterFn<T, E>>,
) -> impl Fn(&Action, &T, &History<T, E>) -> bool + 'static {
    move |action: &Action, state: &T, history: &History<T, E>| {
        filters.iter().all(|filter| filter(action, state, history))
    }
}

/// Group consecutive actions of the same type, for the types in `types`.
///
/// The group key is the action type itself; other actions are ungrouped.
///
/// # Examples
///
/// ```
/// use timefold::{Action, History, group_by_action_types};
///
/// let group_by = group_by_action_types(["typed"]);
/// let history: History<String> = History::new(String::new());
/// assert_eq!(
///     group_by(&Action::new("typed"), &"a".to_string(), &history),
///     Some("typed".to_string())
/// );
/// assert_eq!(group_by(&Action::new("saved"), &"a".to_string(), &history), None);
/// ```
pub fn group_by_action_types<T: 'static, E: 'static>(
    types: impl Into<ActionTypeSet>,
) -> impl Fn(&Action, &T, &History<T, E>) -> Option<GroupKey> + 'static {
    grouping(types.into())
}

fn grouping<T: 'static, E: 'static>(
    types: ActionTypeSet,
) -> impl Fn(&Action, &T, &History<T, E>) -> Option<GroupKey> + 'static {
    move |action: &Action, _: &T, _: &History<T, E>| {
        types
            .contains(&action.action_type)
            .then(|| action.action_type.clone())
    }
}
