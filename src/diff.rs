//! Structural diff and patch over [`serde_json::Value`] trees.
//!
//! [`diff`] computes an edit script between two values, [`apply`] replays it
//! and [`revert`] replays its inverse. Array diffs use a greedy one-element
//! lookahead instead of a longest-common-subsequence search: reducers almost
//! always append, remove or edit a single element, and the greedy walk handles
//! those in one pass.
//!
//! # Array index conventions
//!
//! Within one array, `D` entries and descents into an element address the
//! element by its index in the *source* array, while `N` entries address the
//! position the new element occupies in the *result* array. Applying a script
//! therefore shifts source indices by the inserts and deletes already applied
//! to that array in the same pass (see [`find_index_of`]); result indices are
//! used as-is.
//!
//! ```
//! use timefold::diff::{apply, diff, revert};
//! use serde_json::json;
//!
//! let before = json!({"todos": ["milk", "eggs"], "filter": "all"});
//! let after = json!({"todos": ["milk", "bread", "eggs"], "filter": "open"});
//!
//! let script = diff(&before, &after);
//! assert_eq!(apply(before.clone(), &script), after);
//! assert_eq!(revert(after, &script), before);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// One step of a path into a value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An array position.
    Index(usize),
    /// An object key.
    Key(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Key(k) => write!(f, "{k}"),
        }
    }
}

/// A single edit at a path.
///
/// Serialized with a `"kind"` tag of `"N"`, `"D"` or `"E"`:
///
/// ```
/// use timefold::diff::Change;
/// use serde_json::json;
///
/// let change = Change::New { path: vec!["name".into()], rhs: json!("alice") };
/// assert_eq!(
///     serde_json::to_value(&change).unwrap(),
///     json!({"kind": "N", "path": ["name"], "rhs": "alice"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Change {
    /// A new object key or array element.
    #[serde(rename = "N")]
    New {
        /// Where the value is inserted.
        path: Vec<PathSegment>,
        /// The inserted value.
        rhs: Value,
    },
    /// A removed object key or array element.
    #[serde(rename = "D")]
    Delete {
        /// Where the value is removed.
        path: Vec<PathSegment>,
        /// The removed value.
        lhs: Value,
    },
    /// A value replaced in place.
    #[serde(rename = "E")]
    Edit {
        /// Where the value is replaced.
        path: Vec<PathSegment>,
        /// The value before.
        lhs: Value,
        /// The value after.
        rhs: Value,
    },
}

impl Change {
    /// The path this change targets.
    pub fn path(&self) -> &[PathSegment] {
        match self {
            Change::New { path, .. } | Change::Delete { path, .. } | Change::Edit { path, .. } => {
                path
            }
        }
    }

    /// The change that undoes this one: inserts become deletes and vice
    /// versa, edits swap their sides. The path is unchanged.
    pub fn inverse(&self) -> Change {
        match self {
            Change::New { path, rhs } => Change::Delete {
                path: path.clone(),
                lhs: rhs.clone(),
            },
            Change::Delete { path, lhs } => Change::New {
                path: path.clone(),
                rhs: lhs.clone(),
            },
            Change::Edit { path, lhs, rhs } => Change::Edit {
                path: path.clone(),
                lhs: rhs.clone(),
                rhs: lhs.clone(),
            },
        }
    }
}

/// An ordered edit script.
pub type Diff = Vec<Change>;

/// Compute the edit script that turns `lhs` into `rhs`.
///
/// Returns an empty script iff the values are equal. Values of different
/// kinds (null vs object, array vs object, string vs number, ...) are never
/// diffed structurally: the result is a single [`Change::Edit`] at the
/// current path.
///
/// # Examples
///
/// ```
/// use timefold::diff::{diff, Change};
/// use serde_json::json;
///
/// let script = diff(&json!([1, 2, 4, 5, 6]), &json!([2, 3, 4, 6, 7]));
/// let kinds: Vec<_> = script
///     .iter()
///     .map(|c| match c {
///         Change::New { .. } => 'N',
///         Change::Delete { .. } => 'D',
///         Change::Edit { .. } => 'E',
///     })
///     .collect();
/// assert_eq!(kinds, ['D', 'N', 'D', 'N']);
/// ```
pub fn diff(lhs: &Value, rhs: &Value) -> Diff {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    diff_at(lhs, rhs, &mut path, &mut changes);
    changes
}

fn diff_at(lhs: &Value, rhs: &Value, path: &mut Vec<PathSegment>, out: &mut Diff) {
    if lhs == rhs {
        return;
    }
    match (lhs, rhs) {
        (Value::Object(l), Value::Object(r)) => diff_object(l, r, path, out),
        (Value::Array(l), Value::Array(r)) => diff_array(l, r, path, out),
        _ => out.push(Change::Edit {
            path: path.clone(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        }),
    }
}

fn diff_object(
    lhs: &Map<String, Value>,
    rhs: &Map<String, Value>,
    path: &mut Vec<PathSegment>,
    out: &mut Diff,
) {
    for (key, left) in lhs {
        path.push(PathSegment::Key(key.clone()));
        match rhs.get(key) {
            Some(right) => diff_at(left, right, path, out),
            None => out.push(Change::Delete {
                path: path.clone(),
                lhs: left.clone(),
            }),
        }
        path.pop();
    }
    for (key, right) in rhs {
        if lhs.contains_key(key) {
            continue;
        }
        path.push(PathSegment::Key(key.clone()));
        out.push(Change::New {
            path: path.clone(),
            rhs: right.clone(),
        });
        path.pop();
    }
}

fn diff_array(lhs: &[Value], rhs: &[Value], path: &mut Vec<PathSegment>, out: &mut Diff) {
    let mut li = 0;
    let mut ri = 0;
    while li < lhs.len() || ri < rhs.len() {
        if li >= lhs.len() {
            path.push(PathSegment::Index(ri));
            out.push(Change::New {
                path: path.clone(),
                rhs: rhs[ri].clone(),
            });
            path.pop();
            ri += 1;
        } else if ri >= rhs.len() {
            path.push(PathSegment::Index(li));
            out.push(Change::Delete {
                path: path.clone(),
                lhs: lhs[li].clone(),
            });
            path.pop();
            li += 1;
        } else if lhs[li] == rhs[ri] {
            li += 1;
            ri += 1;
        } else if lhs.get(li + 1) == Some(&rhs[ri]) {
            path.push(PathSegment::Index(li));
            out.push(Change::Delete {
                path: path.clone(),
                lhs: lhs[li].clone(),
            });
            path.pop();
            li += 1;
        } else if rhs.get(ri + 1) == Some(&lhs[li]) {
            path.push(PathSegment::Index(ri));
            out.push(Change::New {
                path: path.clone(),
                rhs: rhs[ri].clone(),
            });
            path.pop();
            ri += 1;
        } else {
            path.push(PathSegment::Index(li));
            diff_at(&lhs[li], &rhs[ri], path, out);
            path.pop();
            li += 1;
            ri += 1;
        }
    }
}

/// Binary search over a sorted list of recorded indices.
///
/// With `inclusive` set, returns the position of the last occurrence of
/// `value`, or of the first element greater than `value` when it is absent.
/// Otherwise returns the position just past every element `<= value`, which
/// is the number of recorded indices at or before `value`.
///
/// # Examples
///
/// ```
/// use timefold::diff::find_index_of;
///
/// assert_eq!(find_index_of(&[1, 2, 4, 4, 4, 5], 4, true), 4);
/// assert_eq!(find_index_of(&[1, 2, 3, 5], 4, true), 3);
/// assert_eq!(find_index_of(&[1, 2, 3, 3, 5], 3, false), 4);
/// ```
pub fn find_index_of<T: Ord>(sorted: &[T], value: T, inclusive: bool) -> usize {
    let after = sorted.partition_point(|x| *x <= value);
    if inclusive && after > 0 && sorted[after - 1] == value {
        after - 1
    } else {
        after
    }
}

/// Per-pass bookkeeping for one node of the tree being patched.
///
/// `inserted` and `deleted` hold, sorted, the source indices of array
/// elements already inserted before / deleted from this node during the
/// current pass. Children are keyed by the segment as written in the script.
#[derive(Debug, Default)]
struct ApplyCache {
    children: HashMap<PathSegment, ApplyCache>,
    inserted: Vec<usize>,
    deleted: Vec<usize>,
}

impl ApplyCache {
    /// Where the source element `index` currently sits.
    fn shifted(&self, index: usize) -> Option<usize> {
        let inserts = find_index_of(&self.inserted, index, false);
        let deletes = find_index_of(&self.deleted, index, false);
        (index + inserts).checked_sub(deletes)
    }

    fn record_insert(&mut self, position: usize) {
        let source = (position + self.deleted.len()).saturating_sub(self.inserted.len());
        let at = find_index_of(&self.inserted, source, false);
        self.inserted.insert(at, source);
    }

    fn record_delete(&mut self, index: usize) {
        let at = find_index_of(&self.deleted, index, false);
        self.deleted.insert(at, index);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Forward,
    Backward,
}

/// Replay `diff` against `base`.
///
/// Inconsistencies (an expected value that doesn't match, a missing key, an
/// index out of bounds, an array operation on a non-array) are logged at
/// debug level and that one change is skipped; the rest of the script is
/// still applied.
pub fn apply(base: Value, diff: &[Change]) -> Value {
    run(base, diff.iter().cloned(), Direction::Forward)
}

/// Replay the inverse of `diff` against `base`, so that
/// `revert(apply(a, &d), &d) == a` for any `d = diff(&a, &b)`.
pub fn revert(base: Value, diff: &[Change]) -> Value {
    run(base, diff.iter().map(Change::inverse), Direction::Backward)
}

/// The inverse script: every change inverted, in the same order.
pub fn invert(diff: &[Change]) -> Diff {
    diff.iter().map(Change::inverse).collect()
}

fn run(mut base: Value, changes: impl Iterator<Item = Change>, direction: Direction) -> Value {
    let mut cache = ApplyCache::default();
    for change in changes {
        apply_change(&mut base, &change, &mut cache, 0, direction);
    }
    base
}

fn apply_change(
    node: &mut Value,
    change: &Change,
    cache: &mut ApplyCache,
    depth: usize,
    direction: Direction,
) {
    let path = change.path();

    if depth == path.len() {
        match change {
            Change::Edit { lhs, rhs, .. } => {
                if node != lhs {
                    log::debug!(
                        target: "timefold::diff",
                        "expected {lhs} at `{}`, found {node}",
                        display_path(path)
                    );
                }
                *node = rhs.clone();
                *cache = ApplyCache::default();
            }
            Change::New { .. } | Change::Delete { .. } => {
                log::debug!(
                    target: "timefold::diff",
                    "insert or delete cannot target the root path"
                );
            }
        }
        return;
    }

    let segment = &path[depth];
    if depth + 1 == path.len() {
        match (change, segment) {
            (Change::New { rhs, .. }, PathSegment::Index(i)) => {
                return insert_element(node, *i, rhs, cache, path);
            }
            (Change::Delete { lhs, .. }, PathSegment::Index(i)) => {
                return delete_element(node, *i, lhs, cache, path);
            }
            (Change::New { rhs, .. }, PathSegment::Key(k)) => {
                return insert_key(node, k, rhs, cache, path);
            }
            (Change::Delete { lhs, .. }, PathSegment::Key(k)) => {
                return delete_key(node, k, lhs, cache, path);
            }
            (Change::Edit { .. }, _) => {}
        }
    }

    let child = match (segment, &mut *node) {
        (PathSegment::Index(i), Value::Array(items)) => {
            let target = match direction {
                Direction::Forward => cache.shifted(*i),
                Direction::Backward => Some(*i),
            };
            match target {
                Some(t) => items.get_mut(t),
                None => None,
            }
        }
        (PathSegment::Key(k), Value::Object(map)) => map.get_mut(k),
        _ => None,
    };
    let Some(child) = child else {
        log::debug!(
            target: "timefold::diff",
            "no value at `{}` while applying change to `{}`",
            display_path(&path[..=depth]),
            display_path(path)
        );
        return;
    };
    let child_cache = cache.children.entry(segment.clone()).or_default();
    apply_change(child, change, child_cache, depth + 1, direction);
}

fn insert_element(
    node: &mut Value,
    position: usize,
    rhs: &Value,
    cache: &mut ApplyCache,
    path: &[PathSegment],
) {
    let Value::Array(items) = node else {
        log::debug!(
            target: "timefold::diff",
            "array insert on non-array at `{}`",
            display_path(path)
        );
        return;
    };
    if position > items.len() {
        log::debug!(
            target: "timefold::diff",
            "insert index {position} out of bounds (len {}) at `{}`",
            items.len(),
            display_path(path)
        );
        return;
    }
    cache.record_insert(position);
    items.insert(position, rhs.clone());
}

fn delete_element(
    node: &mut Value,
    index: usize,
    lhs: &Value,
    cache: &mut ApplyCache,
    path: &[PathSegment],
) {
    let Value::Array(items) = node else {
        log::debug!(
            target: "timefold::diff",
            "array delete on non-array at `{}`",
            display_path(path)
        );
        return;
    };
    let target = match cache.shifted(index) {
        Some(t) if t < items.len() => t,
        _ => {
            log::debug!(
                target: "timefold::diff",
                "delete index {index} out of bounds (len {}) at `{}`",
                items.len(),
                display_path(path)
            );
            return;
        }
    };
    if items[target] != *lhs {
        log::debug!(
            target: "timefold::diff",
            "expected {lhs} at `{}`, found {}",
            display_path(path),
            items[target]
        );
    }
    cache.record_delete(index);
    items.remove(target);
}

fn insert_key(
    node: &mut Value,
    key: &str,
    rhs: &Value,
    cache: &mut ApplyCache,
    path: &[PathSegment],
) {
    let Value::Object(map) = node else {
        log::debug!(target: "timefold::diff", "expected an object at `{}`", display_path(path));
        return;
    };
    if map.contains_key(key) {
        log::debug!(
            target: "timefold::diff",
            "`{}` already exists, overwriting", display_path(path)
        );
    }
    cache.children.remove(&PathSegment::Key(key.to_string()));
    map.insert(key.to_string(), rhs.clone());
}

fn delete_key(
    node: &mut Value,
    key: &str,
    lhs: &Value,
    cache: &mut ApplyCache,
    path: &[PathSegment],
) {
    let Value::Object(map) = node else {
        log::debug!(target: "timefold::diff", "expected an object at `{}`", display_path(path));
        return;
    };
    let Some(current) = map.get(key) else {
        log::debug!(
            target: "timefold::diff",
            "`{}` is missing, nothing to delete", display_path(path)
        );
        return;
    };
    if current != lhs {
        log::debug!(
            target: "timefold::diff",
            "expected {lhs} at `{}`, found {current}",
            display_path(path)
        );
    }
    cache.children.remove(&PathSegment::Key(key.to_string()));
    map.remove(key);
}

fn display_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
