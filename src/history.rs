use crate::error::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key shared by consecutive actions that should collapse into one entry.
pub type GroupKey = String;

/// A navigable timeline around a present state.
///
/// `E` is the entry type of the storage strategy: the state itself for
/// [`Snapshots`](crate::Snapshots), a [`Diff`](crate::diff::Diff) for
/// [`Diffs`](crate::Diffs). `present` and `latest_unfiltered` are always full
/// states.
///
/// Serializes to the layout hosts persist and rehydrate:
///
/// ```
/// use timefold::History;
/// use serde_json::json;
///
/// let history: History<u32> = History::new(3);
/// assert_eq!(
///     serde_json::to_value(&history).unwrap(),
///     json!({"past": [], "present": 3, "future": [], "_latestUnfiltered": 3})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, E: Deserialize<'de>"))]
#[non_exhaustive]
pub struct History<T, E = T> {
    /// Older entries, oldest first.
    pub past: Vec<E>,

    /// The visible state.
    pub present: T,

    /// Newer entries reachable with redo, nearest first.
    pub future: Vec<E>,

    /// The last state that was not filtered out: what undo and insert treat
    /// as the current entry. Differs from `present` only while filtered
    /// actions have been applied on top of it. `None` when the initial
    /// state is excluded from history and nothing has been committed yet.
    #[serde(
        rename = "_latestUnfiltered",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_unfiltered: Option<T>,

    /// Group key of the most recent entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupKey>,

    /// Fields owned by [extensions](crate::extension).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T: Clone, E> History<T, E> {
    /// A history with nothing recorded yet, whose baseline is `present`.
    pub fn new(present: T) -> Self {
        History {
            past: Vec::new(),
            latest_unfiltered: Some(present.clone()),
            present,
            future: Vec::new(),
            group: None,
            extra: Map::new(),
        }
    }

    /// Like [`History::new`], but with no baseline: the first committed
    /// state will not push `present` into `past`, so it can't be undone to.
    pub fn without_baseline(present: T) -> Self {
        History {
            past: Vec::new(),
            present,
            future: Vec::new(),
            latest_unfiltered: None,
            group: None,
            extra: Map::new(),
        }
    }

    pub(crate) fn create(present: T, ignore_initial_state: bool) -> Self {
        if ignore_initial_state {
            History::without_baseline(present)
        } else {
            History::new(present)
        }
    }
}

impl<T, E> History<T, E> {
    /// Build a history from its parts, with the baseline set to `present`.
    pub fn from_parts(past: Vec<E>, present: T, future: Vec<E>) -> Self
    where
        T: Clone,
    {
        History {
            past,
            latest_unfiltered: Some(present.clone()),
            present,
            future,
            group: None,
            extra: Map::new(),
        }
    }

    /// Position of the present in the timeline (`past.len()`).
    pub fn index(&self) -> usize {
        self.past.len()
    }

    /// Number of recorded points: past, present and future.
    pub fn len(&self) -> usize {
        self.past.len() + 1 + self.future.len()
    }

    /// Always false: a history holds at least its present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether there is a past entry to step back to.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether there is a future entry to step forward to.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

/// Structural check for the persisted history layout: an object with a
/// `present` field and array-valued `past` and `future`.
///
/// # Examples
///
/// ```
/// use timefold::is_history;
/// use serde_json::json;
///
/// assert!(is_history(&json!({"past": [1], "present": 2, "future": []})));
/// assert!(!is_history(&json!({"past": 1, "present": 2, "future": []})));
/// assert!(!is_history(&json!([1, 2, 3])));
/// ```
pub fn is_history(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    map.contains_key("present")
        && map.get("past").is_some_and(Value::is_array)
        && map.get("future").is_some_and(Value::is_array)
}

/// The state handed to [`Undoable::reduce`](crate::Undoable::reduce).
///
/// A host either has nothing yet, has a history from a previous call (or
/// from storage), or has a plain state it wants tracked from now on.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed<T, E = T> {
    /// No state yet; the wrapped reducer produces the initial present.
    Unset,
    /// An existing history, adopted as-is.
    History(History<T, E>),
    /// A plain initial present.
    Present(T),
}

impl<T, E> Seed<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    /// Read a seed from JSON: a value that looks like a history (see
    /// [`is_history`]) is deserialized as one, anything else as a plain
    /// state. `null` is [`Seed::Unset`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value does not deserialize into the
    /// shape it was recognized as.
    ///
    /// # Examples
    ///
    /// ```
    /// use timefold::Seed;
    /// use serde_json::json;
    ///
    /// let stored = json!({"past": [0], "present": 1, "future": []});
    /// let seed: Seed<i64> = Seed::from_json(stored).unwrap();
    /// assert!(matches!(seed, Seed::History(h) if h.past == vec![0] && h.present == 1));
    ///
    /// let seed: Seed<i64> = Seed::from_json(json!(7)).unwrap();
    /// assert_eq!(seed, Seed::Present(7));
    /// ```
    pub fn from_json(value: Value) -> Result<Self, Error> {
        if value.is_null() {
            return Ok(Seed::Unset);
        }
        if is_history(&value) {
            return Ok(Seed::History(serde_json::from_value(value)?));
        }
        Ok(Seed::Present(serde_json::from_value(value)?))
    }
}

impl<T, E> From<History<T, E>> for Seed<T, E> {
    fn from(history: History<T, E>) -> Self {
        Seed::History(history)
    }
}
