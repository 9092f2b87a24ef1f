use serde::{Deserialize, Serialize};
use serde_json::json;
use timefold::diff::{Change, Diff, PathSegment};
use timefold::{Error, History, Seed};

/// A state with no sensible default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Cursor {
    line: u32,
    column: u32,
}

fn at(line: u32, column: u32) -> Cursor {
    Cursor { line, column }
}

#[test]
fn test_rehydrate_state_without_default() {
    let stored = json!({
        "past": [{"line": 0, "column": 0}],
        "present": {"line": 1, "column": 4},
        "future": [],
        "_latestUnfiltered": {"line": 1, "column": 4}
    });

    let seed: Seed<Cursor> = Seed::from_json(stored).unwrap();
    let Seed::History(history) = seed else {
        panic!("expected a history seed");
    };
    assert_eq!(history.past, vec![at(0, 0)]);
    assert_eq!(history.present, at(1, 4));
    assert!(history.future.is_empty());
    assert_eq!(history.latest_unfiltered, Some(at(1, 4)));
}

#[test]
fn test_rehydrate_without_baseline_field() {
    let stored = json!({"past": [], "present": {"line": 2, "column": 0}, "future": []});
    let history: History<Cursor> = serde_json::from_value(stored).unwrap();
    assert_eq!(history.present, at(2, 0));
    assert_eq!(history.latest_unfiltered, None);
    assert_eq!(history.group, None);
}

#[test]
fn test_rehydrate_diff_history_without_default() {
    let history: History<Cursor, Diff> = History::from_parts(
        vec![vec![Change::Edit {
            path: vec![PathSegment::from("column")],
            lhs: json!(0),
            rhs: json!(4),
        }]],
        at(1, 4),
        Vec::new(),
    );
    let stored = serde_json::to_value(&history).unwrap();
    let restored: History<Cursor, Diff> = serde_json::from_value(stored).unwrap();
    assert_eq!(restored, history);
}

#[test]
fn test_from_json_rejects_mistyped_history() {
    let err = Seed::<i64>::from_json(json!({"past": [], "present": "x", "future": []}))
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().starts_with("failed to read seed state"));
}

#[test]
fn test_from_json_rejects_mistyped_state() {
    let err = Seed::<i64>::from_json(json!("x")).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_from_json_null_is_unset() {
    assert_eq!(Seed::<i64>::from_json(json!(null)).unwrap(), Seed::Unset);
}

#[test]
fn test_history_accessors() {
    let history: History<i64> = History::from_parts(vec![0, 1], 2, vec![3]);
    assert_eq!(history.index(), 2);
    assert_eq!(history.len(), 4);
    assert!(!history.is_empty());
    assert!(history.can_undo());
    assert!(history.can_redo());

    let fresh: History<i64> = History::new(0);
    assert!(!fresh.can_undo());
    assert!(!fresh.can_redo());
}
