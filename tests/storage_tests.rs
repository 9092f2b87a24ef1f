mod common;

use common::{TodoState, draft_typed, todo_added, todo_completed, todo_deleted, todo_reducer};
use serde_json::json;
use timefold::diff::{Change, PathSegment};
use timefold::{
    Action, Diffs, History, Seed, Snapshots, UndoConfig, UndoConfigBuilder, Undoable,
    clear_history, exclude_action, group_by_action_types, jump, jump_to_future, jump_to_past,
    redo, undo,
};

fn configure<E>(builder: UndoConfigBuilder<TodoState, E>) -> UndoConfig<TodoState, E> {
    builder.build().unwrap()
}

/// Run `actions` through a snapshot-backed and a diff-backed reducer with
/// the same configuration, checking after every step that both agree.
fn assert_same_timeline(
    build: impl Fn() -> (UndoConfig<TodoState>, UndoConfig<TodoState, timefold::diff::Diff>),
    actions: &[Action],
) -> History<TodoState, timefold::diff::Diff> {
    let (snapshot_config, diff_config) = build();
    let snapshots: Undoable<TodoState, Snapshots> = Undoable::new(todo_reducer, snapshot_config);
    let diffs: Undoable<TodoState, Diffs> = Undoable::new(todo_reducer, diff_config);

    let mut a = snapshots.reduce(Seed::Unset, &Action::new("start"));
    let mut b = diffs.reduce(Seed::Unset, &Action::new("start"));
    for (step, action) in actions.iter().enumerate() {
        a = snapshots.reduce(a, action);
        b = diffs.reduce(b, action);
        assert_eq!(
            a.present, b.present,
            "present differs after step {step} ({})",
            action.action_type
        );
        assert_eq!(a.past.len(), b.past.len(), "past differs after step {step}");
        assert_eq!(a.future.len(), b.future.len(), "future differs after step {step}");
        assert_eq!(a.latest_unfiltered, b.latest_unfiltered, "baseline differs after step {step}");
    }
    b
}

#[test]
fn test_diff_entries_hold_changes_only() {
    let undoable: Undoable<TodoState, Diffs> = Undoable::new(todo_reducer, UndoConfig::default());
    let history = undoable.reduce(Seed::Unset, &todo_added("milk"));

    assert_eq!(history.past.len(), 1);
    let entry = &history.past[0];
    let new_item = vec![PathSegment::from("items"), PathSegment::Index(0)];
    let next_id = vec![PathSegment::from("next_id")];
    assert!(entry.iter().any(|c| matches!(c, Change::New { path, .. } if *path == new_item)));
    assert!(entry.iter().any(|c| matches!(c, Change::Edit { path, .. } if *path == next_id)));
    assert_eq!(history.present.items.len(), 1);
}

#[test]
fn test_diff_mode_undo_redo() {
    let undoable: Undoable<TodoState, Diffs> = Undoable::new(todo_reducer, UndoConfig::default());
    let history = undoable.reduce(Seed::Unset, &todo_added("milk"));
    let history = undoable.reduce(history, &todo_added("eggs"));
    let history = undoable.reduce(history, &todo_completed(0));
    assert!(history.present.items[0].done);

    let history = undoable.reduce(history, &undo());
    assert!(!history.present.items[0].done);
    assert_eq!(history.future.len(), 1);

    let history = undoable.reduce(history, &undo());
    assert_eq!(history.present.items.len(), 1);

    let history = undoable.reduce(history, &undo());
    assert_eq!(history.present, TodoState::default());
    assert!(history.past.is_empty());
    assert_eq!(history.future.len(), 3);

    let history = undoable.reduce(history, &jump(3));
    assert_eq!(history.present.items.len(), 2);
    assert!(history.present.items[0].done);
}

#[test]
fn test_diff_mode_matches_snapshots() {
    assert_same_timeline(
        || (UndoConfig::default(), UndoConfig::default()),
        &[
            todo_added("milk"),
            todo_added("eggs"),
            todo_added("bread"),
            todo_deleted(1),
            todo_completed(2),
            undo(),
            undo(),
            redo(),
            todo_added("jam"),
            jump_to_past(1),
            jump_to_future(2),
            jump(-4),
            jump(2),
            todo_deleted(0),
            clear_history(),
            todo_added("tea"),
            undo(),
        ],
    );
}

#[test]
fn test_diff_mode_eviction() {
    let history = assert_same_timeline(
        || {
            (
                configure(UndoConfig::builder().limit(3)),
                configure(UndoConfig::builder().limit(3)),
            )
        },
        &[
            todo_added("a"),
            todo_added("b"),
            todo_added("c"),
            todo_added("d"),
            undo(),
            undo(),
            undo(),
        ],
    );
    assert_eq!(history.past.len(), 0);
    assert_eq!(history.present.items.len(), 2);
    assert_eq!(history.future.len(), 2);
}

#[test]
fn test_diff_mode_grouping() {
    let history = assert_same_timeline(
        || {
            (
                configure(UndoConfig::builder().group_by(group_by_action_types(["draft_typed"]))),
                configure(UndoConfig::builder().group_by(group_by_action_types(["draft_typed"]))),
            )
        },
        &[
            todo_added("a"),
            draft_typed("h"),
            draft_typed("e"),
            draft_typed("y"),
            undo(),
            redo(),
            undo(),
            undo(),
            redo(),
            redo(),
        ],
    );
    assert_eq!(history.present.draft, "hey");
    assert_eq!(history.past.len(), 2);
}

#[test]
fn test_diff_mode_grouping_then_navigation() {
    assert_same_timeline(
        || {
            (
                configure(UndoConfig::builder().group_by(group_by_action_types(["draft_typed"]))),
                configure(UndoConfig::builder().group_by(group_by_action_types(["draft_typed"]))),
            )
        },
        &[
            draft_typed("a"),
            draft_typed("b"),
            todo_added("x"),
            undo(),
            undo(),
            redo(),
            redo(),
        ],
    );
}

#[test]
fn test_diff_mode_filtering() {
    assert_same_timeline(
        || {
            (
                configure(UndoConfig::builder().filter(exclude_action(["draft_typed"]))),
                configure(UndoConfig::builder().filter(exclude_action(["draft_typed"]))),
            )
        },
        &[
            todo_added("a"),
            draft_typed("x"),
            todo_added("b"),
            draft_typed("y"),
            undo(),
            undo(),
            redo(),
            redo(),
        ],
    );
}

#[test]
fn test_diff_mode_sync_filter() {
    let history = assert_same_timeline(
        || {
            (
                configure(
                    UndoConfig::builder()
                        .filter(exclude_action(["draft_typed"]))
                        .sync_filter(true),
                ),
                configure(
                    UndoConfig::builder()
                        .filter(exclude_action(["draft_typed"]))
                        .sync_filter(true),
                ),
            )
        },
        &[
            todo_added("a"),
            todo_added("b"),
            undo(),
            draft_typed("x"),
            undo(),
            redo(),
            redo(),
        ],
    );
    // Redo returns to the recorded state, which predates the draft.
    assert_eq!(history.present.items.len(), 2);
    assert_eq!(history.present.draft, "");
}

#[test]
fn test_diff_history_persists_as_json() {
    let undoable: Undoable<TodoState, Diffs> = Undoable::new(todo_reducer, UndoConfig::default());
    let history = undoable.reduce(Seed::Unset, &todo_added("milk"));
    let stored = serde_json::to_value(&history).unwrap();
    assert_eq!(stored["past"][0][0]["kind"], json!("N"));

    let seed: Seed<TodoState, timefold::diff::Diff> = Seed::from_json(stored).unwrap();
    let restored = undoable.reduce(seed, &undo());
    assert_eq!(restored.present, TodoState::default());
}
