use serde_json::json;
use timefold::{Action, clear_history, jump, jump_to_future, jump_to_past, redo, types, undo};

#[test]
fn test_action_creators() {
    assert_eq!(undo().action_type, types::UNDO);
    assert_eq!(redo().action_type, types::REDO);
    assert_eq!(clear_history().action_type, types::CLEAR_HISTORY);

    let a = jump(-2);
    assert_eq!(a.action_type, types::JUMP);
    assert_eq!(a.index, Some(-2));

    assert_eq!(jump_to_past(3).action_type, types::JUMP_TO_PAST);
    assert_eq!(jump_to_past(3).index, Some(3));
    assert_eq!(jump_to_future(0).action_type, types::JUMP_TO_FUTURE);
    assert_eq!(jump_to_future(0).index, Some(0));
}

#[test]
fn test_reserved_types_are_distinct() {
    let all = [
        types::UNDO,
        types::REDO,
        types::JUMP,
        types::JUMP_TO_PAST,
        types::JUMP_TO_FUTURE,
        types::CLEAR_HISTORY,
        types::INIT,
        types::CREATE_HISTORY,
    ];
    for (i, a) in all.iter().enumerate() {
        assert!(a.starts_with("@@timefold/"));
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_action_serialization() {
    let action = Action::new("todo_added").with_payload(json!({"text": "milk"}));
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({"type": "todo_added", "payload": {"text": "milk"}})
    );

    let action = jump(4);
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({"type": types::JUMP, "index": 4})
    );
}

#[test]
fn test_action_deserialization_defaults() {
    let action: Action = serde_json::from_value(json!({"type": "ping"})).unwrap();
    assert_eq!(action, Action::new("ping"));
    assert!(action.payload.is_null());
    assert_eq!(action.index, None);
}

#[test]
fn test_action_deserialization_full() {
    let action: Action =
        serde_json::from_value(json!({"type": "move", "index": -1, "payload": [1, 2]})).unwrap();
    assert_eq!(action.action_type, "move");
    assert_eq!(action.index, Some(-1));
    assert_eq!(action.payload, json!([1, 2]));
}
