#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::json;
use timefold::{Action, History, Snapshots, UndoConfig, Undoable};

pub fn increment() -> Action {
    Action::new("INCREMENT")
}

pub fn decrement() -> Action {
    Action::new("DECREMENT")
}

pub fn counter_reducer(state: i64, action: &Action) -> i64 {
    match action.action_type.as_str() {
        "INCREMENT" => state + 1,
        "DECREMENT" => state - 1,
        "SET" => action.payload.as_i64().unwrap_or(state),
        _ => state,
    }
}

/// A counter wrapped with the given config.
pub fn counter(config: UndoConfig<i64>) -> Undoable<i64> {
    Undoable::new(counter_reducer, config)
}

/// Dispatch every action in turn, starting from `history`.
pub fn dispatch_all<S, E>(
    undoable: &Undoable<i64, S>,
    history: History<i64, E>,
    actions: &[Action],
) -> History<i64, E>
where
    S: timefold::Storage<i64, Entry = E>,
{
    actions
        .iter()
        .fold(history, |history, action| undoable.reduce(history, action))
}

pub fn snapshots(past: Vec<i64>, present: i64, future: Vec<i64>) -> History<i64> {
    History::<i64, i64>::from_parts(past, present, future)
}

pub fn set(value: i64) -> Action {
    Action::new("SET").with_payload(json!(value))
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoState {
    pub items: Vec<TodoItem>,
    pub next_id: u64,
    pub draft: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

pub fn todo_added(text: &str) -> Action {
    Action::new("todo_added").with_payload(json!({"text": text}))
}

pub fn todo_completed(id: u64) -> Action {
    Action::new("todo_completed").with_payload(json!({"id": id}))
}

pub fn todo_deleted(id: u64) -> Action {
    Action::new("todo_deleted").with_payload(json!({"id": id}))
}

pub fn draft_typed(text: &str) -> Action {
    Action::new("draft_typed").with_payload(json!({"text": text}))
}

pub fn todo_reducer(mut state: TodoState, action: &Action) -> TodoState {
    match action.action_type.as_str() {
        "todo_added" => {
            state.items.push(TodoItem {
                id: state.next_id,
                text: action.payload["text"].as_str().unwrap_or("").to_string(),
                done: false,
            });
            state.next_id += 1;
        }
        "todo_completed" => {
            let id = action.payload["id"].as_u64().unwrap_or(0);
            if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
                item.done = true;
            }
        }
        "todo_deleted" => {
            let id = action.payload["id"].as_u64().unwrap_or(0);
            state.items.retain(|i| i.id != id);
        }
        "draft_typed" => {
            state
                .draft
                .push_str(action.payload["text"].as_str().unwrap_or(""));
        }
        _ => {}
    }
    state
}

pub fn todos() -> Undoable<TodoState, Snapshots> {
    Undoable::new(todo_reducer, UndoConfig::default())
}
