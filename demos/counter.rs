//! A counter with undo, redo and jumps.
//!
//! Dispatches a handful of actions through an `Undoable` and prints the
//! timeline after each one, so the movement between past, present and
//! future is visible.

use timefold::{Action, History, Seed, UndoConfig, Undoable, clear_history, jump, redo, undo};

fn counter(state: i64, action: &Action) -> i64 {
    match action.action_type.as_str() {
        "increment" => state + 1,
        "decrement" => state - 1,
        "add" => state + action.payload.as_i64().unwrap_or(0),
        _ => state,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = UndoConfig::builder().limit(5).build()?;
    let undoable: Undoable<i64> = Undoable::new(counter, config);

    let steps = [
        Action::new("increment"),
        Action::new("increment"),
        Action::new("add").with_payload(serde_json::json!(10)),
        undo(),
        undo(),
        redo(),
        jump(-2),
        Action::new("decrement"),
        Action::new("increment"),
        Action::new("increment"),
        Action::new("increment"),
        Action::new("increment"),
        clear_history(),
    ];

    let mut history: History<i64> = undoable.reduce(Seed::Present(0), &Action::new("start"));
    print_timeline("start", &history);
    for action in &steps {
        history = undoable.reduce(history, action);
        print_timeline(&action.action_type, &history);
    }

    println!("\nPersisted: {}", serde_json::to_string(&history)?);
    Ok(())
}

fn print_timeline(label: &str, history: &History<i64>) {
    println!(
        "{label:>24}  past={:?} present={} future={:?}",
        history.past, history.present, history.future
    );
}
