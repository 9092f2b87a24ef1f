//! A drawing canvas that stores diffs instead of snapshots.
//!
//! Dragging a shape emits many `drag` actions; grouping folds each drag
//! into a single undo step, and `Diffs` keeps only what changed between
//! steps.

use serde::{Deserialize, Serialize};
use serde_json::json;
use timefold::{
    Action, Diffs, History, Seed, UndoConfig, Undoable, exclude_action, group_by_action_types,
    jump_to_past, undo,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Canvas {
    shapes: Vec<Shape>,
    selected: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Shape {
    kind: String,
    x: i64,
    y: i64,
}

fn canvas_reducer(mut state: Canvas, action: &Action) -> Canvas {
    let p = &action.payload;
    match action.action_type.as_str() {
        "add_shape" => {
            state.shapes.push(Shape {
                kind: p["kind"].as_str().unwrap_or("rect").to_string(),
                x: p["x"].as_i64().unwrap_or(0),
                y: p["y"].as_i64().unwrap_or(0),
            });
        }
        "select" => state.selected = p.as_u64().map(|i| i as usize),
        "drag" => {
            if let Some(shape) = state.selected.and_then(|i| state.shapes.get_mut(i)) {
                shape.x += p["dx"].as_i64().unwrap_or(0);
                shape.y += p["dy"].as_i64().unwrap_or(0);
            }
        }
        "remove_shape" => {
            if let Some(i) = p.as_u64().map(|i| i as usize) {
                if i < state.shapes.len() {
                    state.shapes.remove(i);
                    state.selected = None;
                }
            }
        }
        _ => {}
    }
    state
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = UndoConfig::builder()
        .filter(exclude_action(["select"]))
        .sync_filter(true)
        .group_by(group_by_action_types(["drag"]))
        .action_field("actionType")
        .build()?;
    let undoable: Undoable<Canvas, Diffs> = Undoable::new(canvas_reducer, config);

    let mut steps = vec![
        Action::new("add_shape").with_payload(json!({"kind": "rect", "x": 0, "y": 0})),
        Action::new("add_shape").with_payload(json!({"kind": "circle", "x": 50, "y": 50})),
        Action::new("select").with_payload(json!(1)),
    ];
    for _ in 0..5 {
        steps.push(Action::new("drag").with_payload(json!({"dx": 2, "dy": -1})));
    }
    steps.push(Action::new("remove_shape").with_payload(json!(0)));

    let mut history: History<Canvas, _> = undoable.reduce(Seed::Unset, &Action::new("open"));
    for action in &steps {
        history = undoable.reduce(history, action);
    }
    report("after drawing", &history)?;

    history = undoable.reduce(history, &undo());
    report("undo remove", &history)?;

    history = undoable.reduce(history, &undo());
    report("undo whole drag", &history)?;

    history = undoable.reduce(history, &jump_to_past(0));
    report("back to the blank canvas", &history)?;

    Ok(())
}

fn report(label: &str, history: &History<Canvas, timefold::diff::Diff>) -> serde_json::Result<()> {
    println!("== {label}");
    println!("   shapes:  {}", serde_json::to_string(&history.present.shapes)?);
    println!("   steps:   {} back, {} ahead", history.past.len(), history.future.len());
    if let Some(entry) = history.past.last() {
        println!("   last:    {}", serde_json::to_string(entry)?);
    }
    Ok(())
}
