use timefold::{Action, ActionTypeSet, Error, History, UndoConfig, types};

type Config = UndoConfig<i64>;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.limit, None);
    assert_eq!(config.undo_type, types::UNDO);
    assert_eq!(config.redo_type, types::REDO);
    assert_eq!(config.jump_type, types::JUMP);
    assert_eq!(config.jump_to_past_type, types::JUMP_TO_PAST);
    assert_eq!(config.jump_to_future_type, types::JUMP_TO_FUTURE);
    assert_eq!(config.clear_history_types, ActionTypeSet::from(types::CLEAR_HISTORY));
    assert_eq!(config.init_types, ActionTypeSet::from(types::INIT));
    assert!(!config.never_skip_reducer);
    assert!(!config.ignore_initial_state);
    assert!(!config.sync_filter);
    assert!(!config.debug);
}

#[test]
fn test_builder_default_matches_default() {
    let built = Config::builder().build().unwrap();
    assert_eq!(format!("{built:?}"), format!("{:?}", Config::default()));
}

#[test]
fn test_builder_sets_fields() {
    let config = Config::builder()
        .limit(5)
        .undo_type("U")
        .redo_type("R")
        .jump_type("J")
        .jump_to_past_type("JP")
        .jump_to_future_type("JF")
        .clear_history_type("C")
        .init_types(vec!["I1", "I2"])
        .never_skip_reducer(true)
        .ignore_initial_state(true)
        .sync_filter(true)
        .debug(true)
        .build()
        .unwrap();

    assert_eq!(config.limit, Some(5));
    assert_eq!(config.undo_type, "U");
    assert_eq!(config.jump_to_future_type, "JF");
    assert!(config.clear_history_types.contains("C"));
    assert!(!config.clear_history_types.contains(types::CLEAR_HISTORY));
    assert_eq!(config.init_types.iter().collect::<Vec<_>>(), vec!["I1", "I2"]);
    assert!(config.never_skip_reducer && config.ignore_initial_state);
    assert!(config.sync_filter && config.debug);
}

#[test]
fn test_empty_action_type_rejected() {
    let err = Config::builder().undo_type("").build().unwrap_err();
    assert!(matches!(err, Error::EmptyActionType { role: "undo_type" }));

    let err = Config::builder()
        .clear_history_types(vec!["X", ""])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::EmptyActionType { role: "clear_history_types" }));
}

#[test]
fn test_duplicate_action_type_rejected() {
    let err = Config::builder()
        .undo_type("SAME")
        .redo_type("SAME")
        .build()
        .unwrap_err();
    match err {
        Error::DuplicateActionType {
            action_type,
            first,
            second,
        } => {
            assert_eq!(action_type, "SAME");
            assert_eq!(first, "undo_type");
            assert_eq!(second, "redo_type");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_control_type_reused_as_init_type_rejected() {
    let err = Config::builder()
        .init_types([types::INIT, types::UNDO])
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateActionType { first: "undo_type", second: "init_types", .. }
    ));
}

#[test]
fn test_repeated_type_within_one_set_is_allowed() {
    let config = Config::builder()
        .clear_history_types(["RESET", "RESET"])
        .build()
        .unwrap();
    assert!(config.clear_history_types.contains("RESET"));
}

#[test]
fn test_empty_init_types_allowed() {
    let config = Config::builder()
        .init_types(Vec::<String>::new())
        .build()
        .unwrap();
    assert!(config.init_types.is_empty());
}

#[test]
fn test_unknown_action_field_method_rejected() {
    let err = Config::builder().action_field("inline").build().unwrap_err();
    assert!(matches!(err, Error::UnknownInsertMethod(ref m) if m == "inline"));
    assert!(err.to_string().contains("inline"));
}

#[test]
fn test_filter_and_group_defaults() {
    let config = Config::default();
    let history = History::new(0);
    assert!(config.allows(&Action::new("any"), &1, &history));
    assert_eq!(config.group_key(&Action::new("any"), &1, &history), None);
}

#[test]
fn test_filter_and_group_callbacks() {
    let config = Config::builder()
        .filter(|_, state: &i64, _| *state % 2 == 0)
        .group_by(|action: &Action, _, prior: &History<i64>| {
            Some(format!("{}:{}", action.action_type, prior.past.len()))
        })
        .build()
        .unwrap();
    let history = History::new(0);
    assert!(config.allows(&Action::new("x"), &2, &history));
    assert!(!config.allows(&Action::new("x"), &3, &history));
    assert_eq!(
        config.group_key(&Action::new("x"), &2, &history),
        Some("x:0".to_string())
    );
}

#[test]
fn test_error_messages() {
    let err = Config::builder().redo_type("").build().unwrap_err();
    assert_eq!(err.to_string(), "action type for `redo_type` must not be empty");
}
