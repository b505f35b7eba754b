mod common;

use common::{ScriptedEngine, entry, image_entry, link_entry, test_catalog};
use editors_pick_toolbar::{
    Activation, Catalog, ControlState, EntryGroup, Gesture, GestureCounter, Rejection,
    ToolbarController, ToolbarError,
};

fn controller(engine: ScriptedEngine) -> ToolbarController<ScriptedEngine> {
    ToolbarController::mount(test_catalog(), engine)
}

#[test]
fn activation_applies_once_and_refreshes() {
    let mut toolbar = controller(ScriptedEngine::new().with_effect("cmd.h1", "is.h1", true));
    assert_eq!(toolbar.state().selected(), "paragraph");

    let outcome = toolbar.activate("h1", Gesture::new(1));

    assert_eq!(outcome, Activation::Applied);
    assert_eq!(toolbar.engine().unwrap().command_ids(), vec!["cmd.h1"]);
    assert_eq!(toolbar.state().selected(), "h1");
}

#[test]
fn repeated_gesture_applies_once() {
    let mut toolbar = controller(ScriptedEngine::new());
    let gesture = Gesture::new(7);

    assert!(toolbar.activate("bold", gesture).is_applied());
    assert_eq!(
        toolbar.activate("bold", gesture),
        Activation::Rejected(Rejection::DuplicateGesture)
    );
    assert_eq!(toolbar.engine().unwrap().command_ids(), vec!["cmd.bold"]);

    // A fresh gesture on the same control is a new request.
    assert!(toolbar.activate("bold", Gesture::new(8)).is_applied());
    assert_eq!(toolbar.engine().unwrap().commands.len(), 2);
}

#[test]
fn gesture_counter_never_repeats() {
    let mut counter = GestureCounter::default();
    let first = counter.next();
    let second = counter.next();
    assert!(second > first);
}

#[test]
fn unknown_id_is_rejected() {
    let mut toolbar = controller(ScriptedEngine::new());
    assert_eq!(
        toolbar.activate("nope", Gesture::new(1)),
        Activation::Rejected(Rejection::UnknownCommand)
    );
}

#[test]
fn unavailable_entry_is_a_no_op() {
    let catalog = Catalog::new([
        entry("paragraph", EntryGroup::BlockType).baseline(),
        entry("undo", EntryGroup::History)
            .available_when(|engine: &dyn editors_pick_toolbar::Engine| {
                engine.query_flag("can.undo", None)
            }),
    ])
    .unwrap();
    let mut toolbar =
        ToolbarController::mount(catalog, ScriptedEngine::new().with_flag("can.undo", false));

    assert!(!toolbar.state().is_available("undo"));
    assert_eq!(
        toolbar.activate("undo", Gesture::new(1)),
        Activation::Rejected(Rejection::Unavailable)
    );
    assert!(toolbar.engine().unwrap().commands.is_empty());
}

#[test]
fn failed_command_is_reported_and_controller_recovers() {
    let mut toolbar = controller(ScriptedEngine::new().failing("cmd.bold"));

    let outcome = toolbar.activate("bold", Gesture::new(1));

    let Activation::Failed(ToolbarError::CommandApplyFailed { id, source }) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(id, "bold");
    assert_eq!(source.message(), "cmd.bold rejected");
    assert_eq!(toolbar.control_state("bold"), ControlState::Idle);
    assert!(toolbar.activate("italic", Gesture::new(2)).is_applied());
}

#[test]
fn prompt_waits_for_input_and_applies_trimmed_value() {
    let mut engine = ScriptedEngine::new();
    engine
        .strings
        .insert("link.href".to_string(), "https://old.example".to_string());
    let mut toolbar = controller(engine);

    let Activation::AwaitingInput(pending) = toolbar.activate("link", Gesture::new(1)) else {
        panic!("expected a prompt");
    };
    assert_eq!(pending.title, "URL");
    assert_eq!(pending.initial.as_deref(), Some("https://old.example"));
    assert_eq!(toolbar.control_state("link"), ControlState::Dispatching);
    assert_eq!(toolbar.pending_prompts().count(), 1);

    assert_eq!(
        toolbar.activate("link", Gesture::new(2)),
        Activation::Rejected(Rejection::Busy)
    );

    let outcome = toolbar.submit_input("link", Some("  https://new.example ".to_string()));
    assert!(outcome.is_applied());
    assert_eq!(toolbar.control_state("link"), ControlState::Idle);

    let (id, args) = &toolbar.engine().unwrap().commands[0];
    assert_eq!(id, "cmd.link");
    assert_eq!(
        args.as_ref().unwrap(),
        &serde_json::json!({ "href": "https://new.example" })
    );
}

#[test]
fn cancelled_prompt_leaves_engine_untouched() {
    let mut toolbar = controller(ScriptedEngine::new());

    assert!(matches!(
        toolbar.activate("link", Gesture::new(1)),
        Activation::AwaitingInput(_)
    ));
    assert_eq!(toolbar.submit_input("link", None), Activation::Cancelled);

    assert!(toolbar.engine().unwrap().commands.is_empty());
    assert_eq!(toolbar.engine().unwrap().revision, 0);
    assert_eq!(
        toolbar.submit_input("link", None),
        Activation::Rejected(Rejection::NoPendingInput)
    );
}

#[test]
fn active_prompt_entry_runs_its_direct_action() {
    let mut toolbar = controller(
        ScriptedEngine::new()
            .with_flag("is.link", true)
            .with_effect("cmd.unlink", "is.link", false),
    );
    assert!(toolbar.state().is_active("link"));

    assert!(toolbar.activate("link", Gesture::new(1)).is_applied());

    assert_eq!(toolbar.engine().unwrap().command_ids(), vec!["cmd.unlink"]);
    assert!(!toolbar.state().is_active("link"));
}

#[test]
fn external_changes_are_picked_up_by_revision() {
    let mut toolbar = controller(ScriptedEngine::new());

    assert!(!toolbar.notify_engine_changed());

    toolbar.update_engine(|engine| engine.set_flag("is.bold", true));

    assert!(toolbar.state().is_active("bold"));
    assert!(!toolbar.notify_engine_changed());
}

#[test]
fn requests_after_unmount_are_dropped() {
    let mut toolbar = controller(ScriptedEngine::new());
    assert!(matches!(
        toolbar.activate("link", Gesture::new(1)),
        Activation::AwaitingInput(_)
    ));

    let engine = toolbar.unmount().unwrap();
    assert!(engine.commands.is_empty());
    assert!(!toolbar.is_mounted());

    assert_eq!(toolbar.activate("bold", Gesture::new(2)), Activation::Dropped);
    assert_eq!(
        toolbar.submit_input("link", Some("https://late.example".to_string())),
        Activation::Rejected(Rejection::NoPendingInput)
    );
    assert!(!toolbar.notify_engine_changed());
    assert!(toolbar.update_engine(|engine| engine.set_flag("is.bold", true)).is_none());
    assert!(toolbar.state().available_ids.is_empty());
    assert_eq!(toolbar.state().selected(), "paragraph");
}

#[test]
fn two_open_prompts_resolve_independently() {
    let catalog = Catalog::new([
        entry("paragraph", EntryGroup::BlockType).baseline(),
        link_entry(),
        image_entry(),
    ])
    .unwrap();
    let mut toolbar = ToolbarController::mount(catalog, ScriptedEngine::new());

    assert!(matches!(
        toolbar.activate("link", Gesture::new(1)),
        Activation::AwaitingInput(_)
    ));
    assert!(matches!(
        toolbar.activate("image", Gesture::new(2)),
        Activation::AwaitingInput(_)
    ));
    let open: Vec<_> = toolbar
        .pending_prompts()
        .map(|prompt| prompt.command_id.as_str())
        .collect();
    assert_eq!(open, vec!["link", "image"]);

    assert_eq!(toolbar.submit_input("link", None), Activation::Cancelled);
    assert_eq!(toolbar.control_state("link"), ControlState::Idle);
    assert_eq!(toolbar.control_state("image"), ControlState::Dispatching);

    let outcome = toolbar.submit_input("image", Some("https://img.example/a.png".to_string()));
    assert!(outcome.is_applied());
    assert_eq!(toolbar.pending_prompts().count(), 0);
    assert_eq!(toolbar.engine().unwrap().command_ids(), vec!["cmd.image"]);

    assert!(matches!(
        toolbar.activate("link", Gesture::new(3)),
        Activation::AwaitingInput(_)
    ));
}
