use editors_pick_sandbox::{
    Align, Block, BlockKind, SandboxConfig, SandboxDocument, SchemaEngine, init_test_tracing,
};
use editors_pick_toolbar::presets::{ids, schema};
use editors_pick_toolbar::{
    Activation, BlockTypeMenu, Engine, GestureCounter, Rejection, ToolbarController, ToolbarError,
};

fn mount() -> (ToolbarController<SchemaEngine>, GestureCounter) {
    init_test_tracing();
    let engine = SchemaEngine::new(SandboxConfig::default()).unwrap();
    (
        ToolbarController::mount(schema::toolbar().unwrap(), engine),
        GestureCounter::default(),
    )
}

fn doc(toolbar: &ToolbarController<SchemaEngine>) -> &SandboxDocument {
    toolbar.engine().unwrap().document()
}

#[test]
fn seed_document_is_plain_paragraphs() {
    let (toolbar, _) = mount();

    assert_eq!(doc(&toolbar).blocks().len(), 5);
    assert!(doc(&toolbar).blocks()[0].text.starts_with("Lorem ipsum dolor sit amet"));
    assert_eq!(toolbar.state().selected(), ids::PARAGRAPH);
    assert!(toolbar.state().is_active(ids::ALIGN_LEFT));
    assert!(!toolbar.state().is_available(ids::UNDO));
    assert!(!toolbar.state().is_available(ids::REDO));
    assert!(toolbar.state().is_available(ids::BOLD));
}

#[test]
fn large_heading_from_the_menu() {
    let (mut toolbar, mut gestures) = mount();
    let mut menu = BlockTypeMenu::new(toolbar.catalog()).unwrap();
    menu.open();

    let outcome = menu.select(&mut toolbar, ids::HEADING_1, gestures.next());

    assert_eq!(outcome, Activation::Applied);
    assert_eq!(doc(&toolbar).focused().kind, BlockKind::Heading { level: 1 });
    assert_eq!(toolbar.state().selected(), ids::HEADING_1);
    assert_eq!(menu.selected().label(), "Large Heading");
    assert!(!menu.is_open());

    // Headings toggle: choosing it again goes back to a paragraph.
    menu.select(&mut toolbar, ids::HEADING_1, gestures.next());
    assert_eq!(doc(&toolbar).focused().kind, BlockKind::Paragraph);
    assert_eq!(menu.selected().id(), ids::PARAGRAPH);
}

#[test]
fn bold_and_italic_are_both_reported() {
    let (mut toolbar, mut gestures) = mount();

    assert!(toolbar.activate(ids::BOLD, gestures.next()).is_applied());
    assert!(toolbar.activate(ids::ITALIC, gestures.next()).is_applied());

    let state = toolbar.state();
    assert!(state.is_active(ids::BOLD));
    assert!(state.is_active(ids::ITALIC));
    assert!(!state.is_active(ids::UNDERLINE));
    assert_eq!(state.selected(), ids::PARAGRAPH);
}

#[test]
fn one_gesture_applies_one_toggle() {
    let (mut toolbar, mut gestures) = mount();
    let gesture = gestures.next();

    toolbar.activate(ids::BOLD, gesture);
    let second = toolbar.activate(ids::BOLD, gesture);

    assert_eq!(second, Activation::Rejected(Rejection::DuplicateGesture));
    assert!(doc(&toolbar).focused().marks.bold);
    assert_eq!(toolbar.engine().unwrap().revision(), 1);
}

#[test]
fn marks_are_unavailable_inside_code_blocks() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::BOLD, gestures.next());

    assert!(toolbar.activate(ids::CODE_BLOCK, gestures.next()).is_applied());

    assert_eq!(toolbar.state().selected(), ids::CODE_BLOCK);
    assert!(!toolbar.state().is_available(ids::BOLD));
    assert!(!doc(&toolbar).focused().marks.bold);

    let revision = toolbar.engine().unwrap().revision();
    assert_eq!(
        toolbar.activate(ids::ITALIC, gestures.next()),
        Activation::Rejected(Rejection::Unavailable)
    );
    assert_eq!(toolbar.engine().unwrap().revision(), revision);
}

#[test]
fn undo_and_redo_follow_history() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::QUOTE, gestures.next());
    assert!(toolbar.state().is_available(ids::UNDO));

    assert!(toolbar.activate(ids::UNDO, gestures.next()).is_applied());

    assert_eq!(doc(&toolbar).focused().kind, BlockKind::Paragraph);
    assert!(!toolbar.state().is_available(ids::UNDO));
    assert!(toolbar.state().is_available(ids::REDO));

    assert!(toolbar.activate(ids::REDO, gestures.next()).is_applied());
    assert_eq!(toolbar.state().selected(), ids::QUOTE);
}

#[test]
fn evaluating_availability_does_not_touch_the_engine() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::BOLD, gestures.next());
    let revision = toolbar.engine().unwrap().revision();
    let before = doc(&toolbar).clone();

    toolbar.refresh();
    toolbar.refresh();

    assert_eq!(toolbar.engine().unwrap().revision(), revision);
    assert_eq!(doc(&toolbar), &before);
    assert!(toolbar.engine().unwrap().state().can_undo());
}

#[test]
fn link_prompt_sets_and_active_link_unsets() {
    let (mut toolbar, mut gestures) = mount();

    let Activation::AwaitingInput(prompt) = toolbar.activate(ids::LINK, gestures.next()) else {
        panic!("link should prompt");
    };
    assert_eq!(prompt.title, "URL");
    assert_eq!(prompt.initial, None);

    let outcome = toolbar.submit_input(ids::LINK, Some("https://tiptap.dev".to_string()));
    assert!(outcome.is_applied());
    assert_eq!(doc(&toolbar).focused().link.as_deref(), Some("https://tiptap.dev"));
    assert!(toolbar.state().is_active(ids::LINK));

    // Active link: the button removes it without asking.
    assert!(toolbar.activate(ids::LINK, gestures.next()).is_applied());
    assert!(toolbar.pending_prompt(ids::LINK).is_none());
    assert_eq!(doc(&toolbar).focused().link, None);
}

#[test]
fn cancelled_link_prompt_is_a_no_op() {
    let (mut toolbar, mut gestures) = mount();

    toolbar.activate(ids::LINK, gestures.next());
    assert_eq!(toolbar.submit_input(ids::LINK, None), Activation::Cancelled);

    assert_eq!(toolbar.engine().unwrap().revision(), 0);
    assert_eq!(doc(&toolbar).focused().link, None);
}

#[test]
fn empty_link_answer_only_touches_the_focused_block() {
    let engine = SchemaEngine::with_document(
        SandboxDocument::new(vec![Block::paragraph("a"), Block::paragraph("b")]),
        SandboxConfig::default(),
    )
    .unwrap();
    let mut toolbar = ToolbarController::mount(schema::toolbar().unwrap(), engine);
    let mut gestures = GestureCounter::default();
    toolbar.activate(ids::LINK, gestures.next());
    toolbar.submit_input(ids::LINK, Some("https://a.example".to_string()));

    // An empty answer unsets the link under the caret, which here has none.
    toolbar
        .update_engine(|engine| {
            engine.run_command("focus_block", Some(serde_json::json!({ "index": 1 })))
        })
        .unwrap()
        .unwrap();
    assert!(!toolbar.state().is_active(ids::LINK));
    toolbar.activate(ids::LINK, gestures.next());
    assert!(toolbar.submit_input(ids::LINK, Some("   ".to_string())).is_applied());

    assert_eq!(doc(&toolbar).blocks()[0].link.as_deref(), Some("https://a.example"));
    assert_eq!(doc(&toolbar).blocks()[1].link, None);
}

#[test]
fn rejected_link_is_reported_and_toolbar_keeps_working() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::LINK, gestures.next());

    let outcome = toolbar.submit_input(ids::LINK, Some("not a url".to_string()));

    let Activation::Failed(ToolbarError::CommandApplyFailed { id, source }) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(id, ids::LINK);
    assert!(source.message().contains("Invalid link href"));
    assert_eq!(doc(&toolbar).focused().link, None);
    assert_eq!(toolbar.engine().unwrap().revision(), 0);

    assert!(toolbar.activate(ids::BOLD, gestures.next()).is_applied());
}

#[test]
fn image_needs_a_url() {
    let (mut toolbar, mut gestures) = mount();

    toolbar.activate(ids::IMAGE, gestures.next());
    assert!(toolbar.submit_input(ids::IMAGE, Some(String::new())).is_applied());
    assert_eq!(doc(&toolbar).blocks().len(), 5);

    toolbar.activate(ids::IMAGE, gestures.next());
    toolbar.submit_input(ids::IMAGE, Some("https://example.com/cat.png".to_string()));

    let blocks = doc(&toolbar).blocks();
    assert_eq!(blocks.len(), 7);
    assert_eq!(
        blocks[1].kind,
        BlockKind::Image {
            src: "https://example.com/cat.png".to_string()
        }
    );
    assert_eq!(doc(&toolbar).cursor(), 2);
}

#[test]
fn horizontal_rule_inserts_after_the_caret() {
    let (mut toolbar, mut gestures) = mount();

    assert!(toolbar.activate(ids::HORIZONTAL_RULE, gestures.next()).is_applied());

    assert_eq!(doc(&toolbar).blocks()[1].kind, BlockKind::HorizontalRule);
    assert_eq!(doc(&toolbar).focused().kind, BlockKind::Paragraph);
    assert_eq!(toolbar.state().selected(), ids::PARAGRAPH);
}

#[test]
fn alignment_is_exclusive() {
    let (mut toolbar, mut gestures) = mount();

    toolbar.activate(ids::ALIGN_CENTER, gestures.next());

    assert_eq!(doc(&toolbar).focused().align, Some(Align::Center));
    assert!(toolbar.state().is_active(ids::ALIGN_CENTER));
    assert!(!toolbar.state().is_active(ids::ALIGN_LEFT));

    // List items carry no alignment of their own.
    toolbar.activate(ids::BULLET_LIST, gestures.next());
    let outcome = toolbar.activate(ids::ALIGN_RIGHT, gestures.next());
    assert!(matches!(outcome, Activation::Failed(_)));
    assert_eq!(doc(&toolbar).focused().align, Some(Align::Center));
}

#[test]
fn unmounted_editor_drops_requests() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::LINK, gestures.next());

    let engine = toolbar.unmount().unwrap();

    assert_eq!(engine.revision(), 0);
    assert_eq!(toolbar.activate(ids::BOLD, gestures.next()), Activation::Dropped);
    assert_eq!(
        toolbar.submit_input(ids::LINK, Some("https://late.example".to_string())),
        Activation::Rejected(Rejection::NoPendingInput)
    );
    assert!(toolbar.state().available_ids.is_empty());
}

#[test]
fn marks_in_a_code_block_apply_as_a_silent_no_op() {
    let (mut toolbar, mut gestures) = mount();
    toolbar.activate(ids::CODE_BLOCK, gestures.next());
    let revision = toolbar.engine().unwrap().revision();

    let bold = toolbar.catalog().get(ids::BOLD).unwrap().action().clone();
    let editors_pick_toolbar::EntryAction::Run(apply) = bold else {
        panic!("bold runs without a prompt");
    };
    let result = toolbar
        .update_engine(|engine| apply(engine as &mut dyn Engine))
        .unwrap();
    assert_eq!(result, Ok(()));

    let link = schema::command::SET_LINK;
    let result = toolbar
        .update_engine(|engine| {
            engine.run_command(link, Some(serde_json::json!({ "href": "https://a.example" })))
        })
        .unwrap();
    assert_eq!(result, Ok(()));

    assert_eq!(toolbar.engine().unwrap().revision(), revision);
    assert!(!doc(&toolbar).focused().marks.bold);
    assert_eq!(doc(&toolbar).focused().link, None);
    assert!(!toolbar.state().is_available(ids::BOLD));
}
