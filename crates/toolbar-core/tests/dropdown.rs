mod common;

use common::{ScriptedEngine, test_catalog};
use editors_pick_toolbar::{Activation, BlockTypeMenu, Gesture, Rejection, ToolbarController};

#[test]
fn menu_lists_only_block_types() {
    let menu = BlockTypeMenu::new(&test_catalog()).unwrap();

    assert_eq!(
        menu.entries().iter().map(|e| e.id()).collect::<Vec<_>>(),
        vec!["paragraph", "h1", "h2"]
    );
    assert_eq!(menu.selected().id(), "paragraph");
    assert!(!menu.is_open());
}

#[test]
fn choosing_an_entry_applies_closes_and_syncs() {
    let mut toolbar = ToolbarController::mount(
        test_catalog(),
        ScriptedEngine::new().with_effect("cmd.h2", "is.h2", true),
    );
    let mut menu = BlockTypeMenu::new(toolbar.catalog()).unwrap();
    menu.open();

    let outcome = menu.select(&mut toolbar, "h2", Gesture::new(1));

    assert_eq!(outcome, Activation::Applied);
    assert!(!menu.is_open());
    assert_eq!(menu.selected().id(), "h2");
    assert_eq!(menu.selected().label(), "h2");
}

#[test]
fn entries_outside_the_menu_are_rejected() {
    let mut toolbar = ToolbarController::mount(test_catalog(), ScriptedEngine::new());
    let mut menu = BlockTypeMenu::new(toolbar.catalog()).unwrap();
    menu.toggle();
    assert!(menu.is_open());

    let outcome = menu.select(&mut toolbar, "bold", Gesture::new(1));

    assert_eq!(outcome, Activation::Rejected(Rejection::UnknownCommand));
    assert!(toolbar.engine().unwrap().commands.is_empty());
    assert!(!menu.is_open());
}

#[test]
fn sync_follows_engine_and_falls_back_after_unmount() {
    let mut toolbar = ToolbarController::mount(test_catalog(), ScriptedEngine::new());
    let mut menu = BlockTypeMenu::new(toolbar.catalog()).unwrap();

    toolbar.update_engine(|engine| engine.set_flag("is.h1", true));
    menu.sync(&toolbar);
    assert_eq!(menu.selected().id(), "h1");

    toolbar.unmount();
    menu.sync(&toolbar);
    assert_eq!(menu.selected().id(), "paragraph");
}
