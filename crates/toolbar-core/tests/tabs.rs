use std::cell::RefCell;
use std::rc::Rc;

use editors_pick_toolbar::{TabError, TabShell};

#[test]
fn first_tab_is_active_initially() {
    let shell = TabShell::new(["Node Tree", "Schema"]);

    assert_eq!(shell.len(), 2);
    assert_eq!(shell.active_index(), 0);
    assert_eq!(shell.active_label(), Some("Node Tree"));
}

#[test]
fn switching_notifies_with_previous_and_next() {
    let mut shell = TabShell::new(["Node Tree", "Schema"]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    shell.on_change(move |prev, next| sink.borrow_mut().push((prev, next)));

    assert_eq!(shell.select(1), Ok(true));
    assert_eq!(shell.select(1), Ok(false));
    assert_eq!(shell.select(0), Ok(true));

    assert_eq!(*seen.borrow(), vec![(0, 1), (1, 0)]);
    assert_eq!(shell.active_label(), Some("Node Tree"));
}

#[test]
fn out_of_range_selection_keeps_active_tab() {
    let mut shell = TabShell::new(["Node Tree", "Schema"]);

    let err = shell.select(2).unwrap_err();

    assert_eq!(err, TabError::OutOfRange { index: 2, len: 2 });
    assert_eq!(shell.active_index(), 0);
}

#[test]
fn unsubscribed_listeners_stop_receiving() {
    let mut shell = TabShell::new(["a", "b"]);
    let calls = Rc::new(RefCell::new(0));
    let sink = calls.clone();
    let subscription = shell.on_change(move |_, _| *sink.borrow_mut() += 1);

    shell.select(1).unwrap();
    assert!(shell.unsubscribe(subscription));
    assert!(!shell.unsubscribe(subscription));
    shell.select(0).unwrap();

    assert_eq!(*calls.borrow(), 1);
}
