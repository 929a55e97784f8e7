use super::{shortcut, Dispatch, KeyListeners, NavCommand};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;

fn press(c: char) -> KeyEvent {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

#[test]
fn test_shortcut_matches_either_case() {
    let listener = shortcut('r', "resume");
    let expected = Dispatch::Handled(NavCommand::ScrollTo("resume".to_string()));
    assert_eq!(listener(&press('r')), expected);
    assert_eq!(listener(&press('R')), expected);
    assert_eq!(listener(&press('x')), Dispatch::Ignored);
    assert_eq!(
        listener(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        Dispatch::Ignored
    );
}

#[test]
fn test_guard_unregisters_on_drop() {
    let registry = Rc::new(RefCell::new(KeyListeners::default()));
    let guard = KeyListeners::add(&registry, shortcut('r', "resume"));
    assert_eq!(registry.borrow().len(), 1);
    assert!(matches!(
        registry.borrow().dispatch(&press('r')),
        Dispatch::Handled(_)
    ));

    drop(guard);
    assert!(registry.borrow().is_empty());
    assert_eq!(registry.borrow().dispatch(&press('r')), Dispatch::Ignored);
}

#[test]
fn test_first_claiming_listener_wins() {
    let registry = Rc::new(RefCell::new(KeyListeners::default()));
    let _ignore = KeyListeners::add(&registry, Box::new(|_: &KeyEvent| Dispatch::Ignored));
    let _work = KeyListeners::add(&registry, shortcut('w', "work"));
    let _also_work = KeyListeners::add(&registry, shortcut('w', "connect"));

    assert_eq!(
        registry.borrow().dispatch(&press('w')),
        Dispatch::Handled(NavCommand::ScrollTo("work".to_string()))
    );
}

#[test]
fn test_dropping_one_guard_keeps_others() {
    let registry = Rc::new(RefCell::new(KeyListeners::default()));
    let first = KeyListeners::add(&registry, shortcut('r', "resume"));
    let _second = KeyListeners::add(&registry, shortcut('p', "projects"));

    drop(first);
    assert_eq!(registry.borrow().len(), 1);
    assert_eq!(registry.borrow().dispatch(&press('r')), Dispatch::Ignored);
    assert!(matches!(
        registry.borrow().dispatch(&press('p')),
        Dispatch::Handled(_)
    ));
}

#[test]
fn test_guard_outliving_registry_is_harmless() {
    let registry = Rc::new(RefCell::new(KeyListeners::default()));
    let guard = KeyListeners::add(&registry, shortcut('r', "resume"));
    drop(registry);
    drop(guard);
}
