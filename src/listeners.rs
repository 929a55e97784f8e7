//! Page-wide keyboard listeners.
//!
//! Listeners see every key press before the regular key bindings. Registering one hands back a
//! [`ListenerGuard`]; dropping the guard unregisters the listener, so a listener can never outlive
//! the page that installed it.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Navigation requested by a listener.
pub enum NavCommand {
    /// Bring the section with this identifier into view.
    ScrollTo(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of offering a key press to the listeners.
pub enum Dispatch {
    /// A listener claimed the key; the default handling is suppressed.
    Handled(NavCommand),
    /// No listener was interested.
    Ignored,
}

/// Callback invoked for every key press.
pub type KeyListener = Box<dyn Fn(&KeyEvent) -> Dispatch>;

#[derive(Default)]
/// Registered listeners in installation order.
pub struct KeyListeners {
    next_id: u64,
    listeners: Vec<(u64, KeyListener)>,
}

impl KeyListeners {
    #[must_use]
    /// Installs `listener`, which stays registered until the returned guard is dropped.
    pub fn add(registry: &Rc<RefCell<Self>>, listener: KeyListener) -> ListenerGuard {
        let mut inner = registry.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        ListenerGuard {
            registry: Rc::downgrade(registry),
            id,
        }
    }

    #[must_use]
    /// Offers `key` to each listener in turn; the first to claim it wins.
    pub fn dispatch(&self, key: &KeyEvent) -> Dispatch {
        self.listeners
            .iter()
            .map(|(_, listener)| listener(key))
            .find(|outcome| *outcome != Dispatch::Ignored)
            .unwrap_or(Dispatch::Ignored)
    }

    #[must_use]
    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }
}

/// Keeps a listener registered; unregisters it on drop.
pub struct ListenerGuard {
    registry: Weak<RefCell<KeyListeners>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.remove(self.id);
            }
        }
    }
}

#[must_use]
/// Listener that scrolls to `target` when `key` is pressed, ignoring case.
pub fn shortcut(key: char, target: &str) -> KeyListener {
    let target = target.to_string();
    Box::new(move |event: &KeyEvent| match event.code {
        KeyCode::Char(pressed) if pressed.eq_ignore_ascii_case(&key) => {
            Dispatch::Handled(NavCommand::ScrollTo(target.clone()))
        }
        _ => Dispatch::Ignored,
    })
}

#[cfg(test)]
#[path = "tests/listeners.rs"]
mod tests;
