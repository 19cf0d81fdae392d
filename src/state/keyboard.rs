//! Keyboard Module - Key event state and handler registry
//!
//! Holds the last key event as reactive state and routes press events
//! through a handler registry. The scanner interpreter attaches here via
//! [`on`]; host views use [`on_key`] for shortcuts.
//!
//! Every event carries the widget kind it was delivered to, so handlers
//! can tell scanner bursts on the app background apart from typing into
//! a form field.
//!
//! # API
//!
//! - `last_event` / `last_key` - Last keyboard event / key
//! - `on(handler)` - Subscribe to all key events
//! - `on_key(key, fn)` - Subscribe to a specific key
//! - `dispatch(event)` - Route an event through the registry
//!
//! # Example
//!
//! ```ignore
//! use stockscan::state::keyboard;
//!
//! let cleanup = keyboard::on(|event| {
//!     println!("Key: {} (target {:?})", event.key, event.target);
//!     false // Don't consume
//! });
//!
//! let cleanup = keyboard::on_key("Escape", || {
//!     println!("close dialog");
//!     true // Consume
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::TargetKind;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed (e.g., "a", "7", "Enter", "ArrowUp")
    pub key: String,
    /// The widget kind the event was delivered to
    pub target: TargetKind,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyEvent {
    /// Create a key press aimed at a non-editable target.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: TargetKind::Other,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press aimed at a specific target kind.
    pub fn with_target(key: impl Into<String>, target: TargetKind) -> Self {
        Self {
            key: key.into(),
            target,
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Rc<dyn Fn(&KeyEvent) -> bool>;

/// Handler for a specific key. Return true to consume the event.
pub type KeySpecificHandler = Rc<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// Get the last key pressed
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
///
/// Only press events reach handlers; repeats and releases still update
/// the `last_event` state.
///
/// Handlers run outside the registry borrow, so they may subscribe or
/// unsubscribe (including tearing down their own subscription) without
/// re-entering it.
pub fn dispatch(event: KeyEvent) -> bool {
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    if event.state != KeyState::Press {
        return false;
    }

    let (keyed, global) = REGISTRY.with(|reg| {
        let reg = reg.borrow();
        let keyed: Vec<KeySpecificHandler> = reg
            .key_handlers
            .get(&event.key)
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();
        let global: Vec<KeyHandler> =
            reg.global_handlers.iter().map(|(_, h)| h.clone()).collect();
        (keyed, global)
    });

    // Key-specific handlers first
    for handler in &keyed {
        if handler() {
            return true;
        }
    }

    for handler in &global {
        if handler(&event) {
            return true;
        }
    }

    false
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to all keyboard events.
/// Return true from handler to consume the event.
/// Returns cleanup function.
pub fn on<F>(handler: F) -> impl FnOnce()
where
    F: Fn(&KeyEvent) -> bool + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(handler_id, _)| *handler_id != id);
        });
    }
}

/// Subscribe to a specific key.
/// Handler receives no arguments - check last_event if needed.
/// Return true to consume the event.
/// Returns cleanup function.
pub fn on_key<F>(key: &str, handler: F) -> impl FnOnce()
where
    F: Fn() -> bool + 'static,
{
    let key = key.to_string();
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key.clone())
            .or_insert_with(Vec::new)
            .push((id, Rc::new(handler)));
        id
    });

    move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    }
}

/// Clear all state and handlers.
pub fn cleanup() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.global_handlers.clear();
        reg.key_handlers.clear();
    });
    LAST_EVENT.with(|s| s.set(None));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    cleanup();
    REGISTRY.with(|reg| {
        reg.borrow_mut().next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert!(last_event().is_none());
        assert_eq!(last_key(), "");
    }

    #[test]
    fn test_dispatch_updates_state() {
        setup();

        dispatch(KeyEvent::new("a"));
        assert_eq!(last_key(), "a");

        dispatch(KeyEvent::new("Enter"));
        assert_eq!(last_key(), "Enter");
    }

    #[test]
    fn test_global_handler() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let cleanup = on(move |_event| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        dispatch(KeyEvent::new("a"));
        assert_eq!(count.get(), 1);

        dispatch(KeyEvent::new("b"));
        assert_eq!(count.get(), 2);

        cleanup();

        dispatch(KeyEvent::new("c"));
        assert_eq!(count.get(), 2); // No more increments
    }

    #[test]
    fn test_key_specific_handler() {
        setup();

        let enter_count = Rc::new(Cell::new(0));
        let enter_clone = enter_count.clone();

        let cleanup = on_key("Enter", move || {
            enter_clone.set(enter_clone.get() + 1);
            true
        });

        dispatch(KeyEvent::new("a"));
        assert_eq!(enter_count.get(), 0);

        dispatch(KeyEvent::new("Enter"));
        assert_eq!(enter_count.get(), 1);

        cleanup();

        dispatch(KeyEvent::new("Enter"));
        assert_eq!(enter_count.get(), 1);
    }

    #[test]
    fn test_handler_consumption() {
        setup();

        let consumed = Rc::new(Cell::new(false));
        let consumed_clone = consumed.clone();

        // First handler consumes
        let _c1 = on_key("Enter", move || {
            consumed_clone.set(true);
            true
        });

        let reached = Rc::new(Cell::new(false));
        let reached_clone = reached.clone();

        // Global handler should not be called if first consumes
        let _c2 = on(move |_| {
            reached_clone.set(true);
            false
        });

        let result = dispatch(KeyEvent::new("Enter"));
        assert!(result);
        assert!(consumed.get());
        assert!(!reached.get());
    }

    #[test]
    fn test_handler_can_unsubscribe_itself_during_dispatch() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        // The handler holds its own cleanup and runs it from inside
        // dispatch, the "accept one event, then detach" pattern.
        let cleanup_slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
            Rc::new(RefCell::new(None));
        let slot_clone = cleanup_slot.clone();

        let cleanup = on(move |_| {
            count_clone.set(count_clone.get() + 1);
            if let Some(cleanup) = slot_clone.borrow_mut().take() {
                cleanup();
            }
            false
        });
        *cleanup_slot.borrow_mut() = Some(Box::new(cleanup));

        dispatch(KeyEvent::new("a"));
        assert_eq!(count.get(), 1);

        // Removed itself on the first event
        dispatch(KeyEvent::new("b"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_can_subscribe_during_dispatch() {
        setup();

        let late_count = Rc::new(Cell::new(0));
        let late_clone = late_count.clone();
        let registered = Rc::new(Cell::new(false));
        let registered_clone = registered.clone();

        let _cleanup = on(move |_| {
            if !registered_clone.get() {
                registered_clone.set(true);
                let late_clone = late_clone.clone();
                std::mem::forget(on(move |_| {
                    late_clone.set(late_clone.get() + 1);
                    false
                }));
            }
            false
        });

        dispatch(KeyEvent::new("a"));
        dispatch(KeyEvent::new("b"));
        assert_eq!(late_count.get(), 1); // Saw only the second event
    }

    #[test]
    fn test_only_press_dispatched() {
        setup();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        let _cleanup = on(move |_| {
            count_clone.set(count_clone.get() + 1);
            false
        });

        let mut event = KeyEvent::new("a");
        dispatch(event.clone());
        assert_eq!(count.get(), 1);

        event.state = KeyState::Repeat;
        dispatch(event.clone());
        assert_eq!(count.get(), 1);

        event.state = KeyState::Release;
        dispatch(event.clone());
        assert_eq!(count.get(), 1);

        // State still updated for non-press events
        assert_eq!(last_event().unwrap().state, KeyState::Release);
    }

    #[test]
    fn test_event_carries_target() {
        setup();

        let saw_editable = Rc::new(Cell::new(false));
        let saw_clone = saw_editable.clone();

        let _cleanup = on(move |event| {
            if event.target.is_editable() {
                saw_clone.set(true);
            }
            false
        });

        dispatch(KeyEvent::new("a"));
        assert!(!saw_editable.get());

        dispatch(KeyEvent::with_target("a", TargetKind::TextInput));
        assert!(saw_editable.get());
    }

    #[test]
    fn test_modifiers() {
        setup();

        let ctrl_pressed = Rc::new(Cell::new(false));
        let ctrl_clone = ctrl_pressed.clone();

        let _cleanup = on(move |event| {
            if event.modifiers.ctrl && event.key == "c" {
                ctrl_clone.set(true);
            }
            false
        });

        let mut event = KeyEvent::new("c");
        event.modifiers = Modifiers::ctrl();
        dispatch(event);
        assert!(ctrl_pressed.get());
    }
}
