//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the keyboard module. Converted
//! key events are stamped with the currently focused widget kind, so the
//! scanner interpreter sees the event target exactly the way a raw key
//! event carries it.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//! - `route_event` - Dispatch event to the keyboard registry
//!
//! # Example
//!
//! ```ignore
//! use stockscan::input::{poll_event, route_event};
//! use std::time::Duration;
//!
//! // Event loop
//! loop {
//!     if let Ok(Some(event)) = poll_event(Duration::from_millis(16)) {
//!         route_event(event);
//!     }
//! }
//! ```

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers,
};
use std::time::Duration;

use crate::state::focus;
use crate::state::keyboard::{KeyEvent, KeyState, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the host loop
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyEvent.
///
/// The event target is stamped from the focus system at conversion time.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        crossterm::event::KeyEventKind::Press => KeyState::Press,
        crossterm::event::KeyEventKind::Repeat => KeyState::Repeat,
        crossterm::event::KeyEventKind::Release => KeyState::Release,
    };

    KeyEvent {
        key,
        target: focus::focused_kind(),
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(convert_key_event(key))),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route an event to the keyboard registry.
/// Returns true if any handler consumed the event.
pub fn route_event(event: InputEvent) -> bool {
    match event {
        InputEvent::Key(key) => crate::state::keyboard::dispatch(key),
        InputEvent::Resize(_, _) => false,
        InputEvent::None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
