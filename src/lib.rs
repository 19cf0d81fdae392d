//! # stockscan
//!
//! Scan-driven inventory input for terminal applications.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactive state.
//!
//! ## Architecture
//!
//! External barcode scanners present as keyboards: a burst of characters a
//! few milliseconds apart, terminated by Enter. The core of this crate is
//! the interpreter that tells those bursts apart from human typing:
//!
//! ```text
//! crossterm events → input::convert → keyboard::dispatch → Scanner
//!                                                            │ Enter → code signal + on_scan
//! camera frames → FrameDecoder → CameraFeed ────────────────→ same on_scan callback
//! ```
//!
//! Keystrokes aimed at an editable widget (tracked by [`state::focus`])
//! never reach the buffer, and a 100ms idle gap discards keystrokes that
//! never culminated in an Enter-terminated burst.
//!
//! ## Modules
//!
//! - [`state`] - Scanner interpreter, keyboard dispatch, focus, auth store
//! - [`input`] - crossterm event conversion and polling
//! - [`camera`] - Frame decoder seam and restartable scan feed
//! - [`api`] - REST backend contract (envelope, DTOs, client trait)
//! - [`types`] - Shared types

pub mod api;
pub mod camera;
pub mod input;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use state::{
    // Scanner
    Scanner, IDLE_FLUSH,
    // Keyboard
    KeyEvent, KeyState, Modifiers,
    // Timer
    IdleTimer,
    // Auth
    AuthStore, User,
};

pub use state::focus::{
    blur, focus, focused_kind, focused_kind_signal, is_editable_focused, reset_focus_state,
};

pub use state::keyboard::{
    dispatch as dispatch_keyboard, last_event, last_key, on as on_keyboard, on_key,
    reset_keyboard_state,
};

pub use input::{convert_key_event, poll_event, read_event, route_event, InputEvent};

pub use camera::{CameraFeed, FrameDecoder};

pub use api::{ApiResponse, Credentials, InventoryApi, Item, Movement};
