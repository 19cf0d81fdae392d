//! State Module - Reactive runtime state systems
//!
//! - **Scanner** - The scan-burst interpreter (buffer, idle flush, emit)
//! - **Keyboard** - Key event type, dispatch, handler registry
//! - **Focus** - Focused widget kind, editable suppression predicate
//! - **Timer** - Single-slot cancellable idle timer
//! - **Auth** - Session store and the cached user record

pub mod auth;
pub mod focus;
pub mod keyboard;
pub mod scanner;
pub mod timer;

pub use auth::{AuthStore, User};
pub use keyboard::{KeyEvent, KeyState, Modifiers};
pub use scanner::{Scanner, IDLE_FLUSH};
pub use timer::IdleTimer;
