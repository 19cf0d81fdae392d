//! Scanner Interpreter - Reconstructs barcode scans from the key stream
//!
//! External barcode scanners behave like a keyboard that emits a burst of
//! characters within a few milliseconds of each other, terminated by an
//! Enter key. The interpreter exploits that timing signature: keystrokes
//! that arrive without an idle gap accumulate into a pending buffer, an
//! Enter completes the buffer as a scan, and a trailing silence discards
//! it as incidental typing.
//!
//! # Rules
//!
//! - Keys aimed at an editable widget are ignored entirely
//! - Only single ASCII alphanumeric characters accumulate; everything
//!   else (modifiers, punctuation, arrows) is dropped
//! - Enter with a non-empty buffer publishes the scan; a bare Enter does
//!   nothing
//! - 100ms of silence flushes the buffer without emitting
//!
//! # Example
//!
//! ```ignore
//! use stockscan::state::scanner::Scanner;
//!
//! let mut scanner = Scanner::with_callback(|code| {
//!     println!("scanned: {}", code);
//! });
//! scanner.start_listening();
//!
//! // ... keyboard events flow through state::keyboard::dispatch ...
//!
//! let code = scanner.code(); // Last completed scan
//! scanner.stop_listening();
//! ```

use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spark_signals::{signal, Signal};

use super::keyboard;
use super::timer::IdleTimer;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Idle gap after which a pending burst is discarded without emitting.
///
/// Scanner hardware delivers characters well under this interval; human
/// typing almost never does. Fixed heuristic, not measured per device.
pub const IDLE_FLUSH: Duration = Duration::from_millis(100);

// =============================================================================
// SCANNER
// =============================================================================

/// Completion callback, invoked with the scanned code.
pub type ScanCallback = Rc<dyn Fn(&str)>;

/// Interprets the global key stream as barcode scan bursts.
///
/// Instances are independent: each owns its buffer, its idle timer and
/// its keyboard subscription. Dropping a scanner detaches it.
pub struct Scanner {
    /// Characters accumulated since the last flush. Shared with the idle
    /// timer thread, which clears it when a burst goes silent.
    pending: Arc<Mutex<String>>,
    /// Whether the key handler is attached.
    active: Signal<bool>,
    /// Most recently completed scan (empty string = none yet).
    code: Signal<String>,
    /// Single-slot flush timer, re-armed on every keystroke.
    flush: IdleTimer,
    /// Optional completion callback.
    on_scan: Option<ScanCallback>,
    /// Keyboard unsubscribe, present while listening.
    detach: Option<Box<dyn FnOnce()>>,
}

impl Scanner {
    /// Create a scanner with no completion callback.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(String::new())),
            active: signal(false),
            code: signal(String::new()),
            flush: IdleTimer::new(),
            on_scan: None,
            detach: None,
        }
    }

    /// Create a scanner that invokes `on_scan` with every completed code.
    pub fn with_callback<F>(on_scan: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        let mut scanner = Self::new();
        scanner.on_scan = Some(Rc::new(on_scan));
        scanner
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Attach to the keyboard stream. Idempotent: a second call while
    /// already listening changes nothing.
    pub fn start_listening(&mut self) {
        if self.active.get() {
            return;
        }

        // Invariant: pending is empty while inactive, so this is a fresh
        // buffer for the handler about to attach.
        self.pending.lock().unwrap().clear();
        self.active.set(true);

        let pending = self.pending.clone();
        let code = self.code.clone();
        let flush = self.flush.clone();
        let on_scan = self.on_scan.clone();

        let cleanup = keyboard::on(move |event| {
            handle_key(event, &pending, &code, &flush, on_scan.as_ref());
            false
        });
        self.detach = Some(Box::new(cleanup));
    }

    /// Detach from the keyboard stream, cancel any armed flush and throw
    /// away any in-flight partial scan. Idempotent.
    pub fn stop_listening(&mut self) {
        self.teardown();
    }

    /// Reset the exposed code to empty. Leaves `active` and any
    /// in-progress buffer untouched.
    pub fn clear_code(&mut self) {
        self.code.set(String::new());
    }

    fn teardown(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
        self.flush.cancel();
        self.pending.lock().unwrap().clear();
        if self.active.get() {
            self.active.set(false);
        }
    }

    // =========================================================================
    // OBSERVABLE STATE
    // =========================================================================

    /// Most recently completed scan (empty string if none).
    pub fn code(&self) -> String {
        self.code.get()
    }

    /// Signal holding the most recently completed scan.
    pub fn code_signal(&self) -> Signal<String> {
        self.code.clone()
    }

    /// Whether the scanner is attached to the key stream.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Signal holding the listening state.
    pub fn active_signal(&self) -> Signal<bool> {
        self.active.clone()
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        // Host teardown must never leak the keyboard subscription or
        // leave a flush armed against a dropped buffer.
        self.teardown();
    }
}

// =============================================================================
// KEY HANDLING
// =============================================================================

/// Process one key press against the scan buffer.
fn handle_key(
    event: &keyboard::KeyEvent,
    pending: &Arc<Mutex<String>>,
    code: &Signal<String>,
    flush: &IdleTimer,
    on_scan: Option<&ScanCallback>,
) {
    // Typing into a form field is never scanner input. Buffer and timer
    // stay exactly as they were.
    if event.target.is_editable() {
        return;
    }

    flush.cancel();

    if event.key == "Enter" {
        let burst = std::mem::take(&mut *pending.lock().unwrap());
        if !burst.is_empty() {
            code.set(burst.clone());
            if let Some(callback) = on_scan {
                callback(&burst);
            }
        }
        // Enter never buffers and never re-arms the timer.
        return;
    }

    if let Some(c) = single_alphanumeric(&event.key) {
        pending.lock().unwrap().push(c);
    }

    let pending = pending.clone();
    flush.arm(IDLE_FLUSH, move |still_armed| {
        // Burst went silent without an Enter: incidental keystrokes.
        // Generation re-checked under the buffer lock: a keystroke
        // re-arming right at the boundary keeps its character.
        let mut pending = pending.lock().unwrap();
        if still_armed() {
            pending.clear();
        }
    });
}

/// Extract the character from a key name if it is a single ASCII
/// alphanumeric. Named keys ("Tab", "ArrowUp") and punctuation yield None.
fn single_alphanumeric(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
