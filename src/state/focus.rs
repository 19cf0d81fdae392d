//! Focus System - Tracks which widget kind has keyboard focus
//!
//! The scanner interpreter must never intercept keys aimed at an editable
//! widget (quantity fields, the login form, item search). This module
//! holds the focused widget kind as reactive state; the input bridge
//! stamps every converted key event with it so handlers see the event
//! target the same way a raw key event carries it.
//!
//! # Example
//!
//! ```ignore
//! use stockscan::state::focus;
//! use stockscan::types::TargetKind;
//!
//! // Quantity field gained focus
//! focus::focus(TargetKind::TextInput);
//! assert!(focus::is_editable_focused());
//!
//! // Back to the item table
//! focus::blur();
//! assert!(!focus::is_editable_focused());
//! ```

use spark_signals::{signal, Signal};

use crate::types::TargetKind;

// =============================================================================
// FOCUSED KIND SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_KIND: Signal<TargetKind> = signal(TargetKind::Other);
}

/// Get the kind of widget that currently has focus.
pub fn focused_kind() -> TargetKind {
    FOCUSED_KIND.with(|s| s.get())
}

/// Get the focused-kind signal for reactive tracking.
pub fn focused_kind_signal() -> Signal<TargetKind> {
    FOCUSED_KIND.with(|s| s.clone())
}

/// Check if an editable widget has focus.
pub fn is_editable_focused() -> bool {
    focused_kind().is_editable()
}

// =============================================================================
// FOCUS TRANSITIONS
// =============================================================================

/// Record that a widget of the given kind gained focus.
pub fn focus(kind: TargetKind) {
    FOCUSED_KIND.with(|s| {
        if s.get() != kind {
            s.set(kind);
        }
    });
}

/// Clear focus back to a non-editable target.
pub fn blur() {
    focus(TargetKind::Other);
}

/// Reset focus state (for testing).
pub fn reset_focus_state() {
    FOCUSED_KIND.with(|s| s.set(TargetKind::Other));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_focus_state();
    }

    #[test]
    fn test_initial_state() {
        setup();
        assert_eq!(focused_kind(), TargetKind::Other);
        assert!(!is_editable_focused());
    }

    #[test]
    fn test_focus_editable() {
        setup();

        focus(TargetKind::TextInput);
        assert_eq!(focused_kind(), TargetKind::TextInput);
        assert!(is_editable_focused());

        focus(TargetKind::TextArea);
        assert_eq!(focused_kind(), TargetKind::TextArea);
        assert!(is_editable_focused());
    }

    #[test]
    fn test_blur() {
        setup();

        focus(TargetKind::Editable);
        assert!(is_editable_focused());

        blur();
        assert_eq!(focused_kind(), TargetKind::Other);
        assert!(!is_editable_focused());
    }

    #[test]
    fn test_signal_reflects_focus() {
        setup();

        let sig = focused_kind_signal();
        focus(TargetKind::TextInput);
        assert_eq!(sig.get(), TargetKind::TextInput);
    }
}
