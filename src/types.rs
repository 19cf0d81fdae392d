//! Core Types - Shared types used across the crate
//!
//! - [`TargetKind`] - The kind of widget a key event was delivered to
//! - [`MovementKind`] - Stock movement direction (in/out)

use serde::{Deserialize, Serialize};

// =============================================================================
// EVENT TARGET
// =============================================================================

/// The kind of widget that had keyboard focus when a key event fired.
///
/// The scanner interpreter suppresses itself for any editable target so
/// that normal form typing (quantities, passwords, search text) is never
/// intercepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetKind {
    /// Single-line text input widget
    TextInput,
    /// Multi-line text area widget
    TextArea,
    /// Any other widget marked editable
    Editable,
    /// Non-editable target (tables, buttons, the app background)
    #[default]
    Other,
}

impl TargetKind {
    /// Whether key events aimed at this target belong to normal typing.
    pub fn is_editable(&self) -> bool {
        !matches!(self, TargetKind::Other)
    }
}

// =============================================================================
// STOCK MOVEMENTS
// =============================================================================

/// Direction of a stock movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock received (scan-in)
    In,
    /// Stock issued (scan-out)
    Out,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_targets() {
        assert!(TargetKind::TextInput.is_editable());
        assert!(TargetKind::TextArea.is_editable());
        assert!(TargetKind::Editable.is_editable());
        assert!(!TargetKind::Other.is_editable());
    }

    #[test]
    fn test_default_target_is_other() {
        assert_eq!(TargetKind::default(), TargetKind::Other);
    }

    #[test]
    fn test_movement_kind_serde() {
        let json = serde_json::to_string(&MovementKind::In).unwrap();
        assert_eq!(json, "\"in\"");
        let back: MovementKind = serde_json::from_str("\"out\"").unwrap();
        assert_eq!(back, MovementKind::Out);
    }
}
