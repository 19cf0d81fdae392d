//! API Module - REST collaborator contract
//!
//! The backend owns persistence and business logic; this crate only
//! speaks its contract. Every response carries a status flag, an
//! optional message and an optional payload. Transport lives behind the
//! [`InventoryApi`] trait.
//!
//! # Example
//!
//! ```ignore
//! use stockscan::api::{ApiResponse, InventoryApi};
//!
//! let response = client.scan_in("8901234567", 5);
//! match response.into_result() {
//!     Ok(item) => println!("{} now at {}", item.name, item.quantity),
//!     Err(message) => eprintln!("scan-in failed: {}", message),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::types::MovementKind;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// The backend's uniform response shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Status flag: the call succeeded.
    pub success: bool,
    /// Human-readable message, surfaced on the UI as-is.
    pub message: Option<String>,
    /// Payload, present on success for calls that return data.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response without payload (deletes, logouts).
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }

    /// Failed response carrying a message for the UI.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Collapse into payload-or-message. A success without payload and a
    /// failure without message both map to a fallback message.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data.ok_or_else(|| "empty response".to_string())
        } else {
            Err(self.message.unwrap_or_else(|| "request failed".to_string()))
        }
    }
}

// =============================================================================
// DTOS
// =============================================================================

/// Login request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// An inventory item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    /// Material code embedded in the item's barcode.
    pub code: String,
    pub name: String,
    /// Specification/model text (e.g., "500ml", "size M").
    pub specification: String,
    /// Counting unit (box, piece, bottle).
    pub unit: String,
    pub quantity: i64,
}

/// One entry in an item's movement log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: u64,
    pub item_id: u64,
    pub kind: MovementKind,
    pub quantity: i64,
    pub operator: String,
    /// Backend-formatted timestamp, displayed as-is.
    pub recorded_at: String,
}

// =============================================================================
// CLIENT CONTRACT
// =============================================================================

/// The backend surface this application consumes.
pub trait InventoryApi {
    /// Authenticate; payload is the signed-in user's token.
    fn login(&mut self, credentials: &Credentials) -> ApiResponse<String>;

    fn list_items(&mut self) -> ApiResponse<Vec<Item>>;
    fn add_item(&mut self, item: &Item) -> ApiResponse<Item>;
    fn update_item(&mut self, item: &Item) -> ApiResponse<Item>;
    fn delete_item(&mut self, id: u64) -> ApiResponse<()>;

    /// Record received stock for the item with the scanned code.
    fn scan_in(&mut self, code: &str, quantity: i64) -> ApiResponse<Item>;
    /// Record issued stock for the item with the scanned code.
    fn scan_out(&mut self, code: &str, quantity: i64) -> ApiResponse<Item>;

    /// Movement log for one item, newest first.
    fn movements(&mut self, item_id: u64) -> ApiResponse<Vec<Movement>>;
}

// =============================================================================
// TESTS
// =============================================================================
