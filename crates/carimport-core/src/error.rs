//! # Error Types
//!
//! Domain-specific error types for carimport-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  carimport-core errors (this file)                                     │
//! │  ├── CoreError        - Lifecycle errors (not found, bad price)        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  carimport-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures, wraps CoreError          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → presentation layer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable: the presentation layer shows the message
//! and the inventory is left exactly as it was before the call.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Record lifecycle errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record with this id exists.
    ///
    /// ## When This Occurs
    /// - Editing, selling or deleting a car that was already deleted
    /// - A stale id held by the presentation layer after `clear_all`
    #[error("Car not found: {0}")]
    CarNotFound(String),

    /// Selling price is not a positive number.
    ///
    /// ## User Workflow
    /// ```text
    /// Mark as Sold
    ///      │
    ///      ▼
    /// Presentation asks for a price: "-100"
    ///      │
    ///      ▼
    /// InvalidSellingPrice { reason: "must be positive, got -100" }
    ///      │
    ///      ▼
    /// Record keeps its previous status
    /// ```
    #[error("Invalid selling price: {reason}")]
    InvalidSellingPrice { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Duplicate value (only raised under the `reject` chassis policy).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
