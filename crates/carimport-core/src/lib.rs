//! # carimport-core: Pure Business Logic for the Car Import Tracker
//!
//! This crate holds the landed-cost arithmetic and the inventory-record
//! lifecycle as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Car Import Tracker Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation layer (external)                   │   │
//! │  │   Dashboard ──► Inventory ──► Car form ──► Reports / Export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CarInput DTOs                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    carimport-store                              │   │
//! │  │         InventoryStore: load ─► mutate ─► snapshot save         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carimport-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   costs   │  │ inventory │  │  export   │  │   │
//! │  │   │ CarRecord │  │CostEngine │  │ Inventory │  │ CSV/backup│  │   │
//! │  │   │ Settings  │  │ estimator │  │  filters  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CarRecord, CostBreakdown, Settings, etc.)
//! - [`money`] - Whole-unit local currency amounts
//! - [`costs`] - Landed-cost computation (CostEngine)
//! - [`estimator`] - Quick duty estimate by engine displacement
//! - [`inventory`] - In-memory record lifecycle, filters, statistics
//! - [`export`] - CSV export and JSON backup rendering
//! - [`coerce`] - Lenient numeric parsing for boundary input
//! - [`error`] - Domain error types
//! - [`validation`] - Presence and price checks
//!
//! ## Example Usage
//!
//! ```rust
//! use carimport_core::costs::compute_total_cost;
//! use carimport_core::types::{CostBreakdown, Settings};
//!
//! let mut costs = CostBreakdown::default();
//! costs.origin.car_price = 500_000.0;
//! costs.shipping.ocean_freight = 800.0;
//!
//! // 500 000 × 1.05 + 800 × 110
//! let total = compute_total_cost(&costs, &Settings::default());
//! assert_eq!(total.units(), 613_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod costs;
pub mod error;
pub mod estimator;
pub mod export;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use costs::{compute_category_breakdown, compute_total_cost, CostSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{Inventory, InventorySummary, StatusFilter, StatusShare};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default origin-currency → local-currency rate.
pub const DEFAULT_ORIGIN_CURRENCY_RATE: f64 = 1.05;

/// Default shipping-currency → local-currency rate.
pub const DEFAULT_INTL_CURRENCY_RATE: f64 = 110.0;

/// Default auction fee percentage (informational only).
pub const DEFAULT_AUCTION_FEE_PERCENT: f64 = 4.0;

/// Default agent commission percentage (informational only).
pub const DEFAULT_AGENT_COMMISSION_PERCENT: f64 = 3.0;

/// Model year assumed when the form leaves it blank.
pub const DEFAULT_MODEL_YEAR: i32 = 2023;

/// Engine displacement assumed when the form leaves it blank.
pub const DEFAULT_ENGINE_CC: u32 = 1500;

/// Markup applied when suggesting a selling price (20%).
pub const SUGGESTED_MARKUP: f64 = 1.2;

/// Number of cars shown on the dashboard lists.
pub const DASHBOARD_LIST_LIMIT: usize = 5;
