//! # carimport-store: Persistence Layer for the Car Import Tracker
//!
//! This crate keeps the inventory in local key-value storage. The whole
//! record list and the settings object are each stored as one JSON value,
//! rewritten after every successful mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Car Import Tracker Data Flow                        │
//! │                                                                         │
//! │  Presentation layer (add car, mark sold, save settings)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  carimport-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌────────────────┐  │   │
//! │  │   │ InventoryStore │   │ KeyValueStore │   │   Migrations   │  │   │
//! │  │   │ (inventory.rs) │──►│   (kv.rs)     │   │   (embedded)   │  │   │
//! │  │   │                │   │               │   │                │  │   │
//! │  │   │ core Inventory │   │ SqliteStore   │   │ 001_kv_store   │  │   │
//! │  │   │ + snapshots    │   │ MemoryStore   │   │                │  │   │
//! │  │   └────────────────┘   └───────────────┘   └────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/tracker/carimport.db                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`inventory`] - Persisted inventory (load, mutate, snapshot)
//! - [`kv`] - Key-value adapter trait and in-memory adapter
//! - [`pool`] - SQLite adapter and connection configuration
//! - [`migrations`] - Embedded database migrations
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carimport_store::{InventoryStore, StoreConfig};
//!
//! let config = StoreConfig::load_or_default(None);
//! let mut store = InventoryStore::connect(&config).await?;
//!
//! let car = store.add_car(input).await?;
//! store.mark_sold(&car.id, 850_000.0).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod inventory;
pub mod kv;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
pub use kv::{KeyValueStore, MemoryStore, INVENTORY_KEY, SETTINGS_KEY};
pub use pool::{DbConfig, SqliteStore};
