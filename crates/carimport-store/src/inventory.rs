//! # InventoryStore
//!
//! The persisted inventory: an [`Inventory`] whose every mutation is
//! followed by a full snapshot write of records and settings.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.add_car(input).await                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  working = inventory.clone()                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  working.add_car(input) ──── Err ──► return CoreError, nothing written  │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  save_all([records, settings]) ── Err ──► return StoreError,            │
//! │       │ Ok                              in-memory state unchanged       │
//! │       ▼                                                                 │
//! │  inventory = working                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations take `&mut self`, so one store handle serializes its own
//! writes. Saves are last-writer-wins.

use carimport_core::export::{self, Backup};
use carimport_core::{
    CarInput, CarRecord, CoreResult, CostSummary, DuplicateChassisPolicy, Inventory,
    InventorySummary, Settings, StatusFilter, StatusShare,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::kv::{KeyValueStore, INVENTORY_KEY, SETTINGS_KEY};
use crate::pool::SqliteStore;

/// Inventory plus the adapter it persists to.
#[derive(Debug)]
pub struct InventoryStore<S> {
    store: S,
    inventory: Inventory,
}

impl InventoryStore<SqliteStore> {
    /// Opens the configured SQLite database and loads its snapshots.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let store = SqliteStore::open(config.db_config()).await?;
        Self::open(store, config.defaults, config.duplicate_chassis).await
    }
}

impl<S: KeyValueStore> InventoryStore<S> {
    /// Loads records and settings from `store`.
    ///
    /// ## Load Rules
    /// - No records snapshot: empty inventory
    /// - Records snapshot of the wrong shape: `StoreError::Serialization`
    /// - No settings snapshot: `defaults`
    /// - Settings snapshot of the wrong shape: `defaults`, with a warning
    pub async fn open(
        store: S,
        defaults: Settings,
        duplicate_policy: DuplicateChassisPolicy,
    ) -> StoreResult<Self> {
        let records = match store.load(INVENTORY_KEY).await? {
            Some(value) => serde_json::from_value::<Vec<CarRecord>>(value).map_err(|e| {
                StoreError::Serialization(format!("{}: {}", INVENTORY_KEY, e))
            })?,
            None => Vec::new(),
        };

        let settings = match store.load(SETTINGS_KEY).await? {
            Some(value) => serde_json::from_value::<Settings>(value).unwrap_or_else(|e| {
                warn!(error = %e, "Stored settings unreadable, using defaults");
                defaults
            }),
            None => defaults,
        };

        info!(
            cars = records.len(),
            policy = ?duplicate_policy,
            "Inventory loaded"
        );

        Ok(InventoryStore {
            store,
            inventory: Inventory::from_parts(records, settings)
                .with_duplicate_policy(duplicate_policy),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &[CarRecord] {
        self.inventory.records()
    }

    pub fn settings(&self) -> &Settings {
        self.inventory.settings()
    }

    pub fn get_car(&self, id: &str) -> Option<&CarRecord> {
        self.inventory.get_car(id)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    pub async fn add_car(&mut self, input: CarInput) -> StoreResult<CarRecord> {
        let car = self.mutate(|inventory| inventory.add_car(input)).await?;
        debug!(
            id = %car.id,
            chassis = %car.basic_info.chassis_number,
            total_cost = car.total_cost.units(),
            "Car added"
        );
        Ok(car)
    }

    pub async fn update_car(&mut self, id: &str, input: CarInput) -> StoreResult<CarRecord> {
        let car = self
            .mutate(|inventory| inventory.update_car(id, input))
            .await?;
        debug!(id = %car.id, total_cost = car.total_cost.units(), "Car updated");
        Ok(car)
    }

    pub async fn mark_sold(&mut self, id: &str, selling_price: f64) -> StoreResult<CarRecord> {
        let car = self
            .mutate(|inventory| inventory.mark_sold(id, selling_price))
            .await?;
        debug!(id = %car.id, selling_price, "Car sold");
        Ok(car)
    }

    pub async fn delete_car(&mut self, id: &str) -> StoreResult<CarRecord> {
        let car = self.mutate(|inventory| inventory.delete_car(id)).await?;
        debug!(id = %car.id, "Car deleted");
        Ok(car)
    }

    /// Removes every record. Settings are kept.
    pub async fn clear_all(&mut self) -> StoreResult<usize> {
        let removed = self.mutate(|inventory| Ok(inventory.clear_all())).await?;
        info!(removed, "Inventory cleared");
        Ok(removed)
    }

    /// Saves new settings (sanitized). Stored totals are not recomputed.
    pub async fn update_settings(&mut self, settings: Settings) -> StoreResult<Settings> {
        let applied = self
            .mutate(|inventory| Ok(inventory.update_settings(settings)))
            .await?;
        debug!(
            origin_rate = applied.origin_currency_rate,
            intl_rate = applied.intl_currency_rate,
            "Settings updated"
        );
        Ok(applied)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn list_filtered(&self, search: &str, status: StatusFilter) -> Vec<&CarRecord> {
        self.inventory.list_filtered(search, status)
    }

    pub fn summary_statistics(&self) -> InventorySummary {
        self.inventory.summary_statistics()
    }

    pub fn recent_cars(&self, limit: usize) -> Vec<&CarRecord> {
        self.inventory.recent_cars(limit)
    }

    pub fn awaiting_payment(&self, limit: usize) -> Vec<&CarRecord> {
        self.inventory.awaiting_payment(limit)
    }

    pub fn status_distribution(&self) -> Vec<StatusShare> {
        self.inventory.status_distribution()
    }

    pub fn category_breakdown(&self, id: &str) -> StoreResult<CostSummary> {
        Ok(self.inventory.category_breakdown(id)?)
    }

    /// CSV export of every record.
    pub fn export_csv(&self) -> String {
        export::to_csv(self.inventory.records())
    }

    /// Backup snapshot taken now.
    pub fn backup(&self) -> Backup {
        Backup::new(self.inventory.records(), self.inventory.settings())
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    async fn mutate<T, F>(&mut self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Inventory) -> CoreResult<T>,
    {
        let mut working = self.inventory.clone();
        let output = op(&mut working)?;
        Self::persist(&self.store, &working).await?;
        self.inventory = working;
        Ok(output)
    }

    async fn persist(store: &S, inventory: &Inventory) -> StoreResult<()> {
        let entries: [(&str, Value); 2] = [
            (INVENTORY_KEY, serde_json::to_value(inventory.records())?),
            (SETTINGS_KEY, serde_json::to_value(inventory.settings())?),
        ];
        store.save_all(&entries).await.map_err(|e| {
            warn!(error = %e, "Snapshot write failed");
            e
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
