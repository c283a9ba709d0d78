//! # Inventory
//!
//! In-memory record lifecycle: the ordered list of cars plus the current
//! settings. Every mutation recomputes `totalCost` through the CostEngine.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add_car(input)                                                        │
//! │        │  validate presence (+ chassis policy), new UUID v7,            │
//! │        │  totalCost = compute_total_cost(costs, settings)               │
//! │        ▼                                                                │
//! │   ┌──────────┐  update_car(id, input)   ┌──────────┐                    │
//! │   │  stored  │ ───────────────────────► │  stored  │  totalCost         │
//! │   │  record  │ ◄─────────────────────── │  record  │  recomputed        │
//! │   └────┬─────┘                          └──────────┘                    │
//! │        │ mark_sold(id, price)                                           │
//! │        ▼                                                                │
//! │   status = sold, sellingPrice, dateSold = now                           │
//! │        │                                                                │
//! │        ▼ delete_car(id)                                                 │
//! │   gone (immediate, irreversible)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failing operation leaves the inventory untouched. Persistence is
//! the caller's concern (see `carimport-store`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::costs::{compute_category_breakdown, compute_total_cost, CostSummary};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CarInput, CarRecord, CarStatus, DuplicateChassisPolicy, Settings};
use crate::validation;

// =============================================================================
// Query Types
// =============================================================================

/// Status filter of the inventory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// Exactly this status.
    Only(CarStatus),
}

impl StatusFilter {
    #[inline]
    pub fn matches(&self, status: CarStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl From<CarStatus> for StatusFilter {
    fn from(status: CarStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Parses `"all"` or any status wire name.
impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<CarStatus>().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    pub total_cars: usize,
    /// Sum of `totalCost` over every record.
    pub total_investment: Money,
    /// One entry per status, 0 when none.
    pub counts_by_status: BTreeMap<CarStatus, usize>,
}

impl InventorySummary {
    /// Count for one status.
    pub fn count(&self, status: CarStatus) -> usize {
        self.counts_by_status.get(&status).copied().unwrap_or(0)
    }
}

/// One bar of the status report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusShare {
    pub status: CarStatus,
    pub count: usize,
    /// Share of all records, 0–100.
    pub percentage: f64,
}

// =============================================================================
// Inventory
// =============================================================================

/// The ordered record sequence and the settings used to price it.
///
/// Records keep insertion order; nothing re-sorts them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    records: Vec<CarRecord>,
    settings: Settings,
    duplicate_policy: DuplicateChassisPolicy,
}

impl Inventory {
    /// Empty inventory with the given settings.
    pub fn new(settings: Settings) -> Self {
        Inventory {
            records: Vec::new(),
            settings: settings.sanitized(),
            duplicate_policy: DuplicateChassisPolicy::default(),
        }
    }

    /// Inventory restored from a snapshot. Stored totals are kept as-is.
    pub fn from_parts(records: Vec<CarRecord>, settings: Settings) -> Self {
        Inventory {
            records,
            settings: settings.sanitized(),
            duplicate_policy: DuplicateChassisPolicy::default(),
        }
    }

    /// Sets the chassis duplicate policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicateChassisPolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All records in insertion order.
    #[inline]
    pub fn records(&self) -> &[CarRecord] {
        &self.records
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn duplicate_policy(&self) -> DuplicateChassisPolicy {
        self.duplicate_policy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_car(&self, id: &str) -> Option<&CarRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Validates the input, prices it and appends a new record.
    ///
    /// ## Errors
    /// - `ValidationError::Required` for a blank chassis number, make or model
    /// - `ValidationError::Duplicate` for a reused chassis number under
    ///   [`DuplicateChassisPolicy::Reject`]
    ///
    /// ```rust
    /// use carimport_core::{CarInput, Inventory, Settings};
    ///
    /// let mut inventory = Inventory::new(Settings::default());
    /// let mut input = CarInput::default();
    /// input.basic_info.chassis_number = "NZE161-1001".into();
    /// input.basic_info.make = "Toyota".into();
    /// input.basic_info.model = "Axio".into();
    /// input.costs.origin.car_price = 500_000.0;
    /// input.costs.shipping.ocean_freight = 800.0;
    ///
    /// let car = inventory.add_car(input).unwrap();
    /// assert_eq!(car.total_cost.units(), 613_000);
    /// assert_eq!(inventory.len(), 1);
    /// ```
    pub fn add_car(&mut self, input: CarInput) -> CoreResult<CarRecord> {
        self.validate_input(&input, None)?;

        let record = CarRecord {
            id: Uuid::now_v7().to_string(),
            total_cost: compute_total_cost(&input.costs, &self.settings),
            basic_info: input.basic_info,
            costs: input.costs,
            status: input.status,
            target_selling_price: input.target_selling_price,
            selling_price: 0.0,
            notes: input.notes,
            date_added: Utc::now(),
            date_sold: None,
        };

        self.records.push(record.clone());
        Ok(record)
    }

    /// Replaces every mutable field of a record and recomputes its total.
    ///
    /// `id` and `dateAdded` are preserved. `sellingPrice` and `dateSold` are
    /// kept while the status stays `sold` and cleared when it moves away.
    ///
    /// ## Errors
    /// - `CoreError::CarNotFound` for an unknown id
    /// - the same validation errors as [`Inventory::add_car`]
    pub fn update_car(&mut self, id: &str, input: CarInput) -> CoreResult<CarRecord> {
        let index = self.position(id)?;
        self.validate_input(&input, Some(id))?;

        let total_cost = compute_total_cost(&input.costs, &self.settings);
        let record = &mut self.records[index];
        record.basic_info = input.basic_info;
        record.costs = input.costs;
        if record.is_sold() && input.status != CarStatus::Sold {
            record.selling_price = 0.0;
            record.date_sold = None;
        }
        record.status = input.status;
        record.target_selling_price = input.target_selling_price;
        record.notes = input.notes;
        record.total_cost = total_cost;

        Ok(record.clone())
    }

    /// Marks a car sold at `selling_price`, stamping `dateSold` with now.
    ///
    /// The price is checked before the record is touched, so a rejected
    /// price leaves the record exactly as it was.
    pub fn mark_sold(&mut self, id: &str, selling_price: f64) -> CoreResult<CarRecord> {
        let price = validation::validate_selling_price(selling_price)?;
        let index = self.position(id)?;

        let record = &mut self.records[index];
        record.status = CarStatus::Sold;
        record.selling_price = price;
        record.date_sold = Some(Utc::now());

        Ok(record.clone())
    }

    /// Removes a record, returning it.
    pub fn delete_car(&mut self, id: &str) -> CoreResult<CarRecord> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    /// Removes every record; settings are kept. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Replaces the settings, sanitizing every field.
    ///
    /// Stored totals are not recomputed: each keeps the rates in effect when
    /// it was last added or edited.
    pub fn update_settings(&mut self, settings: Settings) -> Settings {
        self.settings = settings.sanitized();
        self.settings
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Records matching a search text and a status filter, in insertion order.
    ///
    /// The search is a case-insensitive substring match over chassis number,
    /// make and model, skipped when the trimmed text is empty. Both filters
    /// must match.
    pub fn list_filtered(&self, search: &str, status: StatusFilter) -> Vec<&CarRecord> {
        let needle = search.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| needle.is_empty() || record.matches_search(&needle))
            .filter(|record| status.matches(record.status))
            .collect()
    }

    /// Car count, total investment and a count for every status.
    pub fn summary_statistics(&self) -> InventorySummary {
        let mut counts_by_status: BTreeMap<CarStatus, usize> =
            CarStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for record in &self.records {
            *counts_by_status.entry(record.status).or_insert(0) += 1;
        }

        InventorySummary {
            total_cars: self.records.len(),
            total_investment: self.records.iter().map(|r| r.total_cost).sum(),
            counts_by_status,
        }
    }

    /// Newest `dateAdded` first.
    pub fn recent_cars(&self, limit: usize) -> Vec<&CarRecord> {
        let mut recent: Vec<&CarRecord> = self.records.iter().collect();
        recent.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        recent.truncate(limit);
        recent
    }

    /// Cars still owing port or duty payments (`purchased` or `at-port`),
    /// in insertion order.
    pub fn awaiting_payment(&self, limit: usize) -> Vec<&CarRecord> {
        self.records
            .iter()
            .filter(|record| record.status.awaits_payment())
            .take(limit)
            .collect()
    }

    /// Count and percentage share per status, for statuses present only,
    /// in lifecycle order.
    pub fn status_distribution(&self) -> Vec<StatusShare> {
        let total = self.records.len();
        let summary = self.summary_statistics();

        summary
            .counts_by_status
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| StatusShare {
                status,
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect()
    }

    /// Category subtotals of a stored record under the current settings.
    ///
    /// `total` is the record's stored `totalCost`, the same figure the list,
    /// export and profit/loss use, even when the rates have changed since.
    pub fn category_breakdown(&self, id: &str) -> CoreResult<CostSummary> {
        let record = self
            .get_car(id)
            .ok_or_else(|| CoreError::CarNotFound(id.to_string()))?;
        Ok(CostSummary {
            total: record.total_cost,
            ..compute_category_breakdown(&record.costs, &self.settings)
        })
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn position(&self, id: &str) -> CoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| CoreError::CarNotFound(id.to_string()))
    }

    fn validate_input(&self, input: &CarInput, editing: Option<&str>) -> CoreResult<()> {
        validation::validate_basic_info(&input.basic_info)?;
        if self.duplicate_policy == DuplicateChassisPolicy::Reject {
            validation::validate_chassis_available(
                &self.records,
                &input.basic_info.chassis_number,
                editing,
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BasicInfo;
    use chrono::{Duration, TimeZone};

    fn input(chassis: &str, make: &str, model: &str) -> CarInput {
        CarInput {
            basic_info: BasicInfo {
                chassis_number: chassis.to_string(),
                make: make.to_string(),
                model: model.to_string(),
                ..BasicInfo::default()
            },
            ..CarInput::default()
        }
    }

    fn priced_input(chassis: &str) -> CarInput {
        let mut car = input(chassis, "Toyota", "Axio");
        car.costs.origin.car_price = 500_000.0;
        car.costs.shipping.ocean_freight = 800.0;
        car
    }

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new(Settings::default());
        inventory.add_car(input("NZE161-1001", "Toyota", "Axio")).unwrap();
        inventory.add_car(input("GP5-2002", "Honda", "Fit")).unwrap();
        inventory.add_car(input("ZVW30-3003", "Toyota", "Prius")).unwrap();
        inventory
    }

    #[test]
    fn test_add_car_assigns_id_and_total() {
        let mut inventory = Inventory::new(Settings::default());
        let car = inventory.add_car(priced_input("NZE161-1001")).unwrap();

        assert!(!car.id.is_empty());
        assert_eq!(car.total_cost.units(), 613_000);
        assert_eq!(car.status, CarStatus::Purchased);
        assert_eq!(car.selling_price, 0.0);
        assert!(car.date_sold.is_none());
        assert_eq!(inventory.get_car(&car.id), Some(&car));
    }

    #[test]
    fn test_ids_are_unique() {
        let inventory = stocked();
        let ids: std::collections::HashSet<_> =
            inventory.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_add_car_blank_chassis_rejected() {
        let mut inventory = stocked();
        let err = inventory.add_car(input("", "Toyota", "Axio")).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_duplicate_chassis_allowed_by_default() {
        let mut inventory = stocked();
        assert!(inventory.add_car(input("NZE161-1001", "Toyota", "Axio")).is_ok());
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn test_duplicate_chassis_rejected_by_policy() {
        let mut inventory =
            stocked().with_duplicate_policy(DuplicateChassisPolicy::Reject);

        let err = inventory
            .add_car(input("nze161-1001", "Toyota", "Axio"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(inventory.len(), 3);

        // Editing a record without changing its chassis is fine.
        let id = inventory.records()[0].id.clone();
        let mut edit = input("NZE161-1001", "Toyota", "Axio G");
        edit.notes = "new bumper".to_string();
        assert!(inventory.update_car(&id, edit).is_ok());

        // Taking another record's chassis is not.
        let err = inventory
            .update_car(&id, input("GP5-2002", "Toyota", "Axio"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_update_with_same_input_keeps_total() {
        let mut inventory = Inventory::new(Settings::default());
        let added = inventory.add_car(priced_input("NZE161-1001")).unwrap();
        let updated = inventory
            .update_car(&added.id, priced_input("NZE161-1001"))
            .unwrap();

        assert_eq!(updated.total_cost, added.total_cost);
        assert_eq!(updated.id, added.id);
        assert_eq!(updated.date_added, added.date_added);
    }

    #[test]
    fn test_update_recomputes_total_and_preserves_sale() {
        let mut inventory = Inventory::new(Settings::default());
        let added = inventory.add_car(priced_input("NZE161-1001")).unwrap();
        inventory.mark_sold(&added.id, 700_000.0).unwrap();

        let mut edit = priced_input("NZE161-1001");
        edit.costs.destination_inland.reconditioning = 20_000.0;
        edit.status = CarStatus::Sold;
        let updated = inventory.update_car(&added.id, edit).unwrap();

        assert_eq!(updated.total_cost.units(), 633_000);
        assert_eq!(updated.selling_price, 700_000.0);
        assert!(updated.date_sold.is_some());
    }

    #[test]
    fn test_update_away_from_sold_clears_sale() {
        let mut inventory = Inventory::new(Settings::default());
        let added = inventory.add_car(priced_input("NZE161-1001")).unwrap();
        inventory.mark_sold(&added.id, 700_000.0).unwrap();

        let mut edit = priced_input("NZE161-1001");
        edit.status = CarStatus::InShowroom;
        let updated = inventory.update_car(&added.id, edit).unwrap();

        assert_eq!(updated.selling_price, 0.0);
        assert_eq!(updated.date_sold, None);
        assert_eq!(updated.profit_loss(), None);
        assert_eq!(updated.listed_price(), None);
    }

    #[test]
    fn test_update_rejects_blank_make() {
        let mut inventory = stocked();
        let id = inventory.records()[1].id.clone();
        let before = inventory.clone();

        assert!(inventory.update_car(&id, input("GP5-2002", "", "Fit")).is_err());
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_update_after_delete_not_found() {
        let mut inventory = stocked();
        let id = inventory.records()[0].id.clone();

        inventory.delete_car(&id).unwrap();
        let err = inventory
            .update_car(&id, input("NZE161-1001", "Toyota", "Axio"))
            .unwrap_err();

        assert!(matches!(err, CoreError::CarNotFound(ref missing) if *missing == id));
        assert!(inventory.delete_car(&id).is_err());
    }

    #[test]
    fn test_mark_sold_then_profit_loss() {
        let mut inventory = Inventory::new(Settings::default());
        let added = inventory.add_car(priced_input("NZE161-1001")).unwrap();
        assert_eq!(added.profit_loss(), None);

        let sold = inventory.mark_sold(&added.id, 650_000.0).unwrap();
        assert_eq!(sold.status, CarStatus::Sold);
        assert!(sold.date_sold.is_some());
        assert_eq!(
            sold.profit_loss(),
            Some(650_000.0 - sold.total_cost.as_f64())
        );
        assert_eq!(sold.profit_loss(), Some(37_000.0));
    }

    #[test]
    fn test_mark_sold_negative_price_leaves_record() {
        let mut inventory = stocked();
        let id = inventory.records()[0].id.clone();
        let before = inventory.clone();

        let err = inventory.mark_sold(&id, -100.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSellingPrice { .. }));
        assert_eq!(inventory.get_car(&id).map(|c| c.status), Some(CarStatus::Purchased));
        assert_eq!(inventory, before);

        assert!(inventory.mark_sold(&id, f64::NAN).is_err());
        assert!(matches!(
            inventory.mark_sold("missing", 10.0),
            Err(CoreError::CarNotFound(_))
        ));
    }

    #[test]
    fn test_list_filtered_defaults_return_all_in_order() {
        let inventory = stocked();
        let all = inventory.list_filtered("", StatusFilter::All);
        let chassis: Vec<_> = all
            .iter()
            .map(|r| r.basic_info.chassis_number.as_str())
            .collect();
        assert_eq!(chassis, ["NZE161-1001", "GP5-2002", "ZVW30-3003"]);

        assert_eq!(inventory.list_filtered("   ", StatusFilter::All).len(), 3);
    }

    #[test]
    fn test_list_filtered_search_and_status() {
        let mut inventory = stocked();
        let prius = inventory.records()[2].id.clone();
        inventory.mark_sold(&prius, 1_000_000.0).unwrap();

        let toyotas = inventory.list_filtered("TOYOTA", StatusFilter::All);
        assert_eq!(toyotas.len(), 2);

        let fit = inventory.list_filtered("fi", StatusFilter::All);
        assert_eq!(fit.len(), 1);
        assert_eq!(fit[0].basic_info.make, "Honda");

        let by_chassis = inventory.list_filtered("gp5", StatusFilter::All);
        assert_eq!(by_chassis.len(), 1);

        let sold_toyotas =
            inventory.list_filtered("toyota", StatusFilter::Only(CarStatus::Sold));
        assert_eq!(sold_toyotas.len(), 1);
        assert_eq!(sold_toyotas[0].id, prius);

        assert!(inventory
            .list_filtered("honda", StatusFilter::Only(CarStatus::Sold))
            .is_empty());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "at-port".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(CarStatus::AtPort)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(CarStatus::Sold).to_string(), "sold");
    }

    #[test]
    fn test_summary_statistics() {
        let mut inventory = Inventory::new(Settings::default());
        inventory.add_car(priced_input("A")).unwrap();
        let b = inventory.add_car(priced_input("B")).unwrap();
        inventory.mark_sold(&b.id, 700_000.0).unwrap();

        let summary = inventory.summary_statistics();
        assert_eq!(summary.total_cars, 2);
        assert_eq!(summary.total_investment.units(), 1_226_000);
        assert_eq!(summary.counts_by_status.len(), 6);
        assert_eq!(summary.count(CarStatus::Purchased), 1);
        assert_eq!(summary.count(CarStatus::Sold), 1);
        assert_eq!(summary.count(CarStatus::InTransit), 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Inventory::default().summary_statistics();
        assert_eq!(summary.total_cars, 0);
        assert!(summary.total_investment.is_zero());
        assert!(summary.counts_by_status.values().all(|count| *count == 0));
        assert!(Inventory::default().status_distribution().is_empty());
    }

    #[test]
    fn test_recent_cars_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut inventory = stocked();
        let records: Vec<CarRecord> = inventory
            .records()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, mut record)| {
                // Middle record is the newest.
                let offset = [0, 2, 1][i];
                record.date_added = base + Duration::days(offset);
                record
            })
            .collect();
        inventory = Inventory::from_parts(records, Settings::default());

        let recent = inventory.recent_cars(2);
        let chassis: Vec<_> = recent
            .iter()
            .map(|r| r.basic_info.chassis_number.as_str())
            .collect();
        assert_eq!(chassis, ["GP5-2002", "ZVW30-3003"]);
        assert_eq!(inventory.recent_cars(10).len(), 3);
    }

    #[test]
    fn test_awaiting_payment() {
        let mut inventory = Inventory::new(Settings::default());
        for (chassis, status) in [
            ("A", CarStatus::Purchased),
            ("B", CarStatus::InTransit),
            ("C", CarStatus::AtPort),
            ("D", CarStatus::Sold),
            ("E", CarStatus::Purchased),
        ] {
            let mut car = input(chassis, "Nissan", "Note");
            car.status = status;
            inventory.add_car(car).unwrap();
        }

        let awaiting: Vec<_> = inventory
            .awaiting_payment(5)
            .iter()
            .map(|r| r.basic_info.chassis_number.clone())
            .collect();
        assert_eq!(awaiting, ["A", "C", "E"]);
        assert_eq!(inventory.awaiting_payment(2).len(), 2);
    }

    #[test]
    fn test_status_distribution() {
        let mut inventory = stocked();
        let id = inventory.records()[0].id.clone();
        inventory.mark_sold(&id, 900_000.0).unwrap();
        inventory.add_car(input("X", "Mazda", "Axela")).unwrap();

        let distribution = inventory.status_distribution();
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].status, CarStatus::Purchased);
        assert_eq!(distribution[0].count, 3);
        assert_eq!(distribution[0].percentage, 75.0);
        assert_eq!(distribution[1].status, CarStatus::Sold);
        assert_eq!(distribution[1].percentage, 25.0);
    }

    #[test]
    fn test_category_breakdown_of_record() {
        let mut inventory = Inventory::new(Settings::default());
        let car = inventory.add_car(priced_input("NZE161-1001")).unwrap();

        let summary = inventory.category_breakdown(&car.id).unwrap();
        assert_eq!(summary.total, car.total_cost);
        assert_eq!(summary.shipping_cost, 88_000.0);
        assert!(inventory.category_breakdown("nope").is_err());
    }

    #[test]
    fn test_update_settings_keeps_stored_totals() {
        let mut inventory = Inventory::new(Settings::default());
        let car = inventory.add_car(priced_input("NZE161-1001")).unwrap();

        let applied = inventory.update_settings(Settings {
            origin_currency_rate: 2.0,
            intl_currency_rate: -5.0,
            ..Settings::default()
        });
        assert_eq!(applied.origin_currency_rate, 2.0);
        assert_eq!(applied.intl_currency_rate, 110.0);

        assert_eq!(inventory.get_car(&car.id).unwrap().total_cost.units(), 613_000);

        // The next edit picks up the new rate.
        let updated = inventory
            .update_car(&car.id, priced_input("NZE161-1001"))
            .unwrap();
        assert_eq!(updated.total_cost.units(), 1_088_000);
    }

    #[test]
    fn test_category_breakdown_keeps_stored_total() {
        let mut inventory = Inventory::new(Settings::default());
        let car = inventory.add_car(priced_input("NZE161-1001")).unwrap();

        inventory.update_settings(Settings {
            origin_currency_rate: 2.0,
            ..Settings::default()
        });
        let summary = inventory.category_breakdown(&car.id).unwrap();

        assert_eq!(summary.total.units(), 613_000);
        assert_eq!(summary.origin_cost, 1_000_000.0);
        assert_eq!(summary.shipping_cost, 88_000.0);
    }

    #[test]
    fn test_summary_with_huge_totals() {
        let mut inventory = Inventory::new(Settings::default());
        for chassis in ["A", "B"] {
            let mut car = input(chassis, "Toyota", "Axio");
            car.costs.destination_port.customs_duty = 1e19;
            inventory.add_car(car).unwrap();
        }

        let summary = inventory.summary_statistics();
        assert_eq!(summary.total_cars, 2);
        assert_eq!(summary.total_investment.units(), i64::MAX);
    }

    #[test]
    fn test_clear_all_keeps_settings() {
        let mut inventory = stocked();
        inventory.update_settings(Settings {
            origin_currency_rate: 0.9,
            ..Settings::default()
        });

        assert_eq!(inventory.clear_all(), 3);
        assert!(inventory.is_empty());
        assert_eq!(inventory.settings().origin_currency_rate, 0.9);
    }

    #[test]
    fn test_suggested_selling_price() {
        let mut inventory = Inventory::new(Settings::default());
        let car = inventory.add_car(priced_input("NZE161-1001")).unwrap();
        assert_eq!(car.suggested_selling_price(), 735_600.0);

        let mut with_target = priced_input("NZE161-1001");
        with_target.target_selling_price = 800_000.0;
        let car = inventory.update_car(&car.id, with_target).unwrap();
        assert_eq!(car.suggested_selling_price(), 800_000.0);
    }
}
