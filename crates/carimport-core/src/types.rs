//! # Domain Types
//!
//! Core domain types used throughout the car import tracker.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CarRecord     │   │  CostBreakdown  │   │    Settings     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID v7)   │──►│  origin         │   │  origin rate    │       │
//! │  │  basicInfo      │   │  shipping       │   │  intl rate      │       │
//! │  │  status         │   │  destinationPort│   │  fee % (info)   │       │
//! │  │  totalCost      │   │  destinationInl.│   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────┐                      │
//! │  │    CarInput     │   │       CarStatus         │                      │
//! │  │  (form DTO)     │   │  purchased → in-transit │                      │
//! │  └─────────────────┘   │  → at-port → cleared    │                      │
//! │                        │  → in-showroom → sold   │                      │
//! │                        └─────────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Everything serializes as camelCase JSON. Field aliases accept snapshots
//! written by the earlier browser-only tracker (`japan`, `bdPort`,
//! `inlandBD`, `jpyRate`, ...), so an exported localStorage dump loads as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::coerce;
use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    DEFAULT_AGENT_COMMISSION_PERCENT, DEFAULT_AUCTION_FEE_PERCENT, DEFAULT_ENGINE_CC,
    DEFAULT_INTL_CURRENCY_RATE, DEFAULT_MODEL_YEAR, DEFAULT_ORIGIN_CURRENCY_RATE,
    SUGGESTED_MARKUP,
};

// =============================================================================
// Car Status
// =============================================================================

/// Where a car is in the import pipeline.
///
/// Transition order is not enforced: any status may be set on edit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum CarStatus {
    /// Won at auction, still in the origin country.
    #[default]
    Purchased,
    /// On the ship.
    InTransit,
    /// Landed, waiting for customs clearance.
    AtPort,
    /// Duties paid and released from port.
    Cleared,
    /// Reconditioned and on display.
    InShowroom,
    /// Sold to a customer.
    Sold,
}

impl CarStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [CarStatus; 6] = [
        CarStatus::Purchased,
        CarStatus::InTransit,
        CarStatus::AtPort,
        CarStatus::Cleared,
        CarStatus::InShowroom,
        CarStatus::Sold,
    ];

    /// Wire name (`"in-transit"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Purchased => "purchased",
            CarStatus::InTransit => "in-transit",
            CarStatus::AtPort => "at-port",
            CarStatus::Cleared => "cleared",
            CarStatus::InShowroom => "in-showroom",
            CarStatus::Sold => "sold",
        }
    }

    /// Human label (`"in transit"`).
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }

    /// Whether the car still needs port/duty payments.
    pub const fn awaits_payment(&self) -> bool {
        matches!(self, CarStatus::Purchased | CarStatus::AtPort)
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace([' ', '_'], "-");
        CarStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: CarStatus::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Duplicate Chassis Policy
// =============================================================================

/// Whether two records may share a chassis number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DuplicateChassisPolicy {
    /// Accept duplicates (re-imports, typos fixed later).
    #[default]
    Allow,
    /// Reject a chassis number already used by another record.
    Reject,
}

impl FromStr for DuplicateChassisPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(DuplicateChassisPolicy::Allow),
            "reject" => Ok(DuplicateChassisPolicy::Reject),
            _ => Err(ValidationError::NotAllowed {
                field: "duplicate_chassis".to_string(),
                allowed: vec!["allow".to_string(), "reject".to_string()],
            }),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Exchange rates and fee percentages, edited by the user.
///
/// ## Invariant
/// Every field is a positive finite number. Missing or invalid input falls
/// back to that field's default, both when deserializing and in
/// [`Settings::sanitized`].
///
/// The two percentages are stored for reference only; no cost computation
/// applies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", from = "RawSettings")]
#[ts(export)]
pub struct Settings {
    /// Origin currency → local currency.
    pub origin_currency_rate: f64,
    /// Shipping currency → local currency.
    pub intl_currency_rate: f64,
    pub auction_fee_percent: f64,
    pub agent_commission_percent: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            origin_currency_rate: DEFAULT_ORIGIN_CURRENCY_RATE,
            intl_currency_rate: DEFAULT_INTL_CURRENCY_RATE,
            auction_fee_percent: DEFAULT_AUCTION_FEE_PERCENT,
            agent_commission_percent: DEFAULT_AGENT_COMMISSION_PERCENT,
        }
    }
}

impl Settings {
    /// Replaces every non-positive or non-finite field with its default.
    ///
    /// ```rust
    /// use carimport_core::Settings;
    ///
    /// let s = Settings {
    ///     origin_currency_rate: 0.0,
    ///     intl_currency_rate: 118.5,
    ///     auction_fee_percent: f64::NAN,
    ///     agent_commission_percent: -1.0,
    /// }
    /// .sanitized();
    ///
    /// assert_eq!(s.origin_currency_rate, 1.05);
    /// assert_eq!(s.intl_currency_rate, 118.5);
    /// assert_eq!(s.auction_fee_percent, 4.0);
    /// assert_eq!(s.agent_commission_percent, 3.0);
    /// ```
    pub fn sanitized(self) -> Self {
        Settings {
            origin_currency_rate: coerce::positive_or(
                self.origin_currency_rate,
                DEFAULT_ORIGIN_CURRENCY_RATE,
            ),
            intl_currency_rate: coerce::positive_or(
                self.intl_currency_rate,
                DEFAULT_INTL_CURRENCY_RATE,
            ),
            auction_fee_percent: coerce::positive_or(
                self.auction_fee_percent,
                DEFAULT_AUCTION_FEE_PERCENT,
            ),
            agent_commission_percent: coerce::positive_or(
                self.agent_commission_percent,
                DEFAULT_AGENT_COMMISSION_PERCENT,
            ),
        }
    }
}

/// Deserialization shape for [`Settings`]; invalid fields arrive as NaN.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default = "nan", alias = "jpyRate", deserialize_with = "coerce::serde::rate")]
    origin_currency_rate: f64,
    #[serde(default = "nan", alias = "usdRate", deserialize_with = "coerce::serde::rate")]
    intl_currency_rate: f64,
    #[serde(default = "nan", deserialize_with = "coerce::serde::rate")]
    auction_fee_percent: f64,
    #[serde(default = "nan", deserialize_with = "coerce::serde::rate")]
    agent_commission_percent: f64,
}

fn nan() -> f64 {
    f64::NAN
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Settings {
            origin_currency_rate: raw.origin_currency_rate,
            intl_currency_rate: raw.intl_currency_rate,
            auction_fee_percent: raw.auction_fee_percent,
            agent_commission_percent: raw.agent_commission_percent,
        }
        .sanitized()
    }
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Costs paid in the origin country, in origin currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OriginCosts {
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub car_price: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub auction_fees: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub agent_commission: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub deregistration_fee: f64,
    #[serde(
        default,
        alias = "inlandTransportJP",
        deserialize_with = "coerce::serde::amount"
    )]
    pub inland_transport: f64,
    #[serde(
        default,
        alias = "otherJapanCosts",
        deserialize_with = "coerce::serde::amount"
    )]
    pub other_costs: f64,
}

impl OriginCosts {
    /// Sum in origin currency.
    pub fn sum(&self) -> f64 {
        self.car_price
            + self.auction_fees
            + self.agent_commission
            + self.deregistration_fee
            + self.inland_transport
            + self.other_costs
    }
}

/// International shipping costs, in shipping currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingCosts {
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub ocean_freight: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub marine_insurance: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub documentation_fee: f64,
}

impl ShippingCosts {
    /// Sum in shipping currency.
    pub fn sum(&self) -> f64 {
        self.ocean_freight + self.marine_insurance + self.documentation_fee
    }
}

/// Port and customs costs at destination, in local currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DestinationPortCosts {
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub port_handling: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub customs_duty: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub supplementary_duty: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub vat: f64,
    /// Advance income tax.
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub ait: f64,
    /// Clearing & forwarding agent fee.
    #[serde(
        default,
        alias = "cfAgentFee",
        deserialize_with = "coerce::serde::amount"
    )]
    pub agent_fee: f64,
}

impl DestinationPortCosts {
    pub fn sum(&self) -> f64 {
        self.port_handling
            + self.customs_duty
            + self.supplementary_duty
            + self.vat
            + self.ait
            + self.agent_fee
    }
}

/// Costs between port and showroom, in local currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DestinationInlandCosts {
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub transport_to_showroom: f64,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub reconditioning: f64,
    #[serde(
        default,
        alias = "brtaFitness",
        deserialize_with = "coerce::serde::amount"
    )]
    pub fitness_check: f64,
}

impl DestinationInlandCosts {
    pub fn sum(&self) -> f64 {
        self.transport_to_showroom + self.reconditioning + self.fitness_check
    }
}

/// Itemized landed cost of one car.
///
/// Every field is a non-negative number; absent or unparseable input is 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostBreakdown {
    #[serde(default, alias = "japan")]
    pub origin: OriginCosts,
    #[serde(default)]
    pub shipping: ShippingCosts,
    #[serde(default, alias = "bdPort")]
    pub destination_port: DestinationPortCosts,
    #[serde(default, alias = "inlandBD")]
    pub destination_inland: DestinationInlandCosts,
}

// =============================================================================
// Basic Info
// =============================================================================

/// Identifying and descriptive vehicle data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasicInfo {
    /// Chassis (frame) number. Required.
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub chassis_number: String,
    /// Required.
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub make: String,
    /// Required.
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub model: String,
    #[serde(default = "default_year", deserialize_with = "coerce::serde::model_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub color: String,
    #[serde(
        default = "default_engine_cc",
        rename = "engineDisplacementCC",
        alias = "engineCC",
        deserialize_with = "coerce::serde::engine_cc"
    )]
    pub engine_displacement_cc: u32,
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub transmission: String,
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub fuel_type: String,
    /// Auction sheet grade ("4.5", "R", ...).
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub auction_grade: String,
}

fn default_year() -> i32 {
    DEFAULT_MODEL_YEAR
}

fn default_engine_cc() -> u32 {
    DEFAULT_ENGINE_CC
}

impl Default for BasicInfo {
    fn default() -> Self {
        BasicInfo {
            chassis_number: String::new(),
            make: String::new(),
            model: String::new(),
            year: DEFAULT_MODEL_YEAR,
            color: String::new(),
            engine_displacement_cc: DEFAULT_ENGINE_CC,
            transmission: String::new(),
            fuel_type: String::new(),
            auction_grade: String::new(),
        }
    }
}

impl BasicInfo {
    /// "Toyota Axio" style display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make.trim(), self.model.trim())
            .trim()
            .to_string()
    }
}

// =============================================================================
// Car Input (DTO)
// =============================================================================

/// Everything the presentation layer collects for an add or edit.
///
/// The core never reads form widgets; it receives this plain value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarInput {
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub costs: CostBreakdown,
    #[serde(default)]
    pub status: CarStatus,
    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub target_selling_price: f64,
    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub notes: String,
}

// =============================================================================
// Car Record
// =============================================================================

/// One imported vehicle, owned by the inventory.
///
/// `total_cost` is derived from `costs` and the settings at the time of the
/// last add/edit; it is never edited directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CarRecord {
    /// Unique identifier (UUID v7), immutable.
    pub id: String,

    pub basic_info: BasicInfo,

    #[serde(default)]
    pub costs: CostBreakdown,

    #[serde(default)]
    pub status: CarStatus,

    #[serde(default, deserialize_with = "coerce::serde::amount")]
    pub target_selling_price: f64,

    /// Final price, 0 until sold.
    #[serde(default, deserialize_with = "coerce::serde::positive_or_zero")]
    pub selling_price: f64,

    #[serde(default, deserialize_with = "coerce::serde::text")]
    pub notes: String,

    #[ts(as = "String")]
    pub date_added: DateTime<Utc>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_sold: Option<DateTime<Utc>>,

    /// Landed cost in whole local-currency units.
    #[serde(default)]
    pub total_cost: Money,
}

impl CarRecord {
    /// Whether the car has been marked sold.
    #[inline]
    pub fn is_sold(&self) -> bool {
        self.status == CarStatus::Sold
    }

    /// `selling_price - total_cost` once sold, `None` before.
    ///
    /// The target price is never used here.
    pub fn profit_loss(&self) -> Option<f64> {
        self.is_sold()
            .then(|| self.selling_price - self.total_cost.as_f64())
    }

    /// Price offered as the default when marking the car sold: the target
    /// price when set, else total cost plus 20%.
    pub fn suggested_selling_price(&self) -> f64 {
        if self.target_selling_price > 0.0 {
            self.target_selling_price
        } else {
            self.total_cost.with_markup(SUGGESTED_MARKUP).as_f64()
        }
    }

    /// Price shown in listings: selling price when sold, else target price.
    pub fn listed_price(&self) -> Option<f64> {
        if self.selling_price > 0.0 {
            Some(self.selling_price)
        } else if self.target_selling_price > 0.0 {
            Some(self.target_selling_price)
        } else {
            None
        }
    }

    /// Case-insensitive match of an already lowercased needle against
    /// chassis number, make and model.
    pub(crate) fn matches_search(&self, needle_lower: &str) -> bool {
        let info = &self.basic_info;
        [&info.chassis_number, &info.make, &info.model]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&CarStatus::InTransit).unwrap();
        assert_eq!(json, "\"in-transit\"");

        let parsed: CarStatus = serde_json::from_str("\"in-showroom\"").unwrap();
        assert_eq!(parsed, CarStatus::InShowroom);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("at-port".parse::<CarStatus>().unwrap(), CarStatus::AtPort);
        assert_eq!("In Transit".parse::<CarStatus>().unwrap(), CarStatus::InTransit);
        assert_eq!("SOLD".parse::<CarStatus>().unwrap(), CarStatus::Sold);
        assert!("scrapped".parse::<CarStatus>().is_err());
    }

    #[test]
    fn test_status_default_and_label() {
        assert_eq!(CarStatus::default(), CarStatus::Purchased);
        assert_eq!(CarStatus::InShowroom.label(), "in showroom");
        assert!(CarStatus::AtPort.awaits_payment());
        assert!(!CarStatus::Cleared.awaits_payment());
    }

    #[test]
    fn test_duplicate_policy_parse() {
        assert_eq!(
            "Reject".parse::<DuplicateChassisPolicy>().unwrap(),
            DuplicateChassisPolicy::Reject
        );
        assert_eq!(DuplicateChassisPolicy::default(), DuplicateChassisPolicy::Allow);
        assert!("maybe".parse::<DuplicateChassisPolicy>().is_err());
    }

    #[test]
    fn test_settings_defaults_on_bad_input() {
        let settings: Settings = serde_json::from_str(
            r#"{"originCurrencyRate": "abc", "intlCurrencyRate": 0, "auctionFeePercent": 5}"#,
        )
        .unwrap();

        assert_eq!(settings.origin_currency_rate, 1.05);
        assert_eq!(settings.intl_currency_rate, 110.0);
        assert_eq!(settings.auction_fee_percent, 5.0);
        assert_eq!(settings.agent_commission_percent, 3.0);
    }

    #[test]
    fn test_settings_accept_legacy_keys() {
        let settings: Settings =
            serde_json::from_str(r#"{"jpyRate": 0.92, "usdRate": "121.5"}"#).unwrap();
        assert_eq!(settings.origin_currency_rate, 0.92);
        assert_eq!(settings.intl_currency_rate, 121.5);
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["originCurrencyRate"], 1.05);
        assert_eq!(value["intlCurrencyRate"], 110.0);
    }

    #[test]
    fn test_cost_breakdown_coerces_fields() {
        let costs: CostBreakdown = serde_json::from_str(
            r#"{
                "origin": {"carPrice": "500000", "auctionFees": -10, "otherCosts": "x"},
                "shipping": {"oceanFreight": 800},
                "destinationPort": {"vat": null}
            }"#,
        )
        .unwrap();

        assert_eq!(costs.origin.car_price, 500_000.0);
        assert_eq!(costs.origin.auction_fees, 0.0);
        assert_eq!(costs.origin.other_costs, 0.0);
        assert_eq!(costs.shipping.ocean_freight, 800.0);
        assert_eq!(costs.destination_port.vat, 0.0);
        assert_eq!(costs.destination_inland, DestinationInlandCosts::default());
    }

    #[test]
    fn test_cost_breakdown_legacy_sections() {
        let costs: CostBreakdown = serde_json::from_str(
            r#"{
                "japan": {"carPrice": 100, "inlandTransportJP": 5, "otherJapanCosts": 1},
                "bdPort": {"cfAgentFee": 20},
                "inlandBD": {"brtaFitness": 3}
            }"#,
        )
        .unwrap();

        assert_eq!(costs.origin.sum(), 106.0);
        assert_eq!(costs.destination_port.agent_fee, 20.0);
        assert_eq!(costs.destination_inland.fitness_check, 3.0);
    }

    #[test]
    fn test_basic_info_defaults() {
        let info: BasicInfo =
            serde_json::from_str(r#"{"chassisNumber": "NZE161-1", "make": "Toyota"}"#).unwrap();
        assert_eq!(info.year, 2023);
        assert_eq!(info.engine_displacement_cc, 1500);
        assert_eq!(info.model, "");

        let info: BasicInfo =
            serde_json::from_str(r#"{"engineCC": "1800", "year": 2017}"#).unwrap();
        assert_eq!(info.engine_displacement_cc, 1800);
        assert_eq!(info.year, 2017);
    }

    #[test]
    fn test_display_name() {
        let info = BasicInfo {
            make: "Toyota".to_string(),
            model: "Axio".to_string(),
            ..BasicInfo::default()
        };
        assert_eq!(info.display_name(), "Toyota Axio");
    }
}
