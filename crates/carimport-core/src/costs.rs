//! # CostEngine
//!
//! Converts an itemized [`CostBreakdown`] into a landed cost in local
//! currency.
//!
//! ## Formula
//! ```text
//! total = round( origin.sum()   × originCurrencyRate
//!              + shipping.sum() × intlCurrencyRate
//!              + destinationPort.sum()
//!              + destinationInland.sum() )
//! ```
//!
//! Rounding happens exactly once, on the aggregate. Category subtotals in
//! [`CostSummary`] are left unrounded so a detail view can show them with
//! whatever precision it likes; their rounded sum may differ from `total`
//! by a unit, `total` is authoritative.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CostBreakdown, Settings};

/// Per-category subtotals in local currency, plus the rounded total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostSummary {
    pub origin_cost: f64,
    pub shipping_cost: f64,
    pub destination_port_cost: f64,
    pub destination_inland_cost: f64,
    /// From [`compute_category_breakdown`] this equals [`compute_total_cost`]
    /// for the same inputs.
    pub total: Money,
}

/// Computes the landed cost of one car.
///
/// Pure and infallible: inputs are already coerced to non-negative numbers
/// and the settings rates are positive.
///
/// ```rust
/// use carimport_core::costs::compute_total_cost;
/// use carimport_core::types::{CostBreakdown, Settings};
///
/// let mut costs = CostBreakdown::default();
/// costs.destination_port.customs_duty = 120_000.0;
/// costs.destination_inland.reconditioning = 15_000.0;
///
/// let total = compute_total_cost(&costs, &Settings::default());
/// assert_eq!(total.units(), 135_000);
/// ```
pub fn compute_total_cost(costs: &CostBreakdown, settings: &Settings) -> Money {
    Money::round_from(exact_total(costs, settings))
}

/// Computes category subtotals for the detail view.
pub fn compute_category_breakdown(costs: &CostBreakdown, settings: &Settings) -> CostSummary {
    CostSummary {
        origin_cost: costs.origin.sum() * settings.origin_currency_rate,
        shipping_cost: costs.shipping.sum() * settings.intl_currency_rate,
        destination_port_cost: costs.destination_port.sum(),
        destination_inland_cost: costs.destination_inland.sum(),
        total: compute_total_cost(costs, settings),
    }
}

fn exact_total(costs: &CostBreakdown, settings: &Settings) -> f64 {
    costs.origin.sum() * settings.origin_currency_rate
        + costs.shipping.sum() * settings.intl_currency_rate
        + costs.destination_port.sum()
        + costs.destination_inland.sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(origin: f64, intl: f64) -> Settings {
        Settings {
            origin_currency_rate: origin,
            intl_currency_rate: intl,
            ..Settings::default()
        }
    }

    fn reference_costs() -> CostBreakdown {
        let mut costs = CostBreakdown::default();
        costs.origin.car_price = 500_000.0;
        costs.shipping.ocean_freight = 800.0;
        costs
    }

    #[test]
    fn test_all_zero_costs() {
        let total = compute_total_cost(&CostBreakdown::default(), &Settings::default());
        assert!(total.is_zero());
    }

    #[test]
    fn test_reference_scenario() {
        // 500 000 × 1.05 + 800 × 110 = 525 000 + 88 000
        let total = compute_total_cost(&reference_costs(), &settings(1.05, 110.0));
        assert_eq!(total.units(), 613_000);
    }

    #[test]
    fn test_linear_in_each_field() {
        let s = settings(2.0, 100.0);

        // (field setter, local value of one unit)
        let fields: [(fn(&mut CostBreakdown, f64), f64); 4] = [
            (|c, v| c.origin.auction_fees = v, 2.0),
            (|c, v| c.shipping.marine_insurance = v, 100.0),
            (|c, v| c.destination_port.ait = v, 1.0),
            (|c, v| c.destination_inland.fitness_check = v, 1.0),
        ];

        for (set, unit) in fields {
            let mut costs = CostBreakdown::default();
            set(&mut costs, 1_000.0);
            let single = compute_total_cost(&costs, &s).units();

            set(&mut costs, 3_000.0);
            let tripled = compute_total_cost(&costs, &s).units();

            assert_eq!(single, (1_000.0 * unit) as i64);
            assert_eq!(tripled, 3 * single);
        }
    }

    #[test]
    fn test_rate_scaling() {
        let mut costs = CostBreakdown::default();
        costs.origin.car_price = 1_000.0;
        costs.shipping.documentation_fee = 10.0;
        costs.destination_port.vat = 5_000.0;
        costs.destination_inland.fitness_check = 700.0;

        let base = compute_category_breakdown(&costs, &settings(1.0, 100.0));
        let doubled = compute_category_breakdown(&costs, &settings(2.0, 200.0));

        assert_eq!(doubled.origin_cost, base.origin_cost * 2.0);
        assert_eq!(doubled.shipping_cost, base.shipping_cost * 2.0);
        assert_eq!(doubled.destination_port_cost, base.destination_port_cost);
        assert_eq!(doubled.destination_inland_cost, base.destination_inland_cost);
    }

    #[test]
    fn test_rounds_once_on_aggregate() {
        // Each origin item alone rounds down (0.4 → 0); the aggregate is 1.2 → 1.
        let mut costs = CostBreakdown::default();
        costs.origin.car_price = 0.4;
        costs.origin.auction_fees = 0.4;
        costs.origin.other_costs = 0.4;

        let total = compute_total_cost(&costs, &settings(1.0, 110.0));
        assert_eq!(total.units(), 1);
    }

    #[test]
    fn test_breakdown_total_matches_engine() {
        let mut costs = reference_costs();
        costs.origin.agent_commission = 15_000.5;
        costs.shipping.marine_insurance = 12.25;
        costs.destination_port.customs_duty = 150_000.0;
        costs.destination_inland.transport_to_showroom = 8_000.0;

        let s = settings(0.93, 118.7);
        let summary = compute_category_breakdown(&costs, &s);
        assert_eq!(summary.total, compute_total_cost(&costs, &s));
        assert_eq!(summary.destination_port_cost, 150_000.0);
    }

    #[test]
    fn test_fee_percentages_not_applied() {
        let costs = reference_costs();
        let plain = compute_total_cost(&costs, &Settings::default());
        let with_fees = compute_total_cost(
            &costs,
            &Settings {
                auction_fee_percent: 50.0,
                agent_commission_percent: 50.0,
                ..Settings::default()
            },
        );
        assert_eq!(plain, with_fees);
    }
}
