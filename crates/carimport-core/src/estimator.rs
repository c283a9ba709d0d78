//! # Duty Estimator
//!
//! Quick landed-cost quote from three numbers: engine displacement, FOB price
//! and freight. Independent of stored records.
//!
//! ## Calculation
//! ```text
//! fobLocal      = fob     × originCurrencyRate
//! freightLocal  = freight × intlCurrencyRate
//! CFR           = fobLocal + freightLocal
//!
//! customsDuty        = CFR × dutyRate(engineCC)
//! supplementaryDuty  = CFR × 50%
//! VAT                = (CFR + customsDuty + supplementaryDuty) × 15%
//! otherTaxes         = CFR × 5%
//! portFees           = 50 000   (flat)
//! inlandCosts        = 100 000  (flat)
//!
//! total              = CFR + duties + taxes + portFees + inlandCosts
//! suggestedPrice     = total × 1.2
//! ```
//!
//! The percentages and flat fees are fixed constants, not the user's
//! Settings fees. The result is a rough quote, not a customs assessment.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce;
use crate::money::Money;
use crate::types::Settings;
use crate::{DEFAULT_ENGINE_CC, SUGGESTED_MARKUP};

/// FOB price assumed by the quick calculator when the field is blank.
pub const DEFAULT_FOB_PRICE: f64 = 500_000.0;

/// Freight assumed by the quick calculator when the field is blank.
pub const DEFAULT_FREIGHT: f64 = 800.0;

/// Supplementary duty, 50% of CFR.
pub const SUPPLEMENTARY_DUTY_RATE: DutyRate = DutyRate::from_bps(5_000);

/// VAT on CFR plus duties, 15%.
pub const VAT_RATE: DutyRate = DutyRate::from_bps(1_500);

/// Other taxes (AIT, advance tax), 5% of CFR.
pub const OTHER_TAXES_RATE: DutyRate = DutyRate::from_bps(500);

/// Flat port fee estimate.
pub const PORT_FEES: f64 = 50_000.0;

/// Flat inland cost estimate.
pub const INLAND_COSTS: f64 = 100_000.0;

// =============================================================================
// Duty Rate
// =============================================================================

/// A duty or tax rate in basis points (1 bps = 0.01%).
///
/// 2500 bps = 25%, 30000 bps = 300%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DutyRate(u32);

impl DutyRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DutyRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Multiplier form: 2500 bps → 0.25.
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Percentage for display: 2500 bps → 25.0.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the rate to an amount.
    #[inline]
    pub fn apply(&self, amount: f64) -> f64 {
        amount * self.fraction()
    }
}

/// Displacement brackets, scanned in order. Upper bounds are inclusive.
const DUTY_BRACKETS: [(u32, DutyRate); 4] = [
    (1_500, DutyRate::from_bps(2_500)),
    (2_000, DutyRate::from_bps(5_000)),
    (2_500, DutyRate::from_bps(10_000)),
    (3_000, DutyRate::from_bps(20_000)),
];

/// Rate above the last bracket.
const TOP_DUTY_RATE: DutyRate = DutyRate::from_bps(30_000);

/// Ad-valorem customs duty rate for an engine displacement.
///
/// ```rust
/// use carimport_core::estimator::duty_rate_for;
///
/// assert_eq!(duty_rate_for(1500).fraction(), 0.25);
/// assert_eq!(duty_rate_for(1501).fraction(), 0.50);
/// assert_eq!(duty_rate_for(4000).fraction(), 3.00);
/// ```
pub fn duty_rate_for(engine_cc: u32) -> DutyRate {
    DUTY_BRACKETS
        .iter()
        .find(|(upper, _)| engine_cc <= *upper)
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_DUTY_RATE)
}

// =============================================================================
// Estimate Input
// =============================================================================

/// Quick calculator form values.
///
/// Blank, zero or unparseable fields fall back to 1500 cc, 500 000 FOB and
/// 800 freight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", from = "RawEstimateInput")]
#[ts(export)]
pub struct EstimateInput {
    #[serde(rename = "engineCC")]
    pub engine_cc: u32,
    pub fob_price: f64,
    pub freight: f64,
}

impl Default for EstimateInput {
    fn default() -> Self {
        EstimateInput {
            engine_cc: DEFAULT_ENGINE_CC,
            fob_price: DEFAULT_FOB_PRICE,
            freight: DEFAULT_FREIGHT,
        }
    }
}

impl EstimateInput {
    /// Builds the input from raw form text.
    ///
    /// ```rust
    /// use carimport_core::estimator::EstimateInput;
    ///
    /// let input = EstimateInput::from_form("1800", "", "abc");
    /// assert_eq!(input.engine_cc, 1800);
    /// assert_eq!(input.fob_price, 500_000.0);
    /// assert_eq!(input.freight, 800.0);
    /// ```
    pub fn from_form(engine_cc: &str, fob_price: &str, freight: &str) -> Self {
        let number = |raw: &str| coerce::parse_number(raw).unwrap_or(f64::NAN);
        RawEstimateInput {
            engine_cc: number(engine_cc),
            fob_price: number(fob_price),
            freight: number(freight),
        }
        .into()
    }

    pub fn estimate(&self, settings: &Settings) -> LandedCostEstimate {
        estimate_landed_cost(self.engine_cc, self.fob_price, self.freight, settings)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEstimateInput {
    #[serde(
        default = "nan",
        rename = "engineCC",
        deserialize_with = "coerce::serde::rate"
    )]
    engine_cc: f64,
    #[serde(default = "nan", deserialize_with = "coerce::serde::rate")]
    fob_price: f64,
    #[serde(default = "nan", deserialize_with = "coerce::serde::rate")]
    freight: f64,
}

fn nan() -> f64 {
    f64::NAN
}

impl From<RawEstimateInput> for EstimateInput {
    fn from(raw: RawEstimateInput) -> Self {
        EstimateInput {
            engine_cc: coerce::whole_or(raw.engine_cc, DEFAULT_ENGINE_CC),
            fob_price: coerce::positive_or(raw.fob_price, DEFAULT_FOB_PRICE),
            freight: coerce::positive_or(raw.freight, DEFAULT_FREIGHT),
        }
    }
}

// =============================================================================
// Landed Cost Estimate
// =============================================================================

/// Every line of a quick quote, in local currency, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LandedCostEstimate {
    pub fob_local: f64,
    pub freight_local: f64,
    pub cfr_value: f64,
    pub duty_rate: DutyRate,
    pub customs_duty: f64,
    pub supplementary_duty: f64,
    pub vat: f64,
    pub other_taxes: f64,
    pub port_fees: f64,
    pub inland_costs: f64,
    pub total_cost: f64,
    pub suggested_selling_price: f64,
}

/// One rounded line of the quote, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct EstimateLine {
    pub label: String,
    pub amount: Money,
}

impl LandedCostEstimate {
    pub fn fob_local_rounded(&self) -> Money {
        Money::round_from(self.fob_local)
    }

    pub fn freight_local_rounded(&self) -> Money {
        Money::round_from(self.freight_local)
    }

    pub fn customs_duty_rounded(&self) -> Money {
        Money::round_from(self.customs_duty)
    }

    pub fn supplementary_duty_rounded(&self) -> Money {
        Money::round_from(self.supplementary_duty)
    }

    pub fn vat_rounded(&self) -> Money {
        Money::round_from(self.vat)
    }

    pub fn other_taxes_rounded(&self) -> Money {
        Money::round_from(self.other_taxes)
    }

    pub fn port_fees_rounded(&self) -> Money {
        Money::round_from(self.port_fees)
    }

    pub fn inland_costs_rounded(&self) -> Money {
        Money::round_from(self.inland_costs)
    }

    pub fn total_cost_rounded(&self) -> Money {
        Money::round_from(self.total_cost)
    }

    pub fn suggested_selling_price_rounded(&self) -> Money {
        Money::round_from(self.suggested_selling_price)
    }

    /// The quote as labelled, rounded lines in display order.
    pub fn lines(&self) -> Vec<EstimateLine> {
        [
            ("FOB price", self.fob_local_rounded()),
            ("Shipping", self.freight_local_rounded()),
            ("Customs duty", self.customs_duty_rounded()),
            ("Supplementary duty", self.supplementary_duty_rounded()),
            ("VAT", self.vat_rounded()),
            ("Other taxes", self.other_taxes_rounded()),
            ("Port fees", self.port_fees_rounded()),
            ("Inland costs", self.inland_costs_rounded()),
            ("Total cost", self.total_cost_rounded()),
            ("Suggested selling price", self.suggested_selling_price_rounded()),
        ]
        .into_iter()
        .map(|(label, amount)| EstimateLine {
            label: label.to_string(),
            amount,
        })
        .collect()
    }
}

/// Produces a quick landed-cost quote.
///
/// Only the two exchange rates are read from `settings`.
pub fn estimate_landed_cost(
    engine_cc: u32,
    fob_price: f64,
    freight: f64,
    settings: &Settings,
) -> LandedCostEstimate {
    let fob_local = fob_price * settings.origin_currency_rate;
    let freight_local = freight * settings.intl_currency_rate;
    let cfr_value = fob_local + freight_local;

    let duty_rate = duty_rate_for(engine_cc);
    let customs_duty = duty_rate.apply(cfr_value);
    let supplementary_duty = SUPPLEMENTARY_DUTY_RATE.apply(cfr_value);
    let vat = VAT_RATE.apply(cfr_value + customs_duty + supplementary_duty);
    let other_taxes = OTHER_TAXES_RATE.apply(cfr_value);

    let total_cost = fob_local
        + freight_local
        + customs_duty
        + supplementary_duty
        + vat
        + other_taxes
        + PORT_FEES
        + INLAND_COSTS;

    LandedCostEstimate {
        fob_local,
        freight_local,
        cfr_value,
        duty_rate,
        customs_duty,
        supplementary_duty,
        vat,
        other_taxes,
        port_fees: PORT_FEES,
        inland_costs: INLAND_COSTS,
        total_cost,
        suggested_selling_price: total_cost * SUGGESTED_MARKUP,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(duty_rate_for(0).fraction(), 0.25);
        assert_eq!(duty_rate_for(1500).fraction(), 0.25);
        assert_eq!(duty_rate_for(1501).fraction(), 0.50);
        assert_eq!(duty_rate_for(2000).fraction(), 0.50);
        assert_eq!(duty_rate_for(2001).fraction(), 1.00);
        assert_eq!(duty_rate_for(2500).fraction(), 1.00);
        assert_eq!(duty_rate_for(3000).fraction(), 2.00);
        assert_eq!(duty_rate_for(3001).fraction(), 3.00);
    }

    #[test]
    fn test_duty_rate_display() {
        assert_eq!(duty_rate_for(2200).percentage(), 100.0);
        assert_eq!(duty_rate_for(1200).bps(), 2_500);
    }

    #[test]
    fn test_default_quote() {
        let estimate = EstimateInput::default().estimate(&Settings::default());

        // CFR = 525 000 + 88 000
        assert_eq!(Money::round_from(estimate.cfr_value).units(), 613_000);
        assert_eq!(estimate.customs_duty_rounded().units(), 153_250);
        assert_eq!(estimate.supplementary_duty_rounded().units(), 306_500);
        // (613 000 + 153 250 + 306 500) × 0.15
        assert!((estimate.vat - 160_912.5).abs() < 1e-6);
        assert_eq!(estimate.other_taxes_rounded().units(), 30_650);
        assert_eq!(estimate.port_fees_rounded().units(), 50_000);
        assert_eq!(estimate.inland_costs_rounded().units(), 100_000);

        let expected_total = 613_000.0 + 153_250.0 + 306_500.0 + 160_912.5 + 30_650.0
            + 50_000.0
            + 100_000.0;
        assert!((estimate.total_cost - expected_total).abs() < 1e-6);
        assert!((estimate.suggested_selling_price - expected_total * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_uses_only_exchange_rates() {
        let base = estimate_landed_cost(1800, 1_000.0, 10.0, &Settings::default());
        let fees_changed = estimate_landed_cost(
            1800,
            1_000.0,
            10.0,
            &Settings {
                auction_fee_percent: 99.0,
                ..Settings::default()
            },
        );
        assert_eq!(base, fees_changed);
    }

    #[test]
    fn test_input_defaults() {
        let input: EstimateInput =
            serde_json::from_str(r#"{"engineCC": "", "fobPrice": 0, "freight": "1200"}"#)
                .unwrap();
        assert_eq!(input.engine_cc, 1500);
        assert_eq!(input.fob_price, 500_000.0);
        assert_eq!(input.freight, 1_200.0);

        let input: EstimateInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, EstimateInput::default());
    }

    #[test]
    fn test_lines_in_display_order() {
        let estimate = EstimateInput::default().estimate(&Settings::default());
        let lines = estimate.lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].label, "FOB price");
        assert_eq!(lines[0].amount.units(), 525_000);
        assert_eq!(lines[9].label, "Suggested selling price");
    }
}
