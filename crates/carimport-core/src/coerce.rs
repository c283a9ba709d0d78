//! # Lenient Numeric Coercion
//!
//! Form fields arrive as free text. Instead of rejecting malformed numbers,
//! every numeric field coerces to a documented default:
//!
//! | Field kind            | Accepted                          | Fallback |
//! |-----------------------|-----------------------------------|----------|
//! | cost amount           | non-negative finite number        | `0`      |
//! | rate / percentage     | positive finite number            | field default |
//! | year, engine cc       | positive whole number             | 2023 / 1500 |
//!
//! Text input is parsed from its longest numeric prefix, so `"1,500cc"`
//! reads as `1500` and `"abc"` reads as nothing.
//!
//! The [`serde`] submodule exposes the same rules as `deserialize_with`
//! helpers so JSON from the presentation layer (numbers, numeric strings,
//! `null`, or anything else) never fails to deserialize.

/// Parses the longest numeric prefix of `raw`, ignoring `,` and `_`
/// thousands separators.
///
/// ```rust
/// use carimport_core::coerce::parse_number;
///
/// assert_eq!(parse_number("500000"), Some(500_000.0));
/// assert_eq!(parse_number(" 1,250.5 "), Some(1250.5));
/// assert_eq!(parse_number("1800cc"), Some(1800.0));
/// assert_eq!(parse_number("n/a"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    (1..=cleaned.len())
        .rev()
        .filter(|end| cleaned.is_char_boundary(*end))
        .find_map(|end| cleaned[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Clamps a cost amount to the non-negative finite range (else `0`).
#[inline]
pub fn amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Parses a cost amount from text (`0` when unparseable or negative).
pub fn parse_amount(raw: &str) -> f64 {
    parse_number(raw).map(amount).unwrap_or(0.0)
}

/// Returns `value` when it is positive and finite, else `default`.
#[inline]
pub fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

/// Parses a positive whole number, truncating any fraction.
///
/// Zero counts as "not provided" and yields `default`.
pub fn whole_or<T>(value: f64, default: T) -> T
where
    T: TryFrom<i64>,
{
    if !value.is_finite() || value < 1.0 {
        return default;
    }
    T::try_from(value.trunc() as i64).unwrap_or(default)
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// `deserialize_with` helpers applying the coercion rules above.
pub mod serde {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use crate::{DEFAULT_ENGINE_CC, DEFAULT_MODEL_YEAR};

    /// Anything a form might send for a numeric field.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumericInput {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    fn raw_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<NumericInput>::deserialize(deserializer)?;
        Ok(match raw {
            Some(NumericInput::Number(n)) => Some(n),
            Some(NumericInput::Text(s)) => super::parse_number(&s),
            Some(NumericInput::Other(_)) | None => None,
        })
    }

    /// Cost amount: non-negative, `0` otherwise.
    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw_number(deserializer)?.map(super::amount).unwrap_or(0.0))
    }

    /// Positive amount or `0` (no field-specific default).
    pub fn positive_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw_number(deserializer)?
            .map(|n| super::positive_or(n, 0.0))
            .unwrap_or(0.0))
    }

    /// Positive rate, or NaN so the caller can substitute its own default.
    ///
    /// Used by `Settings`, whose `sanitized()` replaces NaN per field.
    pub fn rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw_number(deserializer)?
            .map(|n| super::positive_or(n, f64::NAN))
            .unwrap_or(f64::NAN))
    }

    /// Model year, defaulting to 2023.
    pub fn model_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw_number(deserializer)?
            .map(|n| super::whole_or(n, DEFAULT_MODEL_YEAR))
            .unwrap_or(DEFAULT_MODEL_YEAR))
    }

    /// Engine displacement in cc, defaulting to 1500.
    pub fn engine_cc<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw_number(deserializer)?
            .map(|n| super::whole_or(n, DEFAULT_ENGINE_CC))
            .unwrap_or(DEFAULT_ENGINE_CC))
    }

    /// Free text; numbers and other scalars become their JSON text, `null` empty.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
