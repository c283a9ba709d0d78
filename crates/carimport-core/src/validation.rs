//! # Validation Module
//!
//! Presence and price checks for the inventory lifecycle.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (external)                                      │
//! │  └── Builds a CarInput from its own widgets                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (coerce)                                     │
//! │  └── Numbers never fail; garbage becomes a documented default          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── chassisNumber, make, model must be non-blank                      │
//! │  ├── chassis uniqueness (only under the `reject` policy)               │
//! │  └── selling price must be positive                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carimport_core::validation::{parse_selling_price, validate_basic_info};
//! use carimport_core::types::BasicInfo;
//!
//! assert!(validate_basic_info(&BasicInfo::default()).is_err());
//! assert_eq!(parse_selling_price("750000").unwrap(), 750_000.0);
//! ```

use crate::coerce;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{BasicInfo, CarRecord};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Wire names of the fields that must be filled in.
pub const REQUIRED_FIELDS: [&str; 3] = ["chassisNumber", "make", "model"];

// =============================================================================
// Presence Checks
// =============================================================================

/// Checks that a text field is not blank after trimming.
///
/// ```rust
/// use carimport_core::validation::validate_required;
///
/// assert!(validate_required("make", "Toyota").is_ok());
/// assert!(validate_required("make", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Checks chassis number, make and model, in that order.
///
/// The first blank field is reported.
pub fn validate_basic_info(info: &BasicInfo) -> ValidationResult<()> {
    let values = [&info.chassis_number, &info.make, &info.model];
    REQUIRED_FIELDS
        .iter()
        .zip(values)
        .try_for_each(|(field, value)| validate_required(field, value))
}

/// Rejects a chassis number already used by another record.
///
/// Comparison is case-insensitive on trimmed values. `exclude_id` skips the
/// record being edited.
pub fn validate_chassis_available<'a, I>(
    records: I,
    chassis_number: &str,
    exclude_id: Option<&str>,
) -> ValidationResult<()>
where
    I: IntoIterator<Item = &'a CarRecord>,
{
    let needle = chassis_number.trim().to_lowercase();
    let taken = records.into_iter().any(|record| {
        exclude_id != Some(record.id.as_str())
            && record.basic_info.chassis_number.trim().to_lowercase() == needle
    });

    if taken {
        return Err(ValidationError::Duplicate {
            field: "chassisNumber".to_string(),
            value: chassis_number.trim().to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Selling Price
// =============================================================================

/// Checks that a selling price is a positive finite number.
///
/// ```rust
/// use carimport_core::validation::validate_selling_price;
///
/// assert!(validate_selling_price(650_000.0).is_ok());
/// assert!(validate_selling_price(0.0).is_err());
/// assert!(validate_selling_price(-100.0).is_err());
/// assert!(validate_selling_price(f64::NAN).is_err());
/// ```
pub fn validate_selling_price(price: f64) -> CoreResult<f64> {
    if !price.is_finite() {
        return Err(CoreError::InvalidSellingPrice {
            reason: "must be a number".to_string(),
        });
    }
    if price <= 0.0 {
        return Err(CoreError::InvalidSellingPrice {
            reason: format!("must be positive, got {}", price),
        });
    }
    Ok(price)
}

/// Turns the text of a sell-price prompt into a validated price.
///
/// Leading numeric text is accepted (`"650000 taka"` → 650 000).
pub fn parse_selling_price(raw: &str) -> CoreResult<f64> {
    let price = coerce::parse_number(raw).ok_or_else(|| CoreError::InvalidSellingPrice {
        reason: format!("'{}' is not a number", raw.trim()),
    })?;
    validate_selling_price(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
