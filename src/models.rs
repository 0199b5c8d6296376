//! Input-side domain types for the pricing engine.
//!
//! This is the boundary schema: it is defined once here and reused at every
//! call site that feeds the engine (quote builder, invoice regeneration,
//! pricing preview). Money and rate fields travel as strings on the wire.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property classification used for tier rule matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
}

/// Unit a measured quantity of treatable area is expressed in.
///
/// Square units interconvert; linear footage and count-based units (bait
/// stations, units in a complex) have no meaningful conversion and pass
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    #[serde(rename = "sqft")]
    SquareFeet,
    #[serde(rename = "sqm")]
    SquareMeters,
    #[serde(rename = "linear_ft")]
    LinearFeet,
    #[serde(rename = "count")]
    Count,
}

/// How the margin-or-markup fraction is applied to cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    Margin,
    Markup,
}

/// Rounding applied to the pre-tax subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingRule {
    #[serde(rename = "nearest_1")]
    Nearest1,
    #[serde(rename = "nearest_5")]
    Nearest5,
    #[serde(rename = "psychological_9")]
    Psychological9,
}

/// Where a chemical may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Interior,
    Exterior,
    Both,
}

impl Applicability {
    /// Whether a chemical with this applicability is used on a job with the
    /// given interior/exterior selection.
    pub fn applies_to(self, interior: bool, exterior: bool) -> bool {
        match self {
            Applicability::Interior => interior,
            Applicability::Exterior => exterior,
            Applicability::Both => interior || exterior,
        }
    }
}

/// One chemical drawn from inventory for this service.
#[derive(Debug, Clone, Deserialize)]
pub struct ChemicalUsage {
    #[serde(default)]
    pub product_id: Option<Uuid>,
    pub name: String,
    /// Application rate per 1000 area units, in package units.
    #[serde(with = "rust_decimal::serde::str")]
    pub rate_per_1000: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub package_size: Decimal,
    pub package_unit: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub package_cost: Decimal,
    /// Fraction of product lost to mixing and application waste, in [0, 1).
    #[serde(default, with = "rust_decimal::serde::str")]
    pub waste_percent: Decimal,
    pub use_for: Applicability,
}

/// Travel parameters for reaching the job site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TravelParams {
    #[serde(default, with = "rust_decimal::serde::str")]
    pub fixed_minutes: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub minutes_per_mile: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub miles: Decimal,
    /// Replaces the computed drive time when set.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub override_minutes: Option<Decimal>,
    /// Replaces the whole travel charge when set; wins over override_minutes.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub override_amount: Option<Decimal>,
    #[serde(default)]
    pub override_reason: Option<String>,
}

/// Manual addition to the computed labor hours.
#[derive(Debug, Clone, Deserialize)]
pub struct LaborAdder {
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Flat fee added after margin/markup is applied.
#[derive(Debug, Clone, Deserialize)]
pub struct Fee {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Flat discount subtracted after fees. Recorded on the quote as a negative
/// line amount.
#[derive(Debug, Clone, Deserialize)]
pub struct Discount {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// Area-banded override of pricing parameters for one property type.
///
/// The band is `[from_area, to_area)` in the template's main unit; a missing
/// `to_area` leaves the band open-ended above.
#[derive(Debug, Clone, Deserialize)]
pub struct TierRule {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub property_type: PropertyType,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub from_area: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub to_area: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub minimum_override: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price_per_1000_override: Option<Decimal>,
}

impl TierRule {
    /// Check whether this rule's band contains the given normalized area
    /// for the given property type.
    pub fn contains(&self, property_type: PropertyType, area: Decimal) -> bool {
        if self.property_type != property_type {
            return false;
        }
        if area < self.from_area {
            return false;
        }
        match self.to_area {
            Some(end) => area < end,
            None => true,
        }
    }
}

/// Pricing defaults captured from the service template when the quote was
/// drafted. Quotes price against the snapshot, not the live template.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSnapshot {
    #[serde(default)]
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    /// Unit areas are normalized to before any per-1000 rate math.
    pub main_unit: AreaUnit,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price_per_1000: Option<Decimal>,
    /// Default multipliers used when the quote does not set its own.
    #[serde(default = "default_multiplier", with = "rust_decimal::serde::str")]
    pub infestation_multiplier: Decimal,
    #[serde(default = "default_multiplier", with = "rust_decimal::serde::str")]
    pub complexity_multiplier: Decimal,
}

fn default_multiplier() -> Decimal {
    Decimal::ONE
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

/// Full input to the pricing engine for one service on a quote.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingInput {
    pub property_type: PropertyType,
    #[serde(with = "rust_decimal::serde::str")]
    pub area: Decimal,
    pub area_unit: AreaUnit,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub infestation_multiplier: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub complexity_multiplier: Option<Decimal>,
    #[serde(default = "default_true")]
    pub interior: bool,
    #[serde(default = "default_true")]
    pub exterior: bool,
    #[serde(default)]
    pub chemicals: Vec<ChemicalUsage>,
    /// Fixed on-site setup time in hours.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub setup_time_hours: Decimal,
    /// Working hours per 1000 normalized area units.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub hours_per_1000: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub hourly_wage: Decimal,
    /// Payroll burden as a fraction of wage (0.28 = 28%).
    #[serde(default, with = "rust_decimal::serde::str")]
    pub labor_burden_percent: Decimal,
    #[serde(default)]
    pub travel: TravelParams,
    #[serde(default)]
    pub labor_adder: Option<LaborAdder>,
    pub pricing_mode: PricingMode,
    /// Margin or markup target as a fraction, per `pricing_mode`.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub margin_or_markup: Decimal,
    #[serde(default)]
    pub fees: Vec<Fee>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    pub rounding: RoundingRule,
    /// Manual price floor set on the quote itself; wins over tier and
    /// template minimums.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub minimum: Option<Decimal>,
    #[serde(default)]
    pub tier_rules: Vec<TierRule>,
    pub template: TemplateSnapshot,
    #[serde(default = "default_currency")]
    pub currency: String,
}
