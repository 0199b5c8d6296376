//! Output-side types produced by the pricing engine.
//!
//! Callers persist these as quote line items, render them into proposals and
//! invoices, or log them for debugging. Decimal fields serialize as strings.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{AreaUnit, RoundingRule};

/// Category of a quote line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Materials,
    Labor,
    Travel,
    Fee,
    Discount,
    Other,
    Tax,
}

/// One priced line on the quote.
///
/// Discount lines carry negative amounts; everything else is non-negative.
#[derive(Debug, Clone, Serialize)]
pub struct PricingLineItem {
    pub kind: LineItemKind,
    pub label: String,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub qty: Option<Decimal>,
    pub unit: Option<String>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub unit_cost: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub is_override: bool,
    pub override_reason: Option<String>,
}

impl PricingLineItem {
    /// Plain line with no quantity detail and no override provenance.
    pub(crate) fn flat(kind: LineItemKind, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind,
            label: label.into(),
            qty: None,
            unit: None,
            unit_cost: None,
            amount,
            is_override: false,
            override_reason: None,
        }
    }
}

/// Per-chemical quantities behind the materials line.
///
/// `quantity` is in package units with waste included; `packages` is the
/// fractional package count, which inventory reservation rounds up.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialUsage {
    pub product_id: Option<Uuid>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub packages: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
}

/// Intermediate values kept for auditing a quote.
#[derive(Debug, Clone, Serialize)]
pub struct PricingBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub normalized_area: Decimal,
    pub normalized_unit: AreaUnit,
    /// Tier rule that matched, when it carried an id.
    pub tier_rule_id: Option<Uuid>,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_minimum: Decimal,
    /// Floor derived from the resolved price-per-1000, when one was set.
    #[serde(with = "rust_decimal::serde::str_option")]
    pub area_floor: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_hours: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub materials_cost: Decimal,
    pub materials: Vec<MaterialUsage>,
    #[serde(with = "rust_decimal::serde::str")]
    pub travel_minutes: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub travel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pre_markup: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub marked_up_price: Decimal,
    pub floor_applied: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub pre_rounding_subtotal: Decimal,
    pub rounding: RoundingRule,
}

/// Complete pricing for one service on a quote.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    pub lines: Vec<PricingLineItem>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PricingBreakdown>,
}

impl PricingResult {
    /// Line of the given kind, if present. Quotes hold at most one line per
    /// kind except fees and discounts.
    pub fn line(&self, kind: LineItemKind) -> Option<&PricingLineItem> {
        self.lines.iter().find(|line| line.kind == kind)
    }
}
