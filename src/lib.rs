//! Pricing engine for the PestOps service platform.
//!
//! Computes a quote's line items (materials, labor, travel, fees, discounts,
//! tax) and totals from a structured input, applying tiered area pricing,
//! unit conversions, margin/markup modes, minimum-price floors, and rounding
//! rules. The main application calls this for quote building, pricing
//! previews, and invoice regeneration.
//!
//! The engine is a pure function over its input: no database access, no
//! clock reads, no randomness. See [`engine::price_quote`].

pub mod calculators;
pub mod engine;
pub mod error;
pub mod models;
pub mod responses;

// Re-export commonly used items
pub use calculators::round_money;
pub use engine::{price_quote, price_quote_detailed};
pub use error::{PricingError, Result};
pub use models::{
    Applicability, AreaUnit, ChemicalUsage, Discount, Fee, LaborAdder, PricingInput, PricingMode,
    PropertyType, RoundingRule, TemplateSnapshot, TierRule, TravelParams,
};
pub use responses::{
    LineItemKind, MaterialUsage, PricingBreakdown, PricingLineItem, PricingResult,
};
