//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access and no I/O. The
//! quote engine in [`crate::engine`] composes these into full line items.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::models::{AreaUnit, RoundingRule, TravelParams};

/// Square feet per square meter, fixed for all conversions.
pub const SQFT_PER_SQM: Decimal = dec!(10.7639);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use pestops_pricing::calculators::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Convert an area between units.
///
/// Only square units interconvert; linear footage and count-based quantities
/// pass through unchanged.
pub fn convert_area(area: Decimal, from: AreaUnit, to: AreaUnit) -> Decimal {
    match (from, to) {
        (AreaUnit::SquareMeters, AreaUnit::SquareFeet) => area * SQFT_PER_SQM,
        (AreaUnit::SquareFeet, AreaUnit::SquareMeters) => area / SQFT_PER_SQM,
        _ => area,
    }
}

/// Multiplier inflating material usage to account for application waste.
///
/// `waste_percent` must be in `[0, 1)`; the engine validates this before
/// calling.
pub fn waste_factor(waste_percent: Decimal) -> Decimal {
    Decimal::ONE / (Decimal::ONE - waste_percent)
}

/// Apply a subtotal rounding rule.
///
/// `nearest_1` and `nearest_5` use banker's rounding on the respective grid;
/// `psychological_9` always rounds up (see [`round_up_to_nine`]).
pub fn apply_rounding(amount: Decimal, rule: RoundingRule) -> Decimal {
    match rule {
        RoundingRule::Nearest1 => round_money(amount, 0),
        RoundingRule::Nearest5 => round_money(amount / dec!(5), 0) * dec!(5),
        RoundingRule::Psychological9 => round_up_to_nine(amount),
    }
}

/// Round up to the smallest integer ending in 9 that is at least the amount.
///
/// Integers ending in 9 are fixed points, so applying the rule twice changes
/// nothing. Amounts below 9 (including 0) round up to 9. Callers only pass
/// non-negative amounts.
pub fn round_up_to_nine(amount: Decimal) -> Decimal {
    let ceiled = amount.ceil();
    ceiled + (dec!(9) - ceiled % dec!(10))
}

/// Total labor hours for a job, before any manual adder.
///
/// `per_k` is the normalized area divided by 1000.
pub fn labor_hours(
    setup_hours: Decimal,
    hours_per_1000: Decimal,
    per_k: Decimal,
    infestation_multiplier: Decimal,
    complexity_multiplier: Decimal,
) -> Decimal {
    setup_hours + hours_per_1000 * per_k * infestation_multiplier * complexity_multiplier
}

/// Fully-burdened cost of the given labor hours.
pub fn labor_cost(hours: Decimal, hourly_wage: Decimal, burden_percent: Decimal) -> Decimal {
    hours * hourly_wage * (Decimal::ONE + burden_percent)
}

/// Drive time in minutes. An override replaces the fixed-plus-per-mile
/// formula entirely; the override amount (a charge, not a time) is handled
/// by the engine.
pub fn travel_minutes(travel: &TravelParams) -> Decimal {
    match travel.override_minutes {
        Some(minutes) => minutes,
        None => travel.fixed_minutes + travel.minutes_per_mile * travel.miles,
    }
}
