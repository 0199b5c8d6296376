//! Quote computation: turns a validated [`PricingInput`] into line items and
//! totals.
//!
//! The whole computation is a pure function over its input. Identical input
//! always yields identical output; there is no clock, no randomness, and no
//! I/O, so callers may invoke it concurrently without coordination.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculators::{
    apply_rounding, convert_area, labor_cost, labor_hours, round_money, travel_minutes,
    waste_factor,
};
use crate::error::{PricingError, Result};
use crate::models::{PricingInput, PricingMode, RoundingRule};
use crate::responses::{
    LineItemKind, MaterialUsage, PricingBreakdown, PricingLineItem, PricingResult,
};

const MINUTES_PER_HOUR: Decimal = dec!(60);
const THOUSAND: Decimal = dec!(1000);

/// Price one service on a quote. The audit breakdown is omitted.
pub fn price_quote(input: &PricingInput) -> Result<PricingResult> {
    let mut result = price_quote_detailed(input)?;
    result.breakdown = None;
    Ok(result)
}

/// Price one service on a quote, keeping every intermediate value in
/// [`PricingBreakdown`] for audit and debug surfaces.
pub fn price_quote_detailed(input: &PricingInput) -> Result<PricingResult> {
    validate(input)?;

    let template = &input.template;
    let normalized_area = convert_area(input.area, input.area_unit, template.main_unit);
    let per_k = normalized_area / THOUSAND;

    // Tier resolution: first rule whose band contains the normalized area.
    let tier = input
        .tier_rules
        .iter()
        .find(|rule| rule.contains(input.property_type, normalized_area));
    if let Some(rule) = tier {
        debug!(from_area = %rule.from_area, "tier rule matched");
    }

    // Quote-level minimum wins over the tier override, which wins over the
    // template default. A resolved price-per-1000 adds an area-proportional
    // floor; the larger floor binds.
    let effective_minimum = input
        .minimum
        .or(tier.and_then(|rule| rule.minimum_override))
        .unwrap_or(template.minimum);
    let rate_per_1000 = tier
        .and_then(|rule| rule.price_per_1000_override)
        .or(template.price_per_1000);
    let area_floor = rate_per_1000.map(|rate| rate * per_k);
    let binding_floor = match area_floor {
        Some(floor) if floor > effective_minimum => floor,
        _ => effective_minimum,
    };

    // Labor
    let infestation = input
        .infestation_multiplier
        .unwrap_or(template.infestation_multiplier);
    let complexity = input
        .complexity_multiplier
        .unwrap_or(template.complexity_multiplier);
    let mut hours = labor_hours(
        input.setup_time_hours,
        input.hours_per_1000,
        per_k,
        infestation,
        complexity,
    );
    if let Some(adder) = &input.labor_adder {
        hours += adder.hours;
    }
    let labor = labor_cost(hours, input.hourly_wage, input.labor_burden_percent);

    // Materials: filter by interior/exterior applicability, then sum.
    let mut materials = Vec::new();
    let mut materials_cost = Decimal::ZERO;
    for chem in &input.chemicals {
        if !chem.use_for.applies_to(input.interior, input.exterior) {
            continue;
        }
        let quantity = chem.rate_per_1000 * per_k * waste_factor(chem.waste_percent);
        let packages = quantity / chem.package_size;
        let cost = packages * chem.package_cost;
        materials_cost += cost;
        materials.push(MaterialUsage {
            product_id: chem.product_id,
            name: chem.name.clone(),
            quantity,
            unit: chem.package_unit.clone(),
            packages,
            cost,
        });
    }

    // Travel: an override amount replaces the time-based charge outright.
    let minutes = travel_minutes(&input.travel);
    let (travel_cost, travel_is_override) = match input.travel.override_amount {
        Some(amount) => {
            debug!(%amount, "travel charge overridden");
            (amount, true)
        }
        None => (
            minutes / MINUTES_PER_HOUR * input.hourly_wage,
            input.travel.override_minutes.is_some(),
        ),
    };

    let pre_markup = materials_cost + labor + travel_cost;

    let price = match input.pricing_mode {
        PricingMode::Margin => pre_markup / (Decimal::ONE - input.margin_or_markup),
        PricingMode::Markup => pre_markup * (Decimal::ONE + input.margin_or_markup),
    };
    // Customer-facing component lines carry the same factor so they sum to
    // the marked-up price, not to raw cost.
    let factor = match input.pricing_mode {
        PricingMode::Margin => Decimal::ONE / (Decimal::ONE - input.margin_or_markup),
        PricingMode::Markup => Decimal::ONE + input.margin_or_markup,
    };

    let mut lines: Vec<PricingLineItem> = Vec::new();

    if materials_cost > Decimal::ZERO {
        lines.push(PricingLineItem::flat(
            LineItemKind::Materials,
            "Materials",
            round_money(materials_cost * factor, 2),
        ));
    }

    let loaded_rate = input.hourly_wage * (Decimal::ONE + input.labor_burden_percent);
    lines.push(PricingLineItem {
        kind: LineItemKind::Labor,
        label: "Labor".to_string(),
        qty: Some(round_money(hours, 2)),
        unit: Some("hr".to_string()),
        unit_cost: Some(round_money(loaded_rate * factor, 2)),
        amount: round_money(labor * factor, 2),
        is_override: input.labor_adder.is_some(),
        override_reason: input.labor_adder.as_ref().and_then(|a| a.reason.clone()),
    });

    if travel_cost > Decimal::ZERO {
        let time_based = input.travel.override_amount.is_none();
        lines.push(PricingLineItem {
            kind: LineItemKind::Travel,
            label: "Travel".to_string(),
            qty: time_based.then(|| round_money(minutes, 2)),
            unit: time_based.then(|| "min".to_string()),
            unit_cost: None,
            amount: round_money(travel_cost * factor, 2),
            is_override: travel_is_override,
            override_reason: if travel_is_override {
                input.travel.override_reason.clone()
            } else {
                None
            },
        });
    }

    let mut running = price;
    for fee in &input.fees {
        running += fee.amount;
        lines.push(PricingLineItem::flat(
            LineItemKind::Fee,
            fee.label.clone(),
            round_money(fee.amount, 2),
        ));
    }
    for discount in &input.discounts {
        running -= discount.amount;
        lines.push(PricingLineItem::flat(
            LineItemKind::Discount,
            discount.label.clone(),
            -round_money(discount.amount, 2),
        ));
    }

    let floor_applied = running < binding_floor;
    if floor_applied {
        debug!(floor = %binding_floor, "minimum price floor applied");
        lines.push(PricingLineItem::flat(
            LineItemKind::Other,
            "Minimum price adjustment",
            round_money(binding_floor - running, 2),
        ));
        running = binding_floor;
    }

    let pre_rounding_subtotal = running;
    let mut subtotal = apply_rounding(running, input.rounding);
    // Grid rounding may land below the floor; one increment restores it.
    if subtotal < binding_floor {
        subtotal += match input.rounding {
            RoundingRule::Nearest1 => Decimal::ONE,
            RoundingRule::Nearest5 => dec!(5),
            RoundingRule::Psychological9 => Decimal::ZERO, // never rounds down
        };
    }
    let subtotal = round_money(subtotal, 2);

    let tax = round_money(subtotal * input.tax_rate, 2);
    lines.push(PricingLineItem::flat(LineItemKind::Tax, "Sales tax", tax));

    let total = round_money(subtotal + tax, 2);

    Ok(PricingResult {
        lines,
        subtotal,
        tax,
        total,
        currency: input.currency.clone(),
        breakdown: Some(PricingBreakdown {
            normalized_area,
            normalized_unit: template.main_unit,
            tier_rule_id: tier.and_then(|rule| rule.id),
            effective_minimum,
            area_floor,
            labor_hours: hours,
            labor_cost: labor,
            materials_cost,
            materials,
            travel_minutes: minutes,
            travel_cost,
            pre_markup,
            marked_up_price: price,
            floor_applied,
            pre_rounding_subtotal,
            rounding: input.rounding,
        }),
    })
}

/// Guard the handful of values that would poison the arithmetic. Everything
/// else is the boundary schema's job.
fn validate(input: &PricingInput) -> Result<()> {
    if input.area <= Decimal::ZERO {
        return Err(PricingError::NonPositiveArea(input.area));
    }
    if input.margin_or_markup < Decimal::ZERO {
        return Err(PricingError::NegativeRate(input.margin_or_markup));
    }
    if input.pricing_mode == PricingMode::Margin && input.margin_or_markup >= Decimal::ONE {
        return Err(PricingError::MarginTooHigh(input.margin_or_markup));
    }
    for chem in &input.chemicals {
        if chem.package_size <= Decimal::ZERO {
            return Err(PricingError::NonPositivePackageSize {
                name: chem.name.clone(),
                size: chem.package_size,
            });
        }
        if chem.waste_percent < Decimal::ZERO || chem.waste_percent >= Decimal::ONE {
            return Err(PricingError::WasteOutOfRange {
                name: chem.name.clone(),
                waste: chem.waste_percent,
            });
        }
    }
    Ok(())
}
