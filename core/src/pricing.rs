//! Local pricing: currency conversion, cost-of-living adjustment and
//! promotion discounts.

use crate::{catalog::Catalog, error::GenResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// List price in local currency, whole units.
    pub base_price: f64,
    /// Amount taken off by the promotion.
    pub discounted_amount: f64,
    /// Amount actually charged.
    pub paid_amount: f64,
}

/// Round to `places` decimals, ties to even on the scaled value.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Local list price for a plan in a country's currency, before discount.
pub fn base_price(reference_price: f64, conversion_rate: f64, multiplier: f64) -> f64 {
    let local_price = reference_price / conversion_rate;
    round_to(local_price * multiplier, 0)
}

/// Apply a percentage discount to a base price.
///
/// `discounted_amount` and `paid_amount` are computed independently:
/// one is what the promotion saves, the other what the user pays.
pub fn apply_discount(base_price: f64, discount_percent: f64) -> Pricing {
    let keep = 1.0 - discount_percent / 100.0;
    Pricing {
        base_price,
        discounted_amount: round_to(base_price - base_price * keep, 2),
        paid_amount: round_to(base_price * keep, 2),
    }
}

/// Full price resolution for one (plan, country, discount) draw.
pub fn price(
    catalog: &Catalog,
    plan: &str,
    country: &str,
    discount_percent: f64,
) -> GenResult<Pricing> {
    let currency = catalog.currency_of(country)?;
    let base = base_price(
        catalog.plan_base_price(plan)?,
        catalog.conversion_rate(currency)?,
        catalog.living_standard_multiplier(country),
    );
    Ok(apply_discount(base, discount_percent))
}
