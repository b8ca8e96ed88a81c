//! Record synthesizer: turns one batch of random draws into one
//! subscription row.
//!
//! DRAW ORDER (part of the output contract for a given seed):
//!   1. user id (uniform over the pool)
//!   2. country (weighted; first sighting of the user only)
//!   3. subscription timestamp (day, then second of day)
//!   4. activation delay
//!   5. plan
//!   6. promotion
//!   7. payment method
//!   8. payment provider

use crate::{
    calendar,
    catalog::Catalog,
    error::{GenError, GenResult},
    identity::{CountryBindings, IdentityPool},
    pricing,
    record::SubscriptionRecord,
    rng::GenRng,
};
use chrono::NaiveDateTime;

pub struct RecordSynthesizer {
    catalog: Catalog,
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    bindings: CountryBindings,
}

impl RecordSynthesizer {
    pub fn new(catalog: Catalog, window_start: NaiveDateTime, window_end: NaiveDateTime) -> Self {
        Self {
            catalog,
            window_start,
            window_end,
            bindings: CountryBindings::new(),
        }
    }

    pub fn bindings(&self) -> &CountryBindings {
        &self.bindings
    }

    /// Produce one record.
    pub fn synthesize(
        &mut self,
        pool: &IdentityPool,
        rng: &mut GenRng,
    ) -> GenResult<SubscriptionRecord> {
        let user_id = pool.pick(rng)?.clone();
        let country = self
            .bindings
            .bind_country(&user_id, &self.catalog, rng)?
            .to_string();
        let currency = self.catalog.currency_of(&country)?.to_string();

        let subscription_date = calendar::random_timestamp(rng, self.window_start, self.window_end);

        let delay = weighted(
            rng,
            "activation_delays",
            self.catalog.activation_delays(),
            |d| d.weight,
        )?
        .days;
        let activation_date = calendar::add_days(subscription_date, delay)?;

        let plan = weighted(rng, "plans", self.catalog.plans(), |p| p.weight)?;
        let expiration_date = calendar::expiration(activation_date, plan.duration_months)?;

        // The promotion table gets one extra trailing slot for "none".
        let promotions = self.catalog.promotions();
        let promo_idx = rng
            .weighted_index(
                promotions
                    .iter()
                    .map(|p| p.weight)
                    .chain(std::iter::once(self.catalog.no_promotion_weight)),
            )
            .ok_or_else(|| GenError::InvalidConfig("promotions carry no weight".into()))?;
        let promotion = promotions.get(promo_idx);
        let discount_percentage = promotion.map_or(0.0, |p| p.discount_percent);

        let price = pricing::price(&self.catalog, &plan.name, &country, discount_percentage)?;

        let method = weighted(
            rng,
            "payment_methods",
            self.catalog.payment_methods(),
            |m| m.weight,
        )?;
        let providers = self.catalog.providers_for(&method.name, &country)?;
        let provider = rng
            .pick(providers)
            .ok_or_else(|| GenError::missing("payment_providers", format!("{}/{country}", method.name)))?;

        Ok(SubscriptionRecord {
            user_id,
            subscription_date,
            activation_date,
            expiration_date,
            plan: plan.name.clone(),
            refund_date: None,
            payment_method: method.name.clone(),
            payment_provider: provider.clone(),
            currency,
            paid_amount: price.paid_amount,
            base_price: price.base_price,
            discounted_amount: price.discounted_amount,
            promotion: promotion.map(|p| p.code.clone()),
            discount_percentage,
            country,
        })
    }
}

fn weighted<'a, T>(
    rng: &mut GenRng,
    table: &'static str,
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
) -> GenResult<&'a T> {
    rng.weighted_index(items.iter().map(weight))
        .and_then(|i| items.get(i))
        .ok_or_else(|| GenError::InvalidConfig(format!("{table} carry no weight")))
}
