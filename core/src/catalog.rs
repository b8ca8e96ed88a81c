//! Reference data tables: countries, currencies, plans, promotions,
//! payment methods and activation delays.
//!
//! The catalog is read-only once built. `Catalog::builtin()` carries the
//! default tables; `Catalog::load()` reads the same shape from JSON
//! (see `data/catalog.json`).

use crate::{
    error::{GenError, GenResult},
    pricing,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discounts a promotion may carry. Zero is the "no promotion" outcome.
pub const ALLOWED_DISCOUNTS: [f64; 9] = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryConfig {
    pub name: String,
    pub currency: String,
    /// Relative selection weight for first-time users.
    pub weight: f64,
    /// Cost-of-living price multiplier. Absent means 1.0.
    #[serde(default)]
    pub living_standard_multiplier: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub name: String,
    pub duration_months: u32,
    /// Price in the reference currency, before conversion.
    pub base_price: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub code: String,
    pub discount_percent: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodConfig {
    pub name: String,
    pub weight: f64,
    /// Providers accepted for this method, keyed by country name.
    pub providers: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationDelay {
    pub days: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub countries: Vec<CountryConfig>,
    /// Reference-currency units per one unit of the keyed currency.
    /// Local price = reference price / rate.
    pub conversion_rates: HashMap<String, f64>,
    pub plans: Vec<PlanConfig>,
    pub promotions: Vec<PromotionConfig>,
    pub no_promotion_weight: f64,
    pub payment_methods: Vec<PaymentMethodConfig>,
    pub activation_delays: Vec<ActivationDelay>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(catalog)
    }

    pub fn countries(&self) -> &[CountryConfig] {
        &self.countries
    }

    pub fn plans(&self) -> &[PlanConfig] {
        &self.plans
    }

    pub fn promotions(&self) -> &[PromotionConfig] {
        &self.promotions
    }

    pub fn payment_methods(&self) -> &[PaymentMethodConfig] {
        &self.payment_methods
    }

    pub fn activation_delays(&self) -> &[ActivationDelay] {
        &self.activation_delays
    }

    pub fn country(&self, name: &str) -> GenResult<&CountryConfig> {
        self.countries
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| GenError::missing("countries", name))
    }

    pub fn currency_of(&self, country: &str) -> GenResult<&str> {
        Ok(self.country(country)?.currency.as_str())
    }

    pub fn plan(&self, name: &str) -> GenResult<&PlanConfig> {
        self.plans
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| GenError::missing("plans", name))
    }

    pub fn plan_base_price(&self, name: &str) -> GenResult<f64> {
        Ok(self.plan(name)?.base_price)
    }

    pub fn conversion_rate(&self, currency: &str) -> GenResult<f64> {
        self.conversion_rates
            .get(currency)
            .copied()
            .ok_or_else(|| GenError::missing("conversion_rates", currency))
    }

    pub fn providers_for(&self, method: &str, country: &str) -> GenResult<&[String]> {
        let method_cfg = self
            .payment_methods
            .iter()
            .find(|m| m.name == method)
            .ok_or_else(|| GenError::missing("payment_methods", method))?;
        match method_cfg.providers.get(country) {
            Some(list) if !list.is_empty() => Ok(list.as_slice()),
            _ => Err(GenError::missing(
                "payment_providers",
                format!("{method}/{country}"),
            )),
        }
    }

    /// Cost-of-living multiplier; unknown countries and countries without
    /// a configured value price at 1.0.
    pub fn living_standard_multiplier(&self, country: &str) -> f64 {
        self.countries
            .iter()
            .find(|c| c.name == country)
            .and_then(|c| c.living_standard_multiplier)
            .unwrap_or(1.0)
    }

    /// Check every combination the synthesizer can reach. Run once at
    /// startup, before any record is drawn.
    pub fn validate(&self) -> GenResult<()> {
        check_weights("countries", self.countries.iter().map(|c| c.weight))?;
        check_weights("plans", self.plans.iter().map(|p| p.weight))?;
        check_weights(
            "promotions",
            self.promotions
                .iter()
                .map(|p| p.weight)
                .chain(std::iter::once(self.no_promotion_weight)),
        )?;
        check_weights(
            "payment_methods",
            self.payment_methods.iter().map(|m| m.weight),
        )?;
        check_weights(
            "activation_delays",
            self.activation_delays.iter().map(|d| d.weight),
        )?;

        for country in &self.countries {
            let rate = self.conversion_rate(&country.currency)?;
            if !(rate > 0.0) {
                return Err(GenError::InvalidConfig(format!(
                    "conversion rate for {} must be positive, got {rate}",
                    country.currency
                )));
            }
            if let Some(m) = country.living_standard_multiplier {
                if !(m > 0.0) {
                    return Err(GenError::InvalidConfig(format!(
                        "living standard multiplier for {} must be positive, got {m}",
                        country.name
                    )));
                }
            }
            for method in &self.payment_methods {
                self.providers_for(&method.name, &country.name)?;
            }
        }

        for plan in &self.plans {
            if plan.duration_months == 0 || !(plan.base_price > 0.0) {
                return Err(GenError::InvalidConfig(format!(
                    "plan {} needs a positive duration and price",
                    plan.name
                )));
            }
            for country in &self.countries {
                let base = pricing::base_price(
                    plan.base_price,
                    self.conversion_rate(&country.currency)?,
                    self.living_standard_multiplier(&country.name),
                );
                if base <= 0.0 {
                    return Err(GenError::InvalidConfig(format!(
                        "plan {} rounds to a zero price in {}",
                        plan.name, country.name
                    )));
                }
            }
        }

        for promo in &self.promotions {
            if promo.discount_percent == 0.0
                || !ALLOWED_DISCOUNTS.contains(&promo.discount_percent)
            {
                return Err(GenError::InvalidConfig(format!(
                    "promotion {} has unsupported discount {}%",
                    promo.code, promo.discount_percent
                )));
            }
        }

        Ok(())
    }

    /// The default reference tables.
    pub fn builtin() -> Self {
        let countries = [
            ("Egypt", "EGP", 0.25, 1.0),
            ("Saudi Arabia", "SAR", 0.20, 2.2),
            ("United Arab Emirates", "AED", 0.15, 3.27),
            ("United States", "USD", 0.10, 3.54),
            ("United Kingdom", "GBP", 0.10, 2.8),
            ("Spain", "EUR", 0.08, 2.5),
            ("Germany", "EUR", 0.07, 3.0),
            ("France", "EUR", 0.05, 2.9),
        ]
        .into_iter()
        .map(|(name, currency, weight, multiplier)| CountryConfig {
            name: name.into(),
            currency: currency.into(),
            weight,
            living_standard_multiplier: Some(multiplier),
        })
        .collect();

        let conversion_rates = [
            ("EGP", 1.0),
            ("USD", 47.15),
            ("SAR", 12.84),
            ("AED", 13.10),
            ("GBP", 65.57),
            ("EUR", 56.58),
        ]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect();

        let plans = [
            ("Monthly", 1, 1200.0, 0.5),
            ("Quarterly", 3, 3000.0, 0.25),
            ("Biannual", 6, 5400.0, 0.15),
            ("Annual", 12, 10500.0, 0.1),
        ]
        .into_iter()
        .map(|(name, duration_months, base_price, weight)| PlanConfig {
            name: name.into(),
            duration_months,
            base_price,
            weight,
        })
        .collect();

        let promotions = [
            (5.0, 0.2),
            (10.0, 0.2),
            (15.0, 0.15),
            (20.0, 0.05),
            (25.0, 0.05),
            (30.0, 0.03),
            (40.0, 0.04),
            (50.0, 0.03),
        ]
        .into_iter()
        .map(|(discount_percent, weight)| PromotionConfig {
            code: format!("DISCOUNT{discount_percent}"),
            discount_percent,
            weight,
        })
        .collect();

        let payment_methods = vec![
            method(
                "online_card",
                &[
                    ("Egypt", &["paypal", "visa", "mastercard", "Meeza"]),
                    ("Saudi Arabia", &["paypal", "visa", "mastercard", "stripe"]),
                    ("United Arab Emirates", &["paypal", "visa", "mastercard"]),
                    ("United States", &["paypal", "visa", "mastercard", "stripe"]),
                    ("United Kingdom", &["paypal", "visa", "mastercard"]),
                    ("Spain", &["paypal", "visa", "mastercard"]),
                    ("Germany", &["paypal", "visa", "mastercard"]),
                    ("France", &["paypal", "visa", "mastercard"]),
                ],
            ),
            method(
                "bank_transfer",
                &[
                    ("Egypt", &["kashier", "local_gateway"]),
                    ("Saudi Arabia", &["local_gateway", "SWIFT", "ACH"]),
                    ("United Arab Emirates", &["local_gateway", "SWIFT"]),
                    ("United States", &["ACH", "SWIFT", "local_gateway"]),
                    ("United Kingdom", &["ACH", "local_gateway"]),
                    ("Spain", &["SWIFT", "local_gateway"]),
                    ("Germany", &["SWIFT", "local_gateway"]),
                    ("France", &["SWIFT", "local_gateway"]),
                ],
            ),
            method(
                "digital_wallet",
                &[
                    ("Egypt", &["vodafone_cash", "etisalat_cash", "paypal"]),
                    ("Saudi Arabia", &["paypal", "apple_pay", "google_pay"]),
                    ("United Arab Emirates", &["apple_pay", "google_pay", "paypal"]),
                    ("United States", &["apple_pay", "google_pay", "paypal", "venmo"]),
                    ("United Kingdom", &["apple_pay", "google_pay", "paypal"]),
                    ("Spain", &["apple_pay", "google_pay", "paypal"]),
                    ("Germany", &["apple_pay", "google_pay", "paypal"]),
                    ("France", &["apple_pay", "google_pay", "paypal"]),
                ],
            ),
            method(
                "buy_now_pay_later",
                &[
                    ("Egypt", &["Value", "souhoola"]),
                    ("Saudi Arabia", &["Value", "Tamara", "Tabby"]),
                    ("United Arab Emirates", &["Value", "Tamara", "Tabby"]),
                    ("United States", &["Affirm", "Afterpay", "Klarna"]),
                    ("United Kingdom", &["Klarna", "Clearpay"]),
                    ("Spain", &["Klarna", "Afterpay"]),
                    ("Germany", &["Klarna"]),
                    ("France", &["Klarna", "Afterpay"]),
                ],
            ),
        ];

        let activation_delays = [
            (0, 30.0),
            (1, 20.0),
            (2, 15.0),
            (3, 10.0),
            (4, 8.0),
            (5, 5.0),
            (7, 4.0),
            (10, 4.0),
            (14, 4.0),
        ]
        .into_iter()
        .map(|(days, weight)| ActivationDelay { days, weight })
        .collect();

        Self {
            countries,
            conversion_rates,
            plans,
            promotions,
            no_promotion_weight: 0.25,
            payment_methods,
            activation_delays,
        }
    }
}

fn method(name: &str, providers: &[(&str, &[&str])]) -> PaymentMethodConfig {
    PaymentMethodConfig {
        name: name.into(),
        weight: 0.25,
        providers: providers
            .iter()
            .map(|(country, list)| {
                (
                    country.to_string(),
                    list.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect(),
    }
}

fn check_weights<I>(table: &'static str, weights: I) -> GenResult<()>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0.0;
    for w in weights {
        if !(w >= 0.0) || !w.is_finite() {
            return Err(GenError::InvalidConfig(format!(
                "{table} contains an invalid weight: {w}"
            )));
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(GenError::InvalidConfig(format!(
            "{table} needs at least one positive weight"
        )));
    }
    Ok(())
}
