//! Synthetic subscription dataset generator.
//!
//! Builds rows of fabricated subscription transactions (user, country,
//! plan, pricing, promotion, payment, dates) from reference tables by
//! seeded weighted sampling, and writes them to one CSV file.

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod identity;
pub mod pricing;
pub mod record;
pub mod rng;
pub mod sink;
pub mod summary;
pub mod synthesizer;
pub mod types;
