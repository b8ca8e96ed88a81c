//! The generator driver.
//!
//! RUN ORDER (fixed):
//!   1. Validate run config and catalog (fail before any draw).
//!   2. Seed the GenRng.
//!   3. Draw the identity pool.
//!   4. Synthesize `record_count` rows, one after another.
//!   5. Write the CSV file.
//!
//! RULES:
//!   - All randomness flows through the one GenRng.
//!   - The country binding map lives in the synthesizer, not globally.
//!   - Nothing is written unless every row was generated.

use crate::{
    catalog::Catalog,
    config::GeneratorConfig,
    error::GenResult,
    identity::IdentityPool,
    record::SubscriptionRecord,
    rng::GenRng,
    sink,
    summary::RunSummary,
    synthesizer::RecordSynthesizer,
};
use log::{debug, info};

const PROGRESS_INTERVAL: usize = 10_000;

pub struct Generator {
    config: GeneratorConfig,
    rng: GenRng,
    pool: IdentityPool,
    synthesizer: RecordSynthesizer,
}

impl Generator {
    pub fn new(config: GeneratorConfig, catalog: Catalog) -> GenResult<Self> {
        config.validate()?;
        catalog.validate()?;

        let mut rng = GenRng::new(config.random_seed);
        let pool = IdentityPool::generate(config.user_pool_size, &mut rng)?;
        let synthesizer = RecordSynthesizer::new(catalog, config.window_start, config.window_end);

        Ok(Self {
            config,
            rng,
            pool,
            synthesizer,
        })
    }

    /// Generator over the builtin catalog.
    pub fn with_builtin_catalog(config: GeneratorConfig) -> GenResult<Self> {
        Self::new(config, Catalog::builtin())
    }

    /// Produce every row in memory.
    pub fn generate(&mut self) -> GenResult<Vec<SubscriptionRecord>> {
        let n = self.config.record_count;
        info!(
            "generating {n} records from {} users (seed {})",
            self.pool.len(),
            self.rng.seed()
        );

        let mut records = Vec::with_capacity(n);
        for i in 0..n {
            records.push(self.synthesizer.synthesize(&self.pool, &mut self.rng)?);
            if (i + 1) % PROGRESS_INTERVAL == 0 {
                debug!("generated {} of {n} records", i + 1);
            }
        }
        debug!(
            "{} of {} users bound to a country",
            self.synthesizer.bindings().len(),
            self.pool.len()
        );
        Ok(records)
    }

    /// Generate every row, write the output file, and summarise the run.
    pub fn run(&mut self) -> GenResult<RunSummary> {
        let records = self.generate()?;
        let metrics = sink::write_records(&self.config.output_path, &records)?;
        Ok(RunSummary::from_records(self.config.random_seed, &records).with_sink(metrics))
    }
}
