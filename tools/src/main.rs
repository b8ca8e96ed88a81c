//! subgen: writes a synthetic subscription dataset to CSV.
//!
//! Usage:
//!   subgen --records 50000 --users 40000 --seed 42 --output data.csv
//!   subgen --config run.json --catalog data/catalog.json

use anyhow::Result;
use clap::Parser;
use subgen_core::{
    catalog::Catalog, config::GeneratorConfig, generator::Generator, summary::RunSummary,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON run config; flags below override its values
    #[arg(long)]
    config: Option<String>,

    /// JSON reference catalog (defaults to the builtin tables)
    #[arg(long, env = "SUBGEN_CATALOG")]
    catalog: Option<String>,

    /// Number of rows to generate
    #[arg(long, env = "SUBGEN_RECORDS")]
    records: Option<usize>,

    /// Number of distinct user ids to draw
    #[arg(long, env = "SUBGEN_USERS")]
    users: Option<usize>,

    /// Seed for the random stream
    #[arg(long, env = "SUBGEN_SEED")]
    seed: Option<u64>,

    /// Output CSV path (overwritten)
    #[arg(long, env = "SUBGEN_OUTPUT")]
    output: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(n) = self.records {
            config.record_count = n;
        }
        if let Some(n) = self.users {
            config.user_pool_size = n;
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let catalog = match &cli.catalog {
        Some(path) => {
            log::info!("loading catalog from {path}");
            Catalog::load(path)?
        }
        None => Catalog::builtin(),
    };

    println!("subgen: synthetic subscription data");
    println!("  seed:      {}", config.random_seed);
    println!("  records:   {}", config.record_count);
    println!("  users:     {}", config.user_pool_size);
    println!("  output:    {}", config.output_path);
    println!(
        "  catalog:   {}",
        cli.catalog.as_deref().unwrap_or("(builtin)")
    );
    println!();

    let output_path = config.output_path.clone();
    let mut generator = Generator::new(config, catalog)?;
    let summary = generator.run()?;
    print_summary(&summary, &output_path);
    Ok(())
}

fn print_summary(summary: &RunSummary, output_path: &str) {
    println!("=== RUN SUMMARY ===");
    println!("  rows:           {}", summary.rows);
    println!("  distinct users: {}", summary.distinct_users);
    println!("  renewals:       {}", summary.renewals);
    println!("  promoted rows:  {}", summary.promoted_rows);
    println!("  file size:      {} bytes", summary.file_size_bytes);

    println!();
    println!("=== ROWS BY COUNTRY ===");
    for (country, n) in &summary.rows_by_country {
        println!("  {country:<22} {n}");
    }

    println!();
    println!("=== ROWS BY PLAN ===");
    for (plan, n) in &summary.rows_by_plan {
        println!("  {plan:<22} {n}");
    }

    println!();
    println!("=== PAID BY CURRENCY ===");
    for (currency, total) in &summary.paid_by_currency {
        println!("  {currency:<22} {total:.2}");
    }

    println!();
    println!("Data generated and saved to {output_path}");
}
