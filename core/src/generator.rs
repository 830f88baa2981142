//! The generation driver.
//!
//! GENERATION ORDER (fixed, documented, never reordered):
//!   1. Sales table
//!   2. Customer table
//!   3. Product table
//!
//! RULES:
//!   - Each table generator draws only from its own RNG stream.
//!   - No generator reads another generator's output.
//!   - Same config (seed included) => identical Dataset.

use crate::{
    aggregate,
    config::GeneratorConfig,
    customer_generator::CustomerGenerator,
    error::DashResult,
    product_generator::ProductGenerator,
    record::Dataset,
    rng::{RngBank, StreamRng, TableSlot},
    sales_generator::SalesGenerator,
};

/// The contract every table generator fulfills.
pub trait TableGenerator {
    type Row;

    /// Unique stable name for this table.
    fn name(&self) -> &'static str;

    /// The RNG stream this table draws from.
    fn slot(&self) -> TableSlot;

    /// Produce every row of the table from `rng`.
    fn generate(&self, rng: &mut StreamRng) -> Vec<Self::Row>;
}

pub struct DataGenerator {
    config: GeneratorConfig,
    rng_bank: RngBank,
}

impl DataGenerator {
    /// Validates the config up front so table generators can assume
    /// non-empty ranges and weight tables.
    pub fn new(config: GeneratorConfig) -> DashResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank: RngBank::new(config.seed),
            config,
        })
    }

    /// Build all three tables.
    pub fn generate(&self) -> DashResult<Dataset> {
        let sales = self.run(&SalesGenerator::new(&self.config)?);
        let customers = self.run(&CustomerGenerator::new(&self.config));
        let products = self.run(&ProductGenerator::new(&self.config));

        let dataset = Dataset { sales, customers, products };
        log::info!(
            "generated seed={} sales={} customers={} products={} revenue=${:.2}",
            self.config.seed,
            dataset.sales.len(),
            dataset.customers.len(),
            dataset.products.len(),
            aggregate::total_revenue(&dataset.sales)
        );
        Ok(dataset)
    }

    fn run<G: TableGenerator>(&self, table: &G) -> Vec<G::Row> {
        let mut rng = self.rng_bank.for_table(table.slot());
        let rows = table.generate(&mut rng);
        log::debug!("{}: {} rows from stream '{}'", table.name(), rows.len(), rng.name);
        rows
    }
}
