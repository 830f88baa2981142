//! Read-if-present, else generate-and-write.

use crate::{
    config::GeneratorConfig,
    error::DashResult,
    generator::DataGenerator,
    record::Dataset,
    store::DataStore,
};

/// How the dataset in hand was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Generated,
}

/// Load the three tables from `store`. If any file is missing, generate
/// a fresh dataset from `config`, write it, and return it.
pub fn load_or_generate(
    store: &DataStore,
    config: &GeneratorConfig,
) -> DashResult<(Dataset, LoadOutcome)> {
    let missing = store.missing_files();
    if missing.is_empty() {
        let dataset = store.read_dataset()?;
        log::info!(
            "loaded existing data from {}: sales={} customers={} products={}",
            store.dir().display(),
            dataset.sales.len(),
            dataset.customers.len(),
            dataset.products.len()
        );
        return Ok((dataset, LoadOutcome::Loaded));
    }

    log::info!("missing {}; generating sample data", missing.join(", "));
    let dataset = regenerate(store, config)?;
    Ok((dataset, LoadOutcome::Generated))
}

/// Generate from `config` and overwrite whatever the store holds.
pub fn regenerate(store: &DataStore, config: &GeneratorConfig) -> DashResult<Dataset> {
    let dataset = DataGenerator::new(config.clone())?.generate()?;
    store.write_dataset(&dataset)?;
    Ok(dataset)
}
