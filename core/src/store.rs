//! CSV persistence layer.
//!
//! RULE: Only store.rs touches the data directory.
//! The loader and runner call store methods; they never open files directly.

use crate::{
    error::DashResult,
    record::{CustomerRecord, Dataset, SaleRecord},
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

pub const SALES_FILE: &str = "sales_data.csv";
pub const CUSTOMERS_FILE: &str = "customer_data.csv";
pub const PRODUCTS_FILE: &str = "product_data.csv";

pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    /// Point the store at `dir`. Nothing is read or created yet.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sales_path(&self) -> PathBuf {
        self.dir.join(SALES_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.dir.join(CUSTOMERS_FILE)
    }

    pub fn products_path(&self) -> PathBuf {
        self.dir.join(PRODUCTS_FILE)
    }

    /// Names of the table files not present on disk.
    pub fn missing_files(&self) -> Vec<&'static str> {
        [SALES_FILE, CUSTOMERS_FILE, PRODUCTS_FILE]
            .into_iter()
            .filter(|name| !self.dir.join(name).is_file())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_files().is_empty()
    }

    // ── Read ───────────────────────────────────────────────────

    pub fn read_dataset(&self) -> DashResult<Dataset> {
        Ok(Dataset {
            sales: read_table(&self.sales_path())?,
            customers: read_table(&self.customers_path())?,
            products: read_table(&self.products_path())?,
        })
    }

    pub fn read_sales(&self) -> DashResult<Vec<SaleRecord>> {
        read_table(&self.sales_path())
    }

    pub fn read_customers(&self) -> DashResult<Vec<CustomerRecord>> {
        read_table(&self.customers_path())
    }

    // ── Write ──────────────────────────────────────────────────

    /// Write all three tables, creating the directory if needed.
    /// Existing files are replaced.
    pub fn write_dataset(&self, dataset: &Dataset) -> DashResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        write_table(&self.sales_path(), &dataset.sales)?;
        write_table(&self.customers_path(), &dataset.customers)?;
        write_table(&self.products_path(), &dataset.products)?;
        log::info!("wrote tables to {}", self.dir.display());
        Ok(())
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> DashResult<Vec<T>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> DashResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Channel, Day, Region, Segment};

    #[test]
    fn empty_dir_reports_every_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path());
        assert_eq!(store.missing_files(), vec![SALES_FILE, CUSTOMERS_FILE, PRODUCTS_FILE]);
        assert!(!store.is_complete());
    }

    #[test]
    fn reading_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path());
        assert!(store.read_sales().is_err());
    }

    #[test]
    fn header_row_uses_dashboard_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path());
        let sale = SaleRecord {
            date: Day::from_ymd_opt(2023, 1, 1).unwrap(),
            amount: 123.5,
            region: Region::West,
            category: Category::HomeAndGarden,
            segment: Segment::Budget,
            sales_rep: "Rep_03".into(),
            channel: Channel::Partner,
        };
        store
            .write_dataset(&Dataset { sales: vec![sale], ..Dataset::default() })
            .unwrap();
        let text = std::fs::read_to_string(store.sales_path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Sales,Region,Product_Category,Customer_Segment,Sales_Rep,Channel"
        );
        assert_eq!(lines.next().unwrap(), "2023-01-01,123.5,West,Home & Garden,Budget,Rep_03,Partner");
    }
}
