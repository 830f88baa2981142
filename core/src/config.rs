//! Generator configuration.
//!
//! Every field has a default reproducing the stock dashboard dataset,
//! so a config file only needs to name what it changes.

use crate::{
    error::{DashError, DashResult},
    types::{Category, Channel, Day, Region, Segment},
};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_NUM_CUSTOMERS: usize = 2500;

/// Sales rep labels are two digits wide.
pub const MAX_SALES_REPS: u64 = 99;
pub const MAX_ROWS_PER_DAY: u64 = 10_000;
pub const MAX_DIVISOR: u64 = 1_000_000;
pub const MAX_DATE_WINDOW_DAYS: u64 = 36_500;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub start_date: Day,
    pub end_date: Day,
    pub num_customers: usize,
    pub products: Vec<String>,
    pub sales: SalesShape,
    pub customers: CustomerShape,
}

/// Daily volume shaping and categorical mix for the sales table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesShape {
    pub base_sales: f64,
    pub seasonal_amplitude: f64,
    pub seasonal_period_days: f64,
    /// Linear trend grows from 0 on the first day to this on the last.
    pub trend_total: f64,
    pub noise_std: f64,
    pub min_daily_sales: f64,
    /// Rows per day are drawn from [min, max).
    pub rows_per_day: (u64, u64),
    /// Each row's amount is the day's volume divided by a draw from [min, max).
    pub divisor_range: (u64, u64),
    pub sales_reps: u64,
    pub region_weights: Vec<(Region, f64)>,
    pub category_weights: Vec<(Category, f64)>,
    pub segment_weights: Vec<(Segment, f64)>,
    pub channel_weights: Vec<(Channel, f64)>,
}

impl Default for SalesShape {
    fn default() -> Self {
        Self {
            base_sales: 10_000.0,
            seasonal_amplitude: 3_000.0,
            seasonal_period_days: 365.0,
            trend_total: 2_000.0,
            noise_std: 1_500.0,
            min_daily_sales: 1_000.0,
            rows_per_day: (5, 15),
            divisor_range: (5, 15),
            sales_reps: 20,
            region_weights: vec![
                (Region::North, 0.30),
                (Region::South, 0.25),
                (Region::East, 0.25),
                (Region::West, 0.20),
            ],
            category_weights: vec![
                (Category::Electronics, 0.30),
                (Category::Clothing, 0.25),
                (Category::HomeAndGarden, 0.20),
                (Category::Sports, 0.15),
                (Category::Books, 0.10),
            ],
            segment_weights: default_segment_weights(),
            channel_weights: vec![
                (Channel::Online, 0.50),
                (Channel::Retail, 0.35),
                (Channel::Partner, 0.15),
            ],
        }
    }
}

/// Customer population shaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerShape {
    pub age_mean: f64,
    pub age_std: f64,
    pub min_age: u32,
    pub satisfaction_std: f64,
    /// Join and last-purchase dates fall in [start_date, start_date + window).
    pub date_window_days: u64,
    pub segment_weights: Vec<(Segment, f64)>,
    #[serde(deserialize_with = "premium_profile")]
    pub premium: SegmentProfile,
    #[serde(deserialize_with = "standard_profile")]
    pub standard: SegmentProfile,
    #[serde(deserialize_with = "budget_profile")]
    pub budget: SegmentProfile,
}

/// Purchase and satisfaction parameters for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentProfile {
    pub purchases_mean: f64,
    pub purchases_floor: f64,
    pub satisfaction_base: f64,
}

impl SegmentProfile {
    pub const PREMIUM: Self = Self { purchases_mean: 8.0, purchases_floor: 5.0, satisfaction_base: 7.5 };
    pub const STANDARD: Self = Self { purchases_mean: 4.0, purchases_floor: 2.0, satisfaction_base: 6.5 };
    pub const BUDGET: Self = Self { purchases_mean: 2.0, purchases_floor: 1.0, satisfaction_base: 5.5 };
}

/// A segment profile as written in a config file: omitted fields keep
/// that segment's stock value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverride {
    purchases_mean: Option<f64>,
    purchases_floor: Option<f64>,
    satisfaction_base: Option<f64>,
}

impl ProfileOverride {
    fn over(self, base: SegmentProfile) -> SegmentProfile {
        SegmentProfile {
            purchases_mean: self.purchases_mean.unwrap_or(base.purchases_mean),
            purchases_floor: self.purchases_floor.unwrap_or(base.purchases_floor),
            satisfaction_base: self.satisfaction_base.unwrap_or(base.satisfaction_base),
        }
    }
}

fn premium_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SegmentProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.over(SegmentProfile::PREMIUM))
}

fn standard_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SegmentProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.over(SegmentProfile::STANDARD))
}

fn budget_profile<'de, D: Deserializer<'de>>(d: D) -> Result<SegmentProfile, D::Error> {
    Ok(ProfileOverride::deserialize(d)?.over(SegmentProfile::BUDGET))
}

impl CustomerShape {
    pub fn profile(&self, segment: Segment) -> &SegmentProfile {
        match segment {
            Segment::Premium => &self.premium,
            Segment::Standard => &self.standard,
            Segment::Budget => &self.budget,
        }
    }
}

impl Default for CustomerShape {
    fn default() -> Self {
        Self {
            age_mean: 40.0,
            age_std: 15.0,
            min_age: 18,
            satisfaction_std: 1.5,
            date_window_days: 730,
            segment_weights: default_segment_weights(),
            premium: SegmentProfile::PREMIUM,
            standard: SegmentProfile::STANDARD,
            budget: SegmentProfile::BUDGET,
        }
    }
}

fn default_segment_weights() -> Vec<(Segment, f64)> {
    vec![
        (Segment::Premium, 0.25),
        (Segment::Standard, 0.50),
        (Segment::Budget, 0.25),
    ]
}

/// The stock product vocabulary.
pub const DEFAULT_PRODUCTS: [&str; 20] = [
    "Smartphone Pro", "Laptop Ultra", "Wireless Headphones", "Smart Watch",
    "Gaming Console", "Tablet Plus", "Camera DSLR", "Bluetooth Speaker",
    "Designer Jacket", "Running Shoes", "Casual Shirt", "Jeans Premium",
    "Garden Tools Set", "Kitchen Mixer", "Outdoor Furniture", "LED TV",
    "Fitness Tracker", "Desk Organizer", "Travel Backpack", "Coffee Maker",
];

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start_date: ymd(2023, 1, 1),
            end_date: ymd(2024, 12, 31),
            num_customers: DEFAULT_NUM_CUSTOMERS,
            products: DEFAULT_PRODUCTS.iter().map(|p| p.to_string()).collect(),
            sales: SalesShape::default(),
            customers: CustomerShape::default(),
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.start_date > self.end_date {
            return Err(DashError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.products.is_empty() {
            return Err(invalid("product list is empty"));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.products.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(invalid(&format!("duplicate product name '{dup}'")));
        }

        let s = &self.sales;
        if s.rows_per_day.0 == 0 || s.rows_per_day.0 >= s.rows_per_day.1 {
            return Err(invalid("rows_per_day must be a non-empty range starting above 0"));
        }
        if s.rows_per_day.1 > MAX_ROWS_PER_DAY {
            return Err(invalid(&format!("rows_per_day may not exceed {MAX_ROWS_PER_DAY}")));
        }
        if s.divisor_range.0 == 0 || s.divisor_range.0 >= s.divisor_range.1 {
            return Err(invalid("divisor_range must be a non-empty range starting above 0"));
        }
        if s.divisor_range.1 > MAX_DIVISOR {
            return Err(invalid(&format!("divisor_range may not exceed {MAX_DIVISOR}")));
        }
        if s.min_daily_sales <= 0.0 {
            return Err(invalid("min_daily_sales must be positive"));
        }
        if s.sales_reps == 0 || s.sales_reps > MAX_SALES_REPS {
            return Err(invalid(&format!("sales_reps must be in 1..={MAX_SALES_REPS}")));
        }
        check_weights("region_weights", &s.region_weights)?;
        check_weights("category_weights", &s.category_weights)?;
        check_weights("segment_weights", &s.segment_weights)?;
        check_weights("channel_weights", &s.channel_weights)?;
        if s.category_weights.iter().any(|(c, _)| *c == Category::Other) {
            return Err(invalid("sales cannot be booked under category Other"));
        }

        let c = &self.customers;
        check_weights("customers.segment_weights", &c.segment_weights)?;
        if c.date_window_days == 0 || c.date_window_days > MAX_DATE_WINDOW_DAYS {
            return Err(invalid(&format!(
                "customers.date_window_days must be in 1..={MAX_DATE_WINDOW_DAYS}"
            )));
        }
        Ok(())
    }
}

fn check_weights<T>(name: &str, weights: &[(T, f64)]) -> DashResult<()> {
    if weights.is_empty() {
        return Err(invalid(&format!("{name} is empty")));
    }
    if weights.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) {
        return Err(invalid(&format!("{name} has a negative or non-finite weight")));
    }
    if weights.iter().map(|(_, w)| w).sum::<f64>() <= 0.0 {
        return Err(invalid(&format!("{name} sums to zero")));
    }
    Ok(())
}

fn invalid(reason: &str) -> DashError {
    DashError::InvalidConfig { reason: reason.to_string() }
}

fn ymd(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd_opt(y, m, d).expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GeneratorConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: GeneratorConfig =
            serde_json::from_str(r#"{"seed": 7, "num_customers": 10}"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.num_customers, 10);
        assert_eq!(cfg.products.len(), 20);
        assert_eq!(cfg.sales.rows_per_day, (5, 15));
        cfg.validate().unwrap();
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let cfg = GeneratorConfig {
            start_date: ymd(2024, 1, 2),
            end_date: ymd(2024, 1, 1),
            ..GeneratorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DashError::InvalidDateRange { .. })));
    }

    #[test]
    fn partial_segment_override_keeps_stock_fields() {
        let cfg: GeneratorConfig =
            serde_json::from_str(r#"{"customers":{"premium":{"purchases_mean":9.0}}}"#).unwrap();
        assert_eq!(cfg.customers.premium.purchases_mean, 9.0);
        assert_eq!(cfg.customers.premium.purchases_floor, 5.0);
        assert_eq!(cfg.customers.premium.satisfaction_base, 7.5);
        assert_eq!(cfg.customers.standard, SegmentProfile::STANDARD);
        assert_eq!(cfg.customers.budget, SegmentProfile::BUDGET);
        assert_eq!(cfg.customers.age_mean, 40.0);
    }

    #[test]
    fn budget_override_uses_budget_stock_values() {
        let cfg: GeneratorConfig =
            serde_json::from_str(r#"{"customers":{"budget":{"satisfaction_base":4.0}}}"#).unwrap();
        assert_eq!(cfg.customers.budget.satisfaction_base, 4.0);
        assert_eq!(cfg.customers.budget.purchases_mean, 2.0);
        assert_eq!(cfg.customers.budget.purchases_floor, 1.0);
    }

    #[test]
    fn oversized_sales_reps_are_rejected() {
        let cfg: GeneratorConfig =
            serde_json::from_str(r#"{"sales":{"sales_reps":18446744073709551615}}"#).unwrap();
        assert!(matches!(cfg.validate(), Err(DashError::InvalidConfig { .. })));
    }

    #[test]
    fn oversized_ranges_are_rejected() {
        let mut cfg = GeneratorConfig::default();
        cfg.sales.rows_per_day = (5, u64::MAX);
        assert!(matches!(cfg.validate(), Err(DashError::InvalidConfig { .. })));

        let mut cfg = GeneratorConfig::default();
        cfg.sales.divisor_range = (5, u64::MAX);
        assert!(matches!(cfg.validate(), Err(DashError::InvalidConfig { .. })));

        let mut cfg = GeneratorConfig::default();
        cfg.customers.date_window_days = u64::MAX;
        assert!(matches!(cfg.validate(), Err(DashError::InvalidConfig { .. })));
    }

    #[test]
    fn load_reads_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.json");
        std::fs::write(&path, r#"{"seed": 99, "end_date": "2023-03-31"}"#).unwrap();
        let cfg = GeneratorConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.end_date, ymd(2023, 3, 31));
        assert_eq!(cfg.start_date, ymd(2023, 1, 1));
    }

    #[test]
    fn load_rejects_invalid_file_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.json");
        std::fs::write(&path, r#"{"products": []}"#).unwrap();
        assert!(GeneratorConfig::load(path.to_str().unwrap()).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(GeneratorConfig::load(path.to_str().unwrap()).is_err());

        let missing = dir.path().join("absent.json");
        assert!(GeneratorConfig::load(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn duplicate_products_are_rejected() {
        let cfg = GeneratorConfig {
            products: vec!["LED TV".into(), "LED TV".into()],
            ..GeneratorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(DashError::InvalidConfig { .. })));
    }
}
