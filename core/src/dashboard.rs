//! The dashboard view: every panel's data for one filter, in one value.
//!
//! A front end renders a DashboardView; it never touches the tables.
//! Sales panels follow the filter. Customer and product panels, and the
//! header KPIs, always cover the full tables.

use crate::{
    aggregate::{
        self, DailyTotal, FilterOptions, GroupTotal, ProductPoint, RegionStats,
        SatisfactionSpread, Summary,
    },
    error::DashResult,
    filter::DashboardFilter,
    record::{Dataset, ProductRecord},
    types::{Category, Region, Segment},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: DashboardFilter,
    pub summary: Summary,
    pub filtered_revenue: f64,
    pub filtered_transactions: usize,
    pub daily_sales: Vec<DailyTotal>,
    pub region_sales: Vec<GroupTotal<Region>>,
    pub category_sales: Vec<GroupTotal<Category>>,
    pub segment_sales: Vec<GroupTotal<Segment>>,
    pub regional_leaders: Vec<RegionStats>,
    pub top_products: Vec<ProductRecord>,
    pub product_matrix: Vec<ProductPoint>,
    pub satisfaction_by_segment: Vec<SatisfactionSpread>,
}

/// Read-only handle over a loaded dataset.
pub struct Dashboard {
    dataset: Dataset,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> FilterOptions {
        aggregate::filter_options(&self.dataset.sales)
    }

    /// Recompute every panel from the full tables.
    pub fn view(&self, filter: &DashboardFilter, top_n: usize) -> DashResult<DashboardView> {
        filter.validate()?;
        let data = &self.dataset;
        let sales: Vec<_> = filter.apply(&data.sales).collect();

        let view = DashboardView {
            filter: *filter,
            summary: aggregate::summarize(data),
            filtered_revenue: aggregate::total_revenue(sales.iter().copied()),
            filtered_transactions: sales.len(),
            daily_sales: aggregate::daily_sales(sales.iter().copied()),
            region_sales: aggregate::sum_by(sales.iter().copied(), |s| s.region),
            category_sales: aggregate::sum_by(sales.iter().copied(), |s| s.category),
            segment_sales: aggregate::sum_by(sales.iter().copied(), |s| s.segment),
            regional_leaders: aggregate::regional_leaders(sales.iter().copied()),
            top_products: aggregate::top_products(&data.products, top_n),
            product_matrix: aggregate::product_matrix(&data.products),
            satisfaction_by_segment: aggregate::satisfaction_by_segment(&data.customers),
        };
        log::debug!(
            "view region={:?} category={:?}: {} of {} sales rows",
            filter.region,
            filter.category,
            view.filtered_transactions,
            data.sales.len()
        );
        Ok(view)
    }
}
