//! Metric aggregation over the in-memory tables.
//!
//! Every function here is pure: it borrows rows and returns fresh
//! aggregates. Nothing is cached between calls.

use crate::{
    record::{CustomerRecord, Dataset, ProductRecord, SaleRecord},
    types::{Category, Day, Labelled, Region, Segment},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// Header KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_revenue: f64,
    pub customer_count: usize,
    /// `None` when there are no customers.
    pub avg_satisfaction: Option<f64>,
    /// `None` when there are no products.
    pub avg_profit_margin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: Day,
    pub total: f64,
}

/// Sum of sales for one categorical key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: f64,
}

/// One row of the regional leaderboard. Values are rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: Region,
    pub total_sales: f64,
    pub avg_transaction: f64,
    pub transaction_count: usize,
}

/// One bubble of the product performance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPoint {
    pub name: String,
    pub units_sold: u64,
    pub revenue: f64,
    pub rating: f64,
    pub profit_margin: f64,
}

/// Five-number summary plus mean of satisfaction for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionSpread {
    pub segment: Segment,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Choices a filter control can offer, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<Region>,
    pub categories: Vec<Category>,
    pub first_date: Option<Day>,
    pub last_date: Option<Day>,
}

// ── Scalars ──────────────────────────────────────────────────────────────────

pub fn summarize(dataset: &Dataset) -> Summary {
    Summary {
        total_revenue: total_revenue(&dataset.sales),
        customer_count: dataset.customers.len(),
        avg_satisfaction: mean(dataset.customers.iter().map(|c| c.satisfaction)),
        avg_profit_margin: mean(dataset.products.iter().map(|p| p.profit_margin)),
    }
}

pub fn total_revenue<'a>(sales: impl IntoIterator<Item = &'a SaleRecord>) -> f64 {
    sales.into_iter().map(|s| s.amount).sum()
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ── Grouped ──────────────────────────────────────────────────────────────────

/// Sales summed per day, dates ascending.
pub fn daily_sales<'a>(sales: impl IntoIterator<Item = &'a SaleRecord>) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<Day, f64> = BTreeMap::new();
    for s in sales {
        *by_day.entry(s.date).or_insert(0.0) += s.amount;
    }
    by_day
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Sales summed per key. Groups are ordered by label, and keys with no
/// rows are absent.
pub fn sum_by<'a, K, F>(sales: impl IntoIterator<Item = &'a SaleRecord>, key: F) -> Vec<GroupTotal<K>>
where
    K: Labelled + Copy,
    F: Fn(&SaleRecord) -> K,
{
    let mut groups: BTreeMap<&'static str, GroupTotal<K>> = BTreeMap::new();
    for s in sales {
        let k = key(s);
        groups
            .entry(k.label())
            .or_insert(GroupTotal { key: k, total: 0.0 })
            .total += s.amount;
    }
    groups.into_values().collect()
}

/// Sum, mean and count per region, largest total first.
pub fn regional_leaders<'a>(sales: impl IntoIterator<Item = &'a SaleRecord>) -> Vec<RegionStats> {
    let mut groups: BTreeMap<&'static str, (Region, f64, usize)> = BTreeMap::new();
    for s in sales {
        let entry = groups.entry(s.region.label()).or_insert((s.region, 0.0, 0));
        entry.1 += s.amount;
        entry.2 += 1;
    }

    let mut rows: Vec<RegionStats> = groups
        .into_values()
        .map(|(region, total, count)| RegionStats {
            region,
            total_sales: total.round(),
            avg_transaction: (total / count as f64).round(),
            transaction_count: count,
        })
        .collect();
    rows.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    rows
}

// ── Products ─────────────────────────────────────────────────────────────────

/// The `n` highest-revenue products, descending. The sort is stable, so
/// equal revenues keep their table order. Returns `min(n, len)` rows.
pub fn top_products(products: &[ProductRecord], n: usize) -> Vec<ProductRecord> {
    let mut ranked: Vec<&ProductRecord> = products.iter().collect();
    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.into_iter().take(n).cloned().collect()
}

pub fn product_matrix(products: &[ProductRecord]) -> Vec<ProductPoint> {
    products
        .iter()
        .map(|p| ProductPoint {
            name: p.name.clone(),
            units_sold: p.units_sold,
            revenue: p.revenue,
            rating: p.rating,
            profit_margin: p.profit_margin,
        })
        .collect()
}

// ── Customers ────────────────────────────────────────────────────────────────

/// Satisfaction spread per segment, in Premium/Standard/Budget order.
/// Segments with no customers are omitted.
pub fn satisfaction_by_segment(customers: &[CustomerRecord]) -> Vec<SatisfactionSpread> {
    Segment::ALL
        .iter()
        .filter_map(|&segment| {
            let mut scores: Vec<f64> = customers
                .iter()
                .filter(|c| c.segment == segment)
                .map(|c| c.satisfaction)
                .collect();
            if scores.is_empty() {
                return None;
            }
            scores.sort_by(f64::total_cmp);
            Some(SatisfactionSpread {
                segment,
                count: scores.len(),
                min: scores[0],
                q1: quantile(&scores, 0.25),
                median: quantile(&scores, 0.5),
                q3: quantile(&scores, 0.75),
                max: scores[scores.len() - 1],
                mean: mean(scores.iter().copied()).unwrap_or_default(),
            })
        })
        .collect()
}

/// Linear-interpolated quantile of already sorted, non-empty data.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ── Options ──────────────────────────────────────────────────────────────────

pub fn filter_options(sales: &[SaleRecord]) -> FilterOptions {
    let mut options = FilterOptions::default();
    for s in sales {
        if !options.regions.contains(&s.region) {
            options.regions.push(s.region);
        }
        if !options.categories.contains(&s.category) {
            options.categories.push(s.category);
        }
    }
    options.first_date = sales.iter().map(|s| s.date).min();
    options.last_date = sales.iter().map(|s| s.date).max();
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Channel, Gender};

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn sale(d: u32, amount: f64, region: Region) -> SaleRecord {
        SaleRecord {
            date: day(d),
            amount,
            region,
            category: Category::Books,
            segment: Segment::Premium,
            sales_rep: "Rep_01".into(),
            channel: Channel::Retail,
        }
    }

    fn product(name: &str, revenue: f64) -> ProductRecord {
        ProductRecord {
            name: name.into(),
            category: Category::Other,
            revenue,
            units_sold: 100,
            avg_price: revenue / 100.0,
            profit_margin: 0.2,
            rating: 4.0,
            launch_date: day(1),
        }
    }

    fn customer(segment: Segment, satisfaction: f64) -> CustomerRecord {
        CustomerRecord {
            customer_id: "CUST_00001".into(),
            age: 30,
            gender: Gender::Female,
            region: Region::North,
            segment,
            total_purchases: 3.0,
            satisfaction,
            join_date: day(1),
            last_purchase: day(2),
        }
    }

    #[test]
    fn daily_sales_sum_and_order() {
        let sales = vec![sale(2, 5.0, Region::North), sale(1, 1.0, Region::South), sale(2, 2.5, Region::East)];
        let daily = daily_sales(&sales);
        assert_eq!(
            daily,
            vec![
                DailyTotal { date: day(1), total: 1.0 },
                DailyTotal { date: day(2), total: 7.5 },
            ]
        );
    }

    #[test]
    fn sum_by_groups_sorted_by_label() {
        let sales = vec![sale(1, 1.0, Region::West), sale(1, 2.0, Region::East), sale(1, 3.0, Region::West)];
        let groups = sum_by(&sales, |s| s.region);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], GroupTotal { key: Region::East, total: 2.0 });
        assert_eq!(groups[1], GroupTotal { key: Region::West, total: 4.0 });
    }

    #[test]
    fn regional_leaders_sorted_and_rounded() {
        let sales = vec![
            sale(1, 10.4, Region::North),
            sale(1, 100.0, Region::South),
            sale(1, 10.4, Region::North),
        ];
        let rows = regional_leaders(&sales);
        assert_eq!(rows[0].region, Region::South);
        assert_eq!(rows[1].region, Region::North);
        assert_eq!(rows[1].total_sales, 21.0);
        assert_eq!(rows[1].avg_transaction, 10.0);
        assert_eq!(rows[1].transaction_count, 2);
    }

    #[test]
    fn top_products_is_stable_on_ties() {
        let products = vec![
            product("a", 10.0),
            product("b", 30.0),
            product("c", 10.0),
            product("d", 30.0),
        ];
        let top: Vec<String> = top_products(&products, 3).into_iter().map(|p| p.name).collect();
        assert_eq!(top, vec!["b", "d", "a"]);
    }

    #[test]
    fn top_products_caps_at_table_size() {
        let products = vec![product("a", 1.0), product("b", 2.0)];
        assert_eq!(top_products(&products, 10).len(), 2);
        assert!(top_products(&products, 0).is_empty());
    }

    #[test]
    fn empty_inputs_give_empty_aggregates() {
        let no_sales: Vec<SaleRecord> = Vec::new();
        let summary = summarize(&Dataset::default());
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.customer_count, 0);
        assert_eq!(summary.avg_satisfaction, None);
        assert_eq!(summary.avg_profit_margin, None);
        assert!(daily_sales(&no_sales).is_empty());
        assert!(regional_leaders(&no_sales).is_empty());
        assert!(satisfaction_by_segment(&[]).is_empty());
        assert_eq!(filter_options(&no_sales), FilterOptions::default());
    }

    #[test]
    fn quantiles_interpolate() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 0.5), 2.5);
        assert_eq!(quantile(&data, 0.25), 1.75);
        assert_eq!(quantile(&data, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
    }

    #[test]
    fn satisfaction_spread_per_segment() {
        let customers = vec![
            customer(Segment::Budget, 4.0),
            customer(Segment::Premium, 9.0),
            customer(Segment::Budget, 6.0),
        ];
        let spread = satisfaction_by_segment(&customers);
        assert_eq!(spread.len(), 2);
        assert_eq!(spread[0].segment, Segment::Premium);
        assert_eq!(spread[1].segment, Segment::Budget);
        assert_eq!(spread[1].median, 5.0);
        assert_eq!(spread[1].mean, 5.0);
        assert_eq!(spread[1].count, 2);
    }

    #[test]
    fn filter_options_first_seen_order() {
        let sales = vec![sale(3, 1.0, Region::West), sale(1, 1.0, Region::North), sale(2, 1.0, Region::West)];
        let opts = filter_options(&sales);
        assert_eq!(opts.regions, vec![Region::West, Region::North]);
        assert_eq!(opts.categories, vec![Category::Books]);
        assert_eq!(opts.first_date, Some(day(1)));
        assert_eq!(opts.last_date, Some(day(3)));
    }
}
