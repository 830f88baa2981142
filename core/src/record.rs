//! Row types for the three tables.
//!
//! Field renames are the CSV column headers.

use crate::{
    calendar::day_format,
    types::{Category, Channel, Day, Gender, Region, Segment},
};
use serde::{Deserialize, Serialize};

/// One sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Date", with = "day_format")]
    pub date: Day,
    #[serde(rename = "Sales")]
    pub amount: f64,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Product_Category")]
    pub category: Category,
    #[serde(rename = "Customer_Segment")]
    pub segment: Segment,
    #[serde(rename = "Sales_Rep")]
    pub sales_rep: String,
    #[serde(rename = "Channel")]
    pub channel: Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "Customer_ID")]
    pub customer_id: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Region")]
    pub region: Region,
    #[serde(rename = "Customer_Segment")]
    pub segment: Segment,
    #[serde(rename = "Total_Purchases")]
    pub total_purchases: f64,
    /// Always within [1, 10].
    #[serde(rename = "Satisfaction_Score")]
    pub satisfaction: f64,
    #[serde(rename = "Join_Date", with = "day_format")]
    pub join_date: Day,
    #[serde(rename = "Last_Purchase", with = "day_format")]
    pub last_purchase: Day,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Units_Sold")]
    pub units_sold: u64,
    #[serde(rename = "Avg_Price")]
    pub avg_price: f64,
    /// Fraction in [0, 1].
    #[serde(rename = "Profit_Margin")]
    pub profit_margin: f64,
    /// Stars in [1, 5].
    #[serde(rename = "Customer_Rating")]
    pub rating: f64,
    #[serde(rename = "Launch_Date", with = "day_format")]
    pub launch_date: Day,
}

/// All three tables, held read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub sales: Vec<SaleRecord>,
    pub customers: Vec<CustomerRecord>,
    pub products: Vec<ProductRecord>,
}

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
