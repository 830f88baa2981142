//! Synthetic business data for a sales dashboard: deterministic
//! generation, CSV persistence, and filterable metric aggregation.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod customer_generator;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod generator;
pub mod loader;
pub mod product_generator;
pub mod record;
pub mod rng;
pub mod sales_generator;
pub mod store;
pub mod types;
