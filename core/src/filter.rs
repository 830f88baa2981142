//! Dashboard filter: region, category and an optional date window.

use crate::{
    calendar::parse_day,
    error::{DashError, DashResult},
    record::SaleRecord,
    types::{Category, Day, Region},
};
use serde::{Deserialize, Serialize};

/// Filter value meaning "no restriction".
pub const ALL: &str = "all";

/// `None` on any field means unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    pub region: Option<Region>,
    pub category: Option<Category>,
    pub start: Option<Day>,
    pub end: Option<Day>,
}

impl DashboardFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from the text values a UI control would send.
    /// Absent values and `"all"` leave that dimension unrestricted.
    pub fn from_labels(
        region: Option<&str>,
        category: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> DashResult<Self> {
        let filter = Self {
            region: parse_choice(region)?,
            category: parse_choice(category)?,
            start: start.map(parse_day).transpose()?,
            end: end.map(parse_day).transpose()?,
        };
        filter.validate()?;
        Ok(filter)
    }

    pub fn validate(&self) -> DashResult<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(DashError::InvalidDateRange { start, end });
            }
        }
        Ok(())
    }

    /// Date bounds are inclusive.
    pub fn matches(&self, sale: &SaleRecord) -> bool {
        self.start.map_or(true, |s| sale.date >= s)
            && self.end.map_or(true, |e| sale.date <= e)
            && self.region.map_or(true, |r| sale.region == r)
            && self.category.map_or(true, |c| sale.category == c)
    }

    /// Matching rows in their original order.
    pub fn apply<'a>(&'a self, sales: &'a [SaleRecord]) -> impl Iterator<Item = &'a SaleRecord> + 'a {
        sales.iter().filter(move |s| self.matches(s))
    }
}

fn parse_choice<T: std::str::FromStr<Err = DashError>>(value: Option<&str>) -> DashResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(v) if v == ALL => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}
