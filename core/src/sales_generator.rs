use crate::{
    calendar::DaySpan,
    config::{GeneratorConfig, SalesShape},
    error::DashResult,
    generator::TableGenerator,
    record::SaleRecord,
    rng::{StreamRng, TableSlot},
};
use std::f64::consts::PI;

pub struct SalesGenerator<'a> {
    span: DaySpan,
    shape: &'a SalesShape,
}

impl<'a> SalesGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> DashResult<Self> {
        Ok(Self {
            span: DaySpan::new(config.start_date, config.end_date)?,
            shape: &config.sales,
        })
    }

    /// Deterministic part of the day's volume: base + season + trend.
    pub fn expected_volume(&self, day_index: usize) -> f64 {
        let s = self.shape;
        let seasonal = (day_index as f64 * 2.0 * PI / s.seasonal_period_days).sin()
            * s.seasonal_amplitude;
        // Linear from 0 on the first day to trend_total on the last.
        let last = self.span.len().saturating_sub(1);
        let trend = if last == 0 {
            0.0
        } else {
            s.trend_total * day_index as f64 / last as f64
        };
        s.base_sales + seasonal + trend
    }

    fn daily_volume(&self, day_index: usize, rng: &mut StreamRng) -> f64 {
        let noise = rng.normal(0.0, self.shape.noise_std);
        (self.expected_volume(day_index) + noise).max(self.shape.min_daily_sales)
    }
}

impl TableGenerator for SalesGenerator<'_> {
    type Row = SaleRecord;

    fn name(&self) -> &'static str {
        "sales"
    }

    fn slot(&self) -> TableSlot {
        TableSlot::Sales
    }

    fn generate(&self, rng: &mut StreamRng) -> Vec<SaleRecord> {
        let s = self.shape;
        let mut rows = Vec::with_capacity(self.span.len().saturating_mul(s.rows_per_day.1 as usize));

        for (i, date) in self.span.days() {
            let volume = self.daily_volume(i, rng);
            let count = rng.int_range(s.rows_per_day.0, s.rows_per_day.1);
            for _ in 0..count {
                let divisor = rng.int_range(s.divisor_range.0, s.divisor_range.1);
                rows.push(SaleRecord {
                    date,
                    amount: volume / divisor as f64,
                    region: *rng.pick_weighted(&s.region_weights),
                    category: *rng.pick_weighted(&s.category_weights),
                    segment: *rng.pick_weighted(&s.segment_weights),
                    sales_rep: format!("Rep_{:02}", rng.int_range(1, s.sales_reps.saturating_add(1))),
                    channel: *rng.pick_weighted(&s.channel_weights),
                });
            }
        }
        rows
    }
}
