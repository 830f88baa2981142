use crate::{
    calendar::offset_day,
    config::{CustomerShape, GeneratorConfig},
    generator::TableGenerator,
    record::{round_to, CustomerRecord},
    rng::{StreamRng, TableSlot},
    types::{Day, Gender, Region},
};

pub const MIN_SATISFACTION: f64 = 1.0;
pub const MAX_SATISFACTION: f64 = 10.0;

pub struct CustomerGenerator<'a> {
    count: usize,
    origin: Day,
    shape: &'a CustomerShape,
}

impl<'a> CustomerGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            count: config.num_customers,
            origin: config.start_date,
            shape: &config.customers,
        }
    }

    fn generate_one(&self, index: usize, rng: &mut StreamRng) -> CustomerRecord {
        let shape = self.shape;

        // Truncate toward zero, then floor at the minimum age.
        let raw_age = rng.normal(shape.age_mean, shape.age_std).trunc();
        let age = raw_age.max(shape.min_age as f64) as u32;
        let region = *rng.pick(&Region::ALL);
        let segment = *rng.pick_weighted(&shape.segment_weights);

        // Purchases and satisfaction both follow the segment.
        let profile = shape.profile(segment);
        let total_purchases = rng.exponential(profile.purchases_mean) + profile.purchases_floor;
        let satisfaction = rng
            .normal(profile.satisfaction_base, shape.satisfaction_std)
            .clamp(MIN_SATISFACTION, MAX_SATISFACTION);

        let gender = *rng.pick(&Gender::ALL);
        let join_date = offset_day(self.origin, rng.next_u64_below(shape.date_window_days));
        let last_purchase = offset_day(self.origin, rng.next_u64_below(shape.date_window_days));

        CustomerRecord {
            customer_id: format!("CUST_{:05}", index + 1),
            age,
            gender,
            region,
            segment,
            total_purchases: round_to(total_purchases, 2),
            satisfaction: round_to(satisfaction, 1),
            join_date,
            last_purchase,
        }
    }
}

impl TableGenerator for CustomerGenerator<'_> {
    type Row = CustomerRecord;

    fn name(&self) -> &'static str {
        "customer"
    }

    fn slot(&self) -> TableSlot {
        TableSlot::Customer
    }

    fn generate(&self, rng: &mut StreamRng) -> Vec<CustomerRecord> {
        (0..self.count).map(|i| self.generate_one(i, rng)).collect()
    }
}
