use crate::{
    calendar::offset_day,
    config::GeneratorConfig,
    generator::TableGenerator,
    record::{round_to, ProductRecord},
    rng::{StreamRng, TableSlot},
    types::{Category, Day},
};

/// Launch dates fall in the first year of the range.
pub const LAUNCH_WINDOW_DAYS: u64 = 365;

/// Keyword lists checked in order; the first list with a hit wins.
const CATEGORY_KEYWORDS: [(Category, &[&str]); 4] = [
    (
        Category::Electronics,
        &[
            "smartphone", "laptop", "headphones", "watch", "console",
            "tablet", "camera", "speaker", "tv", "tracker",
        ],
    ),
    (Category::Clothing, &["jacket", "shoes", "shirt", "jeans"]),
    (Category::HomeAndGarden, &["garden", "kitchen", "furniture", "desk", "coffee"]),
    (Category::Sports, &["fitness", "running"]),
];

/// Infer a product's category from keywords in its name.
///
/// Matching is a case-insensitive substring test. Names matching no
/// list fall back to `Category::Other`.
pub fn infer_category(name: &str) -> Category {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

fn price_range(category: Category) -> (f64, f64) {
    match category {
        Category::Electronics => (50.0, 500.0),
        Category::Clothing => (30.0, 200.0),
        _ => (40.0, 300.0),
    }
}

pub struct ProductGenerator<'a> {
    names: &'a [String],
    origin: Day,
}

impl<'a> ProductGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            names: &config.products,
            origin: config.start_date,
        }
    }
}

impl TableGenerator for ProductGenerator<'_> {
    type Row = ProductRecord;

    fn name(&self) -> &'static str {
        "product"
    }

    fn slot(&self) -> TableSlot {
        TableSlot::Product
    }

    fn generate(&self, rng: &mut StreamRng) -> Vec<ProductRecord> {
        self.names
            .iter()
            .map(|name| {
                let category = infer_category(name);
                let (low, high) = price_range(category);
                let base_price = rng.uniform(low, high);
                let units_sold = rng.int_range(100, 2000);
                let profit_margin = rng.uniform(0.15, 0.45);
                let rating = rng.uniform(3.5, 5.0);
                let launch_date = offset_day(self.origin, rng.next_u64_below(LAUNCH_WINDOW_DAYS));

                ProductRecord {
                    name: name.clone(),
                    category,
                    revenue: round_to(base_price * units_sold as f64, 2),
                    units_sold,
                    avg_price: round_to(base_price, 2),
                    profit_margin: round_to(profit_margin, 3).clamp(0.0, 1.0),
                    rating: round_to(rating, 1).clamp(1.0, 5.0),
                    launch_date,
                }
            })
            .collect()
    }
}
