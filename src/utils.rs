//! Utils

use clap::Parser;
use rust_decimal::Decimal;

use crate::filter::{ProductQuery, ProductSort};

/// Arguments for the storefront demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Free-text search term applied to the listing
    #[clap(short, long)]
    pub term: Option<String>,

    /// City facet
    #[clap(long)]
    pub city: Option<String>,

    /// Retailer facet
    #[clap(long)]
    pub company: Option<String>,

    /// Minimum rating facet, e.g. 4.5
    #[clap(long)]
    pub min_rating: Option<Decimal>,

    /// Sort mode (recommended|price-asc|price-desc|rating|newest)
    #[clap(short, long, default_value = "recommended")]
    pub sort: String,
}

impl DemoArgs {
    /// Build a product query from the parsed arguments. Unknown sort
    /// arguments fall back to the recommended order.
    #[must_use]
    pub fn product_query(&self) -> ProductQuery {
        ProductQuery {
            term: self.term.clone(),
            city: self.city.clone(),
            company: self.company.clone(),
            min_rating: self.min_rating,
            sort: parse_sort(&self.sort).unwrap_or_default(),
            ..ProductQuery::default()
        }
    }
}

/// Parse a demo sort argument into a sort mode.
#[must_use]
pub fn parse_sort(value: &str) -> Option<ProductSort> {
    match value {
        "recommended" => Some(ProductSort::Recommended),
        "price-asc" => Some(ProductSort::PriceLowToHigh),
        "price-desc" => Some(ProductSort::PriceHighToLow),
        "rating" => Some(ProductSort::HighestRated),
        "newest" => Some(ProductSort::NewestFirst),
        _ => None,
    }
}
