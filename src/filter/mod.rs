//! Filtering
//!
//! Pure, stateless filtering and sorting over the static catalog. Every
//! criterion is optional and defaults to "no restriction"; criteria are
//! applied as a conjunction, then the sort mode is applied to the filtered
//! result. All sorts are stable so equal keys keep their input order and
//! results stay reproducible.

use std::cmp::Reverse;

use rust_decimal::Decimal;

use crate::catalog::Product;

pub mod companies;
pub mod services;

/// Fixed curtain-style facet choices offered by the listing UI.
pub const STYLE_FACETS: [&str; 12] = [
    "Blackout",
    "Sheer",
    "Room Darkening",
    "Thermal",
    "Printed",
    "Solid",
    "Silk",
    "Cotton",
    "Lace",
    "Embroidered",
    "Velvet",
    "Linen",
];

/// Fixed color facet choices offered by the listing UI.
pub const COLOR_FACETS: [&str; 8] = [
    "Black", "White", "Blue", "Beige", "Pink", "Gray", "Red", "Gold",
];

/// Price range facet buckets.
///
/// The bucket bounds are inclusive on both ends for the middle ranges, so
/// a price sitting exactly on a boundary matches two buckets. That matches
/// the listing UI this engine was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    /// Prices strictly below 500.
    Under500,
    /// Prices from 500 to 1,000, inclusive.
    From500To1000,
    /// Prices from 1,000 to 2,000, inclusive.
    From1000To2000,
    /// Prices from 2,000 to 5,000, inclusive.
    From2000To5000,
    /// Prices strictly above 5,000.
    Above5000,
}

impl PriceRange {
    /// Every bucket, in display order.
    pub const ALL: [Self; 5] = [
        Self::Under500,
        Self::From500To1000,
        Self::From1000To2000,
        Self::From2000To5000,
        Self::Above5000,
    ];

    /// Check whether a price falls in this bucket.
    #[must_use]
    pub fn contains(self, price: i64) -> bool {
        match self {
            Self::Under500 => price < 500,
            Self::From500To1000 => (500..=1000).contains(&price),
            Self::From1000To2000 => (1000..=2000).contains(&price),
            Self::From2000To5000 => (2000..=5000).contains(&price),
            Self::Above5000 => price > 5000,
        }
    }

    /// Display label for the bucket.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Under500 => "Under ₹500",
            Self::From500To1000 => "₹500 - ₹1,000",
            Self::From1000To2000 => "₹1,000 - ₹2,000",
            Self::From2000To5000 => "₹2,000 - ₹5,000",
            Self::Above5000 => "Above ₹5,000",
        }
    }
}

/// Fixed minimum-rating facet choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFacet {
    /// 4.5 stars and up.
    FourPointFiveUp,
    /// 4.0 stars and up.
    FourUp,
    /// 3.5 stars and up.
    ThreePointFiveUp,
}

impl RatingFacet {
    /// Every facet, in display order.
    pub const ALL: [Self; 3] = [Self::FourPointFiveUp, Self::FourUp, Self::ThreePointFiveUp];

    /// The minimum rating this facet stands for.
    #[must_use]
    pub fn threshold(self) -> Decimal {
        match self {
            Self::FourPointFiveUp => Decimal::new(45, 1),
            Self::FourUp => Decimal::new(40, 1),
            Self::ThreePointFiveUp => Decimal::new(35, 1),
        }
    }

    /// Display label for the facet.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FourPointFiveUp => "4.5+ Stars",
            Self::FourUp => "4.0+ Stars",
            Self::ThreePointFiveUp => "3.5+ Stars",
        }
    }
}

/// Product sort modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Keep the input order.
    #[default]
    Recommended,
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Best rated first; unrated products sort as zero.
    HighestRated,
    /// Reverse of the input order. This is a positional proxy for
    /// recency, not a timestamp sort; the catalog has no dates.
    NewestFirst,
}

impl ProductSort {
    /// Every sort mode, in display order.
    pub const ALL: [Self; 5] = [
        Self::Recommended,
        Self::PriceLowToHigh,
        Self::PriceHighToLow,
        Self::HighestRated,
        Self::NewestFirst,
    ];

    /// Display label for the sort mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Recommended => "Recommended",
            Self::PriceLowToHigh => "Price: Low to High",
            Self::PriceHighToLow => "Price: High to Low",
            Self::HighestRated => "Highest Rated",
            Self::NewestFirst => "Newest First",
        }
    }
}

/// Filter criteria for the product listing. Every field defaults to "no
/// restriction".
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Free-text term, matched case-insensitively against the product
    /// name and retailer name.
    pub term: Option<String>,

    /// City facet, matched exactly.
    pub city: Option<String>,

    /// Retailer facet, matched exactly.
    pub company: Option<String>,

    /// Curtain-style facet, matched exactly.
    pub style: Option<String>,

    /// Color facet, matched exactly.
    pub color: Option<String>,

    /// Price bucket facet.
    pub price_range: Option<PriceRange>,

    /// Minimum rating. Products without a rating always pass this
    /// criterion; only rated products are compared against it.
    pub min_rating: Option<Decimal>,

    /// Sort mode applied after filtering.
    pub sort: ProductSort,
}

impl ProductQuery {
    /// Check whether a product satisfies every criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = self.term.as_deref()
            && !term.is_empty()
        {
            let needle = term.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&needle);
            let in_retailer = product.retailer.to_lowercase().contains(&needle);

            if !in_name && !in_retailer {
                return false;
            }
        }

        if let Some(city) = self.city.as_deref()
            && product.city != city
        {
            return false;
        }

        if let Some(company) = self.company.as_deref()
            && product.retailer != company
        {
            return false;
        }

        if let Some(style) = self.style.as_deref()
            && product.style != style
        {
            return false;
        }

        if let Some(color) = self.color.as_deref()
            && product.color != color
        {
            return false;
        }

        if let Some(range) = self.price_range
            && !range.contains(product.price)
        {
            return false;
        }

        if let Some(min) = self.min_rating
            && let Some(rating) = product.rating
            && rating < min
        {
            return false;
        }

        true
    }
}

/// Filter products by the query, then apply its sort mode.
///
/// With an all-default query this returns the full input in its original
/// order.
pub fn filter_and_sort<'a, I>(products: I, query: &ProductQuery) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut matched: Vec<&Product> = products
        .into_iter()
        .filter(|product| query.matches(product))
        .collect();

    match query.sort {
        ProductSort::Recommended => {}
        ProductSort::PriceLowToHigh => matched.sort_by_key(|product| product.price),
        ProductSort::PriceHighToLow => matched.sort_by_key(|product| Reverse(product.price)),
        ProductSort::HighestRated => {
            matched.sort_by_key(|product| Reverse(product.rating.unwrap_or(Decimal::ZERO)));
        }
        ProductSort::NewestFirst => matched.reverse(),
    }

    matched
}
