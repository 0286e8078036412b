//! Catalog
//!
//! The static, read-only set of product, company and service records the
//! storefront is compiled with. Records are loaded once from the embedded
//! fixture and indexed by identifier; nothing in the catalog is ever
//! mutated at runtime.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::tags::TagSet;

pub mod fixture;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors related to catalog loading or lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing error in the catalog fixture.
    #[error("failed to parse catalog fixture: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products in the fixture share an id.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A detail record references a product id that does not exist.
    #[error("details reference unknown product: {0}")]
    OrphanDetails(String),

    /// No product with the given id.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The product exists but has no detail record.
    #[error("no details for product: {0}")]
    DetailsNotFound(String),
}

/// Which listing tab a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Ready-made curtains sold as-is.
    Readymade,
    /// Made-to-order curtains.
    Custom,
}

impl ProductKind {
    /// Display label, matching the persisted marker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Readymade => "readymade",
            Self::Custom => "custom",
        }
    }
}

/// A catalog product as shown in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Stable identifier, referenced by cart and wishlist entries.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short listing description.
    pub description: String,

    /// Base price in the smallest currency unit.
    pub price: i64,

    /// Pre-discount price, when the product is on offer.
    pub original_price: Option<i64>,

    /// Canonical image filename.
    pub image: String,

    /// Listing tab the product belongs to.
    pub category: ProductKind,

    /// Average rating on a 0-5 scale, when the product has reviews.
    pub rating: Option<Decimal>,

    /// Number of reviews behind the rating.
    pub review_count: Option<u32>,

    /// Whether the product can currently be ordered.
    pub in_stock: bool,

    /// Display tags.
    pub tags: TagSet,

    /// Name of the retailer selling the product.
    pub retailer: String,

    /// City the retailer operates from.
    pub city: String,

    /// Curtain style facet (Blackout, Sheer, ...).
    pub style: String,

    /// Dominant color facet.
    pub color: String,
}

impl Product {
    /// Percentage saved versus the pre-discount price, rounded to the
    /// nearest whole percent. `None` when the product is not discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;

        if original <= self.price {
            return None;
        }

        let saved = Decimal::from(original - self.price) * Decimal::from(100);

        (saved / Decimal::from(original)).round().to_u32()
    }
}

/// A selectable color variant on a product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Display name, e.g. "Midnight Black".
    pub name: String,

    /// Display swatch color as a hex string.
    pub hex: String,

    /// Variant-specific image, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A selectable size variant with its price adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// Display label, e.g. "6ft Width".
    pub label: String,

    /// Stable value used to select the variant.
    pub value: String,

    /// Price delta relative to the base price.
    pub price_delta: i64,
}

/// A selectable lining variant with its price adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiningVariant {
    /// Display name, e.g. "Blackout".
    pub name: String,

    /// Short description of the lining.
    pub description: String,

    /// Price delta relative to the base price. May be negative.
    pub price_delta: i64,
}

/// A selectable header-style variant with its price adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderVariant {
    /// Display name, e.g. "Eyelet".
    pub name: String,

    /// Short description of the header style.
    pub description: String,

    /// Price delta relative to the base price. May be negative.
    pub price_delta: i64,
}

/// A customer review on a product detail page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    /// Review identifier, unique within the product.
    pub id: String,

    /// Reviewer display name.
    pub user: String,

    /// Star rating on a 0-5 scale.
    pub rating: Decimal,

    /// Review text.
    pub comment: String,

    /// Review date as displayed (not used for ordering).
    pub date: String,

    /// Whether the review comes from a verified purchase.
    pub verified: bool,
}

/// A label/value row in the specifications section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Specification {
    /// Row label, e.g. "Material".
    pub label: String,

    /// Row value.
    pub value: String,
}

/// A titled policy blurb (returns, warranty, care).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Policy {
    /// Policy title.
    pub title: String,

    /// Policy body text.
    pub content: String,
}

/// Detail-page data for a product: gallery, variants, reviews, policies.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    /// Ordered gallery of image filenames.
    pub images: Vec<String>,

    /// Selectable color variants.
    pub colors: Vec<ColorVariant>,

    /// Selectable size variants.
    pub sizes: Vec<SizeVariant>,

    /// Selectable lining variants.
    pub lining: Vec<LiningVariant>,

    /// Selectable header-style variants.
    pub headers: Vec<HeaderVariant>,

    /// Units currently in stock.
    pub stock_count: u32,

    /// Customer reviews.
    pub reviews: Vec<Review>,

    /// Specification rows.
    pub specifications: Vec<Specification>,

    /// Policy blurbs.
    pub policies: Vec<Policy>,
}

/// A product paired with its detail record.
#[derive(Debug, Clone, Copy)]
pub struct Detailed<'a> {
    /// The listing-level product record.
    pub product: &'a Product,

    /// The detail-page record for the same product.
    pub details: &'a ProductDetails,
}

/// A retailer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    /// Stable identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Logo image filename.
    pub image: String,

    /// Location as "City, Region".
    pub location: String,

    /// Average rating on a 0-5 scale.
    pub rating: Decimal,

    /// Number of reviews behind the rating.
    pub review_count: u32,

    /// Profile description.
    pub description: String,

    /// Specialty labels, matched by free-text search.
    pub specialties: Vec<String>,

    /// Year the company was established.
    pub established: u16,
}

/// What a service professional does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Advises on fabric and measurement.
    Consultant,
    /// Installs curtains on site.
    Fitter,
}

/// Whether a service professional is taking bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Currently taking bookings.
    Available,
    /// Not taking bookings.
    Unavailable,
}

/// A service professional profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    /// Stable identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Role of the professional.
    pub role: ServiceRole,

    /// Avatar image filename.
    pub avatar: String,

    /// City the professional serves.
    pub location: String,

    /// Booking availability.
    pub status: Availability,

    /// Average rating on a 0-5 scale, when rated.
    pub rating: Option<Decimal>,

    /// Experience blurb, e.g. "8 years".
    pub experience: Option<String>,
}

/// The static catalog, indexed by identifier.
#[derive(Debug)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    order: Vec<ProductKey>,
    ids: FxHashMap<String, ProductKey>,
    details: FxHashMap<String, ProductDetails>,
    companies: Vec<Company>,
    services: Vec<Service>,
}

impl Catalog {
    /// Load the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded fixture fails to parse,
    /// which would indicate a packaging defect.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(include_str!("../../fixtures/catalog.yaml"))
    }

    /// Load a catalog from YAML fixture text.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on parse failures, duplicate product ids,
    /// or detail records referencing unknown products.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        fixture::CatalogFixture::from_yaml(yaml)?.into_catalog()
    }

    pub(crate) fn from_parts(
        product_list: Vec<Product>,
        details: FxHashMap<String, ProductDetails>,
        companies: Vec<Company>,
        services: Vec<Service>,
    ) -> Result<Self, CatalogError> {
        let mut products = SlotMap::with_key();
        let mut order = Vec::with_capacity(product_list.len());
        let mut ids = FxHashMap::default();

        for product in product_list {
            let id = product.id.clone();
            let key = products.insert(product);

            if ids.insert(id.clone(), key).is_some() {
                return Err(CatalogError::DuplicateProduct(id));
            }

            order.push(key);
        }

        if let Some(orphan) = details.keys().find(|id| !ids.contains_key(*id)) {
            return Err(CatalogError::OrphanDetails(orphan.clone()));
        }

        Ok(Self {
            products,
            order,
            ids,
            details,
            companies,
            services,
        })
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for an unknown id.
    pub fn product(&self, id: &str) -> Result<&Product, CatalogError> {
        self.ids
            .get(id)
            .and_then(|key| self.products.get(*key))
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Look up a product together with its detail record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for an unknown id and
    /// [`CatalogError::DetailsNotFound`] for a product without details.
    pub fn detailed(&self, id: &str) -> Result<Detailed<'_>, CatalogError> {
        let product = self.product(id)?;
        let details = self
            .details
            .get(id)
            .ok_or_else(|| CatalogError::DetailsNotFound(id.to_string()))?;

        Ok(Detailed { product, details })
    }

    /// Iterate over all products in fixture order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Products on the given listing tab, in fixture order.
    #[must_use]
    pub fn by_kind(&self, kind: ProductKind) -> Vec<&Product> {
        self.products()
            .filter(|product| product.category == kind)
            .collect()
    }

    /// All retailer profiles, in fixture order.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// All service professionals, in fixture order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Distinct product cities, in first-seen order.
    #[must_use]
    pub fn cities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();

        for product in self.products() {
            if !seen.contains(&product.city.as_str()) {
                seen.push(&product.city);
            }
        }

        seen
    }

    /// Distinct retailer names across products, in first-seen order.
    #[must_use]
    pub fn retailers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();

        for product in self.products() {
            if !seen.contains(&product.retailer.as_str()) {
                seen.push(&product.retailer);
            }
        }

        seen
    }

    /// Distinct company regions (the part after the comma in a company
    /// location, or the whole location when there is none), in first-seen
    /// order.
    #[must_use]
    pub fn company_regions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();

        for company in &self.companies {
            let region = company
                .location
                .split_once(',')
                .map_or(company.location.as_str(), |(_, region)| region.trim());

            if !seen.contains(&region) {
                seen.push(region);
            }
        }

        seen
    }

    /// Distinct service locations, in first-seen order.
    #[must_use]
    pub fn service_locations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();

        for service in &self.services {
            if !seen.contains(&service.location.as_str()) {
                seen.push(&service.location);
            }
        }

        seen
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
