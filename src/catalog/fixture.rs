//! Catalog fixture
//!
//! Raw serde records for the YAML catalog fixture and their conversion
//! into the typed [`Catalog`]. Image references are normalized here, once,
//! so the rest of the crate only ever sees canonical filenames.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{
        Availability, Catalog, CatalogError, ColorVariant, Company, HeaderVariant, LiningVariant,
        Policy, Product, ProductDetails, ProductKind, Review, Service, ServiceRole, SizeVariant,
        Specification,
    },
    images::canonical_image_name,
    tags::TagSet,
};

/// The parsed but not yet validated catalog fixture.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFixture {
    #[serde(default)]
    products: Vec<ProductRecord>,

    #[serde(default)]
    details: FxHashMap<String, DetailsRecord>,

    #[serde(default)]
    companies: Vec<CompanyRecord>,

    #[serde(default)]
    services: Vec<ServiceRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: i64,
    #[serde(default)]
    original_price: Option<i64>,
    image: String,
    category: ProductKind,
    #[serde(default)]
    rating: Option<Decimal>,
    #[serde(default)]
    review_count: Option<u32>,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
    #[serde(default)]
    tags: TagSet,
    retailer: String,
    city: String,
    #[serde(rename = "type")]
    style: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct DetailsRecord {
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    colors: Vec<ColorVariant>,
    #[serde(default)]
    sizes: Vec<SizeVariant>,
    #[serde(default)]
    lining: Vec<LiningVariant>,
    #[serde(default)]
    headers: Vec<HeaderVariant>,
    #[serde(default)]
    stock_count: u32,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    specifications: Vec<Specification>,
    #[serde(default)]
    policies: Vec<Policy>,
}

#[derive(Debug, Deserialize)]
struct CompanyRecord {
    id: u32,
    name: String,
    image: String,
    location: String,
    rating: Decimal,
    review_count: u32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    specialties: Vec<String>,
    established: u16,
}

#[derive(Debug, Deserialize)]
struct ServiceRecord {
    id: u32,
    name: String,
    role: ServiceRole,
    avatar: String,
    location: String,
    status: Availability,
    #[serde(default)]
    rating: Option<Decimal>,
    #[serde(default)]
    experience: Option<String>,
}

fn default_in_stock() -> bool {
    true
}

impl CatalogFixture {
    /// Parse fixture YAML into raw records.
    pub(crate) fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Validate the records and build the indexed catalog.
    pub(crate) fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let products = self.products.into_iter().map(ProductRecord::into_product).collect();

        let details = self
            .details
            .into_iter()
            .map(|(id, record)| (id, record.into_details()))
            .collect();

        let companies = self
            .companies
            .into_iter()
            .map(CompanyRecord::into_company)
            .collect();

        let services = self
            .services
            .into_iter()
            .map(ServiceRecord::into_service)
            .collect();

        Catalog::from_parts(products, details, companies, services)
    }
}

impl ProductRecord {
    fn into_product(self) -> Product {
        Product {
            image: canonical_image_name(Some(&self.image)),
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            in_stock: self.in_stock,
            tags: self.tags,
            retailer: self.retailer,
            city: self.city,
            style: self.style,
            color: self.color,
        }
    }
}

impl DetailsRecord {
    fn into_details(self) -> ProductDetails {
        ProductDetails {
            images: self
                .images
                .iter()
                .map(|image| canonical_image_name(Some(image)))
                .collect(),
            colors: self
                .colors
                .into_iter()
                .map(|color| ColorVariant {
                    image: color
                        .image
                        .map(|image| canonical_image_name(Some(&image))),
                    name: color.name,
                    hex: color.hex,
                })
                .collect(),
            sizes: self.sizes,
            lining: self.lining,
            headers: self.headers,
            stock_count: self.stock_count,
            reviews: self.reviews,
            specifications: self.specifications,
            policies: self.policies,
        }
    }
}

impl CompanyRecord {
    fn into_company(self) -> Company {
        Company {
            image: canonical_image_name(Some(&self.image)),
            id: self.id,
            name: self.name,
            location: self.location,
            rating: self.rating,
            review_count: self.review_count,
            description: self.description,
            specialties: self.specialties,
            established: self.established,
        }
    }
}

impl ServiceRecord {
    fn into_service(self) -> Service {
        Service {
            avatar: canonical_image_name(Some(&self.avatar)),
            id: self.id,
            name: self.name,
            role: self.role,
            location: self.location,
            status: self.status,
            rating: self.rating,
            experience: self.experience,
        }
    }
}
