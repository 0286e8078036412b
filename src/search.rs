//! Search
//!
//! Global keyword search across the catalog. Matching is a plain
//! case-insensitive name scan with each result group capped, plus a fixed
//! keyword table that surfaces section links (e.g. a synonym of "custom"
//! links to the custom-curtains section). This is a static dictionary
//! lookup, not a search index.

use crate::catalog::{Catalog, Company, Product, Service};

/// Maximum results returned per group.
const RESULT_CAP: usize = 10;

/// A storefront section a search term can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The services directory.
    Services,
    /// The ready-made curtains listing.
    Readymade,
    /// The custom curtains listing.
    Custom,
    /// The retailer directory.
    Companies,
}

impl Section {
    /// Display label for the section link.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Services => "Services",
            Self::Readymade => "Readymade Curtains",
            Self::Custom => "Custom Curtains",
            Self::Companies => "Companies",
        }
    }
}

/// Keyword table behind the section links. A section matches when any of
/// its keywords contains the term or the term contains the keyword.
const SECTION_KEYWORDS: [(Section, &[&str]); 4] = [
    (
        Section::Services,
        &[
            "service",
            "services",
            "consultation",
            "measurement",
            "installation",
        ],
    ),
    (
        Section::Readymade,
        &["readymade", "ready made", "curtain", "curtains", "ready"],
    ),
    (
        Section::Custom,
        &["custom", "customized", "made to order", "bespoke"],
    ),
    (
        Section::Companies,
        &[
            "company",
            "companies",
            "retailer",
            "retailers",
            "store",
            "stores",
        ],
    ),
];

/// Grouped results of a keyword search.
#[derive(Debug, Clone, Default)]
pub struct SearchResults<'a> {
    /// Products whose name matched, capped at ten.
    pub products: Vec<&'a Product>,

    /// Service professionals whose name matched, capped at ten.
    pub services: Vec<&'a Service>,

    /// Companies whose name matched, capped at ten.
    pub companies: Vec<&'a Company>,

    /// Section links whose keyword table matched.
    pub sections: Vec<Section>,
}

impl SearchResults<'_> {
    /// Check whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.services.is_empty()
            && self.companies.is_empty()
            && self.sections.is_empty()
    }
}

/// Search the catalog for a term. A blank term matches nothing.
#[must_use]
pub fn search<'a>(catalog: &'a Catalog, term: &str) -> SearchResults<'a> {
    let trimmed = term.trim();

    if trimmed.is_empty() {
        return SearchResults::default();
    }

    let needle = trimmed.to_lowercase();

    let products = catalog
        .products()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .take(RESULT_CAP)
        .collect();

    let services = catalog
        .services()
        .iter()
        .filter(|service| service.name.to_lowercase().contains(&needle))
        .take(RESULT_CAP)
        .collect();

    let companies = catalog
        .companies()
        .iter()
        .filter(|company| company.name.to_lowercase().contains(&needle))
        .take(RESULT_CAP)
        .collect();

    let sections = SECTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| keyword.contains(&needle) || needle.contains(keyword))
        })
        .map(|(section, _)| *section)
        .collect();

    SearchResults {
        products,
        services,
        companies,
        sections,
    }
}
