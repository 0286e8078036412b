//! Company filtering
//!
//! The retailer directory follows the same conjunction-then-sort pattern
//! as the product listing, with criteria specific to company fields.

use std::cmp::Reverse;

use rust_decimal::Decimal;

use crate::catalog::Company;

/// Company sort modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanySort {
    /// Keep the input order.
    #[default]
    Recommended,
    /// Best rated first.
    HighestRated,
    /// Most reviewed first.
    MostReviews,
    /// Most recently established first.
    NewestFirst,
}

impl CompanySort {
    /// Every sort mode, in display order.
    pub const ALL: [Self; 4] = [
        Self::Recommended,
        Self::HighestRated,
        Self::MostReviews,
        Self::NewestFirst,
    ];

    /// Display label for the sort mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Recommended => "Recommended",
            Self::HighestRated => "Highest Rated",
            Self::MostReviews => "Most Reviews",
            Self::NewestFirst => "Newest First",
        }
    }
}

/// Filter criteria for the retailer directory.
#[derive(Debug, Clone, Default)]
pub struct CompanyQuery {
    /// Free-text term, matched case-insensitively against the company
    /// name, location and specialties.
    pub term: Option<String>,

    /// Location facet, matched as a substring of the company location so
    /// a region like "Karnataka" matches "Bangalore, Karnataka".
    pub location: Option<String>,

    /// Minimum rating. Companies always carry a rating, so this is a
    /// strict comparison.
    pub min_rating: Option<Decimal>,

    /// Sort mode applied after filtering.
    pub sort: CompanySort,
}

impl CompanyQuery {
    /// Check whether a company satisfies every criterion.
    #[must_use]
    pub fn matches(&self, company: &Company) -> bool {
        if let Some(term) = self.term.as_deref()
            && !term.is_empty()
        {
            let needle = term.to_lowercase();
            let in_name = company.name.to_lowercase().contains(&needle);
            let in_location = company.location.to_lowercase().contains(&needle);
            let in_specialties = company
                .specialties
                .iter()
                .any(|specialty| specialty.to_lowercase().contains(&needle));

            if !in_name && !in_location && !in_specialties {
                return false;
            }
        }

        if let Some(location) = self.location.as_deref()
            && !company.location.contains(location)
        {
            return false;
        }

        if let Some(min) = self.min_rating
            && company.rating < min
        {
            return false;
        }

        true
    }
}

/// Filter companies by the query, then apply its sort mode.
pub fn filter_and_sort<'a, I>(companies: I, query: &CompanyQuery) -> Vec<&'a Company>
where
    I: IntoIterator<Item = &'a Company>,
{
    let mut matched: Vec<&Company> = companies
        .into_iter()
        .filter(|company| query.matches(company))
        .collect();

    match query.sort {
        CompanySort::Recommended => {}
        CompanySort::HighestRated => matched.sort_by_key(|company| Reverse(company.rating)),
        CompanySort::MostReviews => matched.sort_by_key(|company| Reverse(company.review_count)),
        CompanySort::NewestFirst => matched.sort_by_key(|company| Reverse(company.established)),
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: u32, name: &str, location: &str, rating: &str, reviews: u32, established: u16) -> Company {
        Company {
            id,
            name: name.to_string(),
            image: "retailer1.png".to_string(),
            location: location.to_string(),
            rating: rating.parse().unwrap_or_default(),
            review_count: reviews,
            description: String::new(),
            specialties: vec!["Blackout Curtains".to_string()],
            established,
        }
    }

    fn names(results: &[&Company]) -> Vec<String> {
        results.iter().map(|company| company.name.clone()).collect()
    }

    fn directory() -> [Company; 3] {
        [
            company(1, "Elite Curtain Studio", "Bangalore, Karnataka", "4.8", 156, 2008),
            company(2, "Modern Home Textiles", "Mumbai, Maharashtra", "4.7", 203, 2010),
            company(3, "Classic Interiors", "Delhi, NCR", "4.6", 89, 2015),
        ]
    }

    #[test]
    fn default_query_returns_input_in_order() {
        let companies = directory();

        let results = filter_and_sort(&companies, &CompanyQuery::default());

        assert_eq!(
            names(&results),
            vec!["Elite Curtain Studio", "Modern Home Textiles", "Classic Interiors"]
        );
    }

    #[test]
    fn term_matches_specialties() {
        let companies = directory();
        let query = CompanyQuery {
            term: Some("blackout".to_string()),
            ..CompanyQuery::default()
        };

        assert_eq!(filter_and_sort(&companies, &query).len(), 3);
    }

    #[test]
    fn location_is_a_substring_match() {
        let companies = directory();
        let query = CompanyQuery {
            location: Some("Karnataka".to_string()),
            ..CompanyQuery::default()
        };

        assert_eq!(names(&filter_and_sort(&companies, &query)), vec!["Elite Curtain Studio"]);
    }

    #[test]
    fn min_rating_is_strict_for_companies() {
        let companies = directory();
        let query = CompanyQuery {
            min_rating: Some(rust_decimal::Decimal::new(47, 1)),
            ..CompanyQuery::default()
        };

        assert_eq!(
            names(&filter_and_sort(&companies, &query)),
            vec!["Elite Curtain Studio", "Modern Home Textiles"]
        );
    }

    #[test]
    fn sort_modes_order_as_labelled() {
        let companies = directory();

        let by_reviews = CompanyQuery {
            sort: CompanySort::MostReviews,
            ..CompanyQuery::default()
        };
        let by_established = CompanyQuery {
            sort: CompanySort::NewestFirst,
            ..CompanyQuery::default()
        };

        assert_eq!(
            names(&filter_and_sort(&companies, &by_reviews)),
            vec!["Modern Home Textiles", "Elite Curtain Studio", "Classic Interiors"]
        );
        assert_eq!(
            names(&filter_and_sort(&companies, &by_established)),
            vec!["Classic Interiors", "Modern Home Textiles", "Elite Curtain Studio"]
        );
    }
}
