//! Integration test for the storefront data core over the built-in
//! catalog: lookups, faceted filtering, keyword search, quoting, and the
//! cart and wishlist flows a UI layer would drive.

use testresult::TestResult;

use valance::{
    catalog::{Availability, Catalog, CatalogError, ProductKind, ServiceRole},
    filter::{
        PriceRange, ProductQuery, ProductSort, RatingFacet,
        companies::{self, CompanyQuery, CompanySort},
        services::{self, ServiceQuery},
        filter_and_sort,
    },
    quote::{Selection, quote},
    receipt::CartReceipt,
    search::{Section, search},
    storage::MemoryStorage,
    cart::CartStore,
    wishlist::{Toggle, WishlistDraft, WishlistStore},
};

fn ids(results: &[&valance::catalog::Product]) -> Vec<String> {
    results.iter().map(|product| product.id.clone()).collect()
}

#[test]
fn catalog_splits_into_listing_tabs() -> TestResult {
    let catalog = Catalog::builtin()?;

    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.by_kind(ProductKind::Readymade).len(), 6);
    assert_eq!(catalog.by_kind(ProductKind::Custom).len(), 6);

    Ok(())
}

#[test]
fn unknown_lookups_surface_not_found() -> TestResult {
    let catalog = Catalog::builtin()?;

    assert!(matches!(
        catalog.product("99"),
        Err(CatalogError::ProductNotFound(_))
    ));

    // Product 3 exists but has no detail record.
    assert!(matches!(
        catalog.detailed("3"),
        Err(CatalogError::DetailsNotFound(_))
    ));

    Ok(())
}

#[test]
fn city_facet_narrows_the_readymade_tab() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ProductQuery {
        city: Some("Bangalore".to_string()),
        ..ProductQuery::default()
    };

    let results = filter_and_sort(
        catalog.by_kind(ProductKind::Readymade).iter().copied(),
        &query,
    );

    assert_eq!(ids(&results), vec!["1", "5"]);

    Ok(())
}

#[test]
fn price_bucket_keeps_input_order_on_the_custom_tab() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ProductQuery {
        price_range: Some(PriceRange::From500To1000),
        ..ProductQuery::default()
    };

    let results = filter_and_sort(
        catalog.by_kind(ProductKind::Custom).iter().copied(),
        &query,
    );

    assert_eq!(ids(&results), vec!["7", "8", "12"]);

    Ok(())
}

#[test]
fn price_ascending_orders_the_readymade_tab() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ProductQuery {
        sort: ProductSort::PriceLowToHigh,
        ..ProductQuery::default()
    };

    let results = filter_and_sort(
        catalog.by_kind(ProductKind::Readymade).iter().copied(),
        &query,
    );

    assert_eq!(ids(&results), vec!["2", "3", "4", "5", "1", "6"]);

    Ok(())
}

#[test]
fn highest_rated_orders_the_readymade_tab() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ProductQuery {
        sort: ProductSort::HighestRated,
        ..ProductQuery::default()
    };

    let results = filter_and_sort(
        catalog.by_kind(ProductKind::Readymade).iter().copied(),
        &query,
    );

    assert_eq!(ids(&results), vec!["6", "1", "4", "3", "2", "5"]);

    Ok(())
}

#[test]
fn rating_facet_composes_with_term() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ProductQuery {
        term: Some("curtains".to_string()),
        min_rating: Some(RatingFacet::FourPointFiveUp.threshold()),
        ..ProductQuery::default()
    };

    let results = filter_and_sort(
        catalog.by_kind(ProductKind::Readymade).iter().copied(),
        &query,
    );

    assert!(
        results.iter().all(|product| {
            product
                .rating
                .is_none_or(|rating| rating >= RatingFacet::FourPointFiveUp.threshold())
        }),
        "rated hits must clear the threshold"
    );
    assert!(
        results
            .iter()
            .all(|product| product.name.to_lowercase().contains("curtains")),
        "every hit must match the term"
    );

    Ok(())
}

#[test]
fn company_directory_filters_and_sorts() -> TestResult {
    let catalog = Catalog::builtin()?;

    let karnataka = CompanyQuery {
        location: Some("Karnataka".to_string()),
        ..CompanyQuery::default()
    };
    let names: Vec<&str> = companies::filter_and_sort(catalog.companies(), &karnataka)
        .iter()
        .map(|company| company.name.as_str())
        .collect();

    assert_eq!(names, vec!["Elite Curtain Studio", "Fabric World"]);

    let newest = CompanyQuery {
        sort: CompanySort::NewestFirst,
        ..CompanyQuery::default()
    };
    let by_year = companies::filter_and_sort(catalog.companies(), &newest);
    let years: Vec<u16> = by_year.iter().map(|company| company.established).collect();
    let mut sorted_years = years.clone();

    sorted_years.sort_unstable_by(|a, b| b.cmp(a));

    assert_eq!(years, sorted_years);

    Ok(())
}

#[test]
fn service_directory_filters_by_role_and_status() -> TestResult {
    let catalog = Catalog::builtin()?;
    let query = ServiceQuery {
        role: Some(ServiceRole::Fitter),
        status: Some(Availability::Available),
        ..ServiceQuery::default()
    };

    let names: Vec<&str> = services::filter(catalog.services(), &query)
        .iter()
        .map(|service| service.name.as_str())
        .collect();

    assert_eq!(names, vec!["Priya Sharma", "Sneha Gupta"]);

    Ok(())
}

#[test]
fn keyword_search_groups_results_and_sections() -> TestResult {
    let catalog = Catalog::builtin()?;

    let velvet = search(&catalog, "velvet");
    let hit_ids: Vec<&str> = velvet
        .products
        .iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(hit_ids, vec!["1", "11"]);

    let curtains = search(&catalog, "curtains");

    assert!(curtains.sections.contains(&Section::Readymade));
    assert!(!curtains.products.is_empty());

    let bespoke = search(&catalog, "bespoke");

    assert!(bespoke.products.is_empty());
    assert_eq!(bespoke.sections, vec![Section::Custom]);

    Ok(())
}

#[test]
fn quote_to_cart_flow_keeps_totals_consistent() -> TestResult {
    let catalog = Catalog::builtin()?;
    let detailed = catalog.detailed("1")?;

    let selection = Selection {
        size: Some("7ft".to_string()),
        lining: Some("No Lining".to_string()),
        header: Some("Pinch Pleat".to_string()),
        ..Selection::default()
    };
    let quoted = quote(detailed, &selection, 2)?;

    // 3999 + 1200 - 1000 + 300
    assert_eq!(quoted.unit_price, 4499);
    assert_eq!(quoted.total_price, 8998);

    let mut cart = CartStore::open(MemoryStorage::new());
    let line_id = cart.add_item(quoted.into_cart_draft(detailed.product))?;

    let plain = quote(detailed, &Selection::default(), 1)?;

    cart.add_item(plain.into_cart_draft(detailed.product))?;

    assert_eq!(cart.len(), 2, "same product, two separate lines");
    assert_eq!(cart.total_item_count(), 3);
    assert_eq!(cart.total_price(), 8998 + 3999);

    cart.set_quantity(&line_id, 1)?;

    assert_eq!(cart.total_price(), 4499 + 3999);

    let receipt = CartReceipt::from_store(&cart);

    assert_eq!(receipt.item_count(), 2);

    let mut rendered = Vec::new();

    receipt.write_to(&mut rendered)?;

    assert!(String::from_utf8(rendered)?.contains("(customized)"));

    Ok(())
}

#[test]
fn wishlist_toggle_round_trips_catalog_products() -> TestResult {
    let catalog = Catalog::builtin()?;
    let product = catalog.product("7")?;
    let draft = WishlistDraft {
        product_id: product.id.clone(),
        product_type: product.category,
        name: product.name.clone(),
        image: product.image.clone(),
        price: product.price,
    };

    let mut wishlist = WishlistStore::open(MemoryStorage::new());

    assert!(matches!(wishlist.toggle(draft.clone())?, Toggle::Added(_)));
    assert!(wishlist.is_saved("7"));

    // A plain add while saved is a no-op.
    assert!(wishlist.add_item(draft.clone())?.is_none());
    assert_eq!(wishlist.len(), 1);

    assert!(matches!(wishlist.toggle(draft)?, Toggle::Removed(_)));
    assert!(!wishlist.is_saved("7"));
    assert!(wishlist.is_empty());

    Ok(())
}

#[test]
fn facet_lists_cover_the_fixture() -> TestResult {
    let catalog = Catalog::builtin()?;

    assert_eq!(
        catalog.cities(),
        vec!["Bangalore", "Mumbai", "Delhi", "Chennai"]
    );
    assert_eq!(catalog.retailers().len(), 8);
    assert_eq!(
        catalog.company_regions(),
        vec!["Karnataka", "Maharashtra", "NCR", "Tamil Nadu"]
    );
    assert_eq!(
        catalog.service_locations(),
        vec!["Bangalore", "Mumbai", "Delhi", "Chennai", "Pune"]
    );

    Ok(())
}
