//! Storefront Example
//!
//! Lists the ready-made catalog through the filter engine and runs a
//! keyword search when a term is given. Facets and the sort mode come
//! from the command line.
//!
//! Run with: `cargo run --example storefront -- --city Bangalore --sort price-asc`

use anyhow::Result;
use clap::Parser;

use valance::{
    catalog::{Catalog, ProductKind},
    filter::filter_and_sort,
    receipt::inr,
    search::search,
    utils::DemoArgs,
};

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
fn main() -> Result<()> {
    let args = DemoArgs::parse();
    let catalog = Catalog::builtin()?;
    let query = args.product_query();

    let readymade = catalog.by_kind(ProductKind::Readymade);
    let results = filter_and_sort(readymade.iter().copied(), &query);

    println!(
        "{} of {} ready-made curtains match",
        results.len(),
        readymade.len()
    );

    for product in &results {
        let rating = product
            .rating
            .map_or_else(|| "unrated".to_string(), |rating| format!("rated {rating}"));

        println!(
            "  {} - {} ({}, {}, {rating})",
            product.name,
            inr(product.price),
            product.retailer,
            product.city,
        );
    }

    if let Some(term) = &args.term {
        let hits = search(&catalog, term);

        println!();
        println!(
            "Search \"{term}\": {} products, {} services, {} companies",
            hits.products.len(),
            hits.services.len(),
            hits.companies.len(),
        );

        for section in &hits.sections {
            println!("  see also: {}", section.label());
        }
    }

    Ok(())
}
