//! Checkout Example
//!
//! Quotes a customized product into the cart, adds a second plain line for
//! the same product, prints the receipt, and demonstrates the wishlist
//! toggle.
//!
//! Run with: `cargo run --example checkout`

use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use valance::{
    cart::CartStore,
    catalog::Catalog,
    quote::{Selection, quote},
    receipt::CartReceipt,
    storage::MemoryStorage,
    wishlist::{Toggle, WishlistDraft, WishlistStore},
};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = Catalog::builtin()?;
    let detailed = catalog.detailed("1")?;

    let selection = Selection {
        size: Some("7ft".to_string()),
        color: Some("Royal Blue".to_string()),
        lining: Some("Standard".to_string()),
        header: Some("Eyelet".to_string()),
    };
    let customized = quote(detailed, &selection, 2)?;

    let mut cart = CartStore::open(MemoryStorage::new());

    cart.add_item(customized.into_cart_draft(detailed.product))?;

    // Same product again, uncustomized: a separate line, not a merge.
    let plain = quote(detailed, &Selection::default(), 1)?;

    cart.add_item(plain.into_cart_draft(detailed.product))?;

    CartReceipt::from_store(&cart).write_to(io::stdout())?;

    let mut wishlist = WishlistStore::open(MemoryStorage::new());
    let saved = catalog.product("7")?;
    let draft = WishlistDraft {
        product_id: saved.id.clone(),
        product_type: saved.category,
        name: saved.name.clone(),
        image: saved.image.clone(),
        price: saved.price,
    };

    match wishlist.toggle(draft.clone())? {
        Toggle::Added(_) => println!("Saved \"{}\" for later", saved.name),
        Toggle::Removed(_) => println!("Removed \"{}\"", saved.name),
    }

    match wishlist.toggle(draft)? {
        Toggle::Added(_) => println!("Saved \"{}\" for later", saved.name),
        Toggle::Removed(_) => println!("Removed \"{}\" again", saved.name),
    }

    Ok(())
}
