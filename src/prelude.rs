//! Valance prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, CartDraft, CartError, CartLine, CartStore, Customization},
    catalog::{
        Availability, Catalog, CatalogError, Company, Detailed, Product, ProductDetails,
        ProductKind, Service, ServiceRole,
    },
    filter::{
        PriceRange, ProductQuery, ProductSort, RatingFacet, filter_and_sort,
        companies::{CompanyQuery, CompanySort},
        services::ServiceQuery,
    },
    images::canonical_image_name,
    quote::{Quote, QuoteError, Selection, quote},
    receipt::{CartReceipt, ReceiptError, inr},
    search::{SearchResults, Section, search},
    storage::{DirStorage, MemoryStorage, Storage, StorageError},
    tags::TagSet,
    wishlist::{
        Toggle, WISHLIST_STORAGE_KEY, WishlistDraft, WishlistError, WishlistItem, WishlistStore,
    },
};
