//! Wishlist
//!
//! The wishlist store owns a collection of saved products, deduplicated by
//! product id: adding an already-saved product is a no-op. Items are
//! removed by their own generated id, and the store exposes an explicit
//! [`WishlistStore::toggle`] so callers do not have to reconstruct
//! add-or-remove from the primitives.

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::records::fresh_id,
    catalog::ProductKind,
    images::canonical_image_name,
    storage::{Storage, StorageError},
};

pub mod records;

/// Key the wishlist snapshot persists under.
pub const WISHLIST_STORAGE_KEY: &str = "wishlist";

/// Errors related to wishlist mutations.
///
/// Same contract as the cart: reads degrade to an empty collection, and
/// mutations only fail when the snapshot cannot be written back.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// Persisting the snapshot failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The snapshot could not be encoded as JSON.
    #[error("failed to encode wishlist snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A saved product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Generated item id, unique per insertion.
    pub id: String,

    /// Catalog id of the saved product. At most one item exists per
    /// product id.
    pub product_id: String,

    /// Listing tab the product came from.
    pub product_type: ProductKind,

    /// Display name, frozen at insertion.
    pub name: String,

    /// Canonical image filename.
    pub image: String,

    /// Price at the time the product was saved.
    pub price: i64,

    /// When the product was saved.
    pub added_at: Timestamp,
}

/// Draft for a new wishlist item, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct WishlistDraft {
    /// Catalog id of the product.
    pub product_id: String,

    /// Listing tab the product came from.
    pub product_type: ProductKind,

    /// Display name.
    pub name: String,

    /// Raw image reference; normalized at insertion.
    pub image: String,

    /// Price at the time of saving.
    pub price: i64,
}

/// Outcome of a [`WishlistStore::toggle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// The product was not saved; a new item was added with this id.
    Added(String),
    /// The product was saved; the item with this id was removed.
    Removed(String),
}

/// The wishlist store.
#[derive(Debug)]
pub struct WishlistStore<S: Storage> {
    items: Vec<WishlistItem>,
    storage: S,
}

impl<S: Storage> WishlistStore<S> {
    /// Open the wishlist, rehydrating any persisted snapshot.
    ///
    /// Malformed or unreadable snapshots are logged and treated as an
    /// empty wishlist; opening never fails.
    pub fn open(storage: S) -> Self {
        let items = match storage.load(WISHLIST_STORAGE_KEY) {
            Ok(Some(raw)) => match records::rehydrate(&raw) {
                Ok(items) => {
                    debug!(count = items.len(), "rehydrated wishlist snapshot");

                    items
                }
                Err(error) => {
                    warn!(%error, "discarding malformed wishlist snapshot");

                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "failed to read wishlist snapshot");

                Vec::new()
            }
        };

        Self { items, storage }
    }

    /// Save a product, returning the new item id, or `None` when the
    /// product is already saved (the add is idempotent by product id).
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the updated snapshot cannot be
    /// persisted.
    pub fn add_item(&mut self, draft: WishlistDraft) -> Result<Option<String>, WishlistError> {
        if self.is_saved(&draft.product_id) {
            return Ok(None);
        }

        self.insert(draft).map(Some)
    }

    fn insert(&mut self, draft: WishlistDraft) -> Result<String, WishlistError> {
        let item = WishlistItem {
            id: fresh_id(),
            product_id: draft.product_id,
            product_type: draft.product_type,
            name: draft.name,
            image: canonical_image_name(Some(&draft.image)),
            price: draft.price,
            added_at: Timestamp::now(),
        };
        let id = item.id.clone();

        self.items.push(item);
        self.persist()?;

        Ok(id)
    }

    /// Remove the item with the given item id (not product id). Removing
    /// an unknown id is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the updated snapshot cannot be
    /// persisted.
    pub fn remove_item(&mut self, item_id: &str) -> Result<(), WishlistError> {
        let before = self.items.len();

        self.items.retain(|item| item.id != item_id);

        if self.items.len() == before {
            return Ok(());
        }

        self.persist()
    }

    /// Check whether a product is saved.
    #[must_use]
    pub fn is_saved(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    /// Find the saved item for a product id, when one exists.
    #[must_use]
    pub fn item_for_product(&self, product_id: &str) -> Option<&WishlistItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Save the product if it is not saved, remove it if it is.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the updated snapshot cannot be
    /// persisted.
    pub fn toggle(&mut self, draft: WishlistDraft) -> Result<Toggle, WishlistError> {
        if let Some(existing) = self.item_for_product(&draft.product_id) {
            let id = existing.id.clone();

            self.remove_item(&id)?;

            return Ok(Toggle::Removed(id));
        }

        self.insert(draft).map(Toggle::Added)
    }

    /// Remove every saved product.
    ///
    /// # Errors
    ///
    /// Returns a [`WishlistError`] if the updated snapshot cannot be
    /// persisted.
    pub fn clear(&mut self) -> Result<(), WishlistError> {
        self.items.clear();

        self.persist()
    }

    /// The saved items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of saved items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The storage backend the wishlist writes through.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), WishlistError> {
        let snapshot = serde_json::to_string(&self.items)?;

        if let Err(error) = self.storage.save(WISHLIST_STORAGE_KEY, &snapshot) {
            warn!(%error, "failed to persist wishlist snapshot");

            return Err(error.into());
        }

        Ok(())
    }
}
