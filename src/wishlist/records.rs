//! Wishlist records
//!
//! Lenient shapes for persisted wishlist snapshots, mirroring the cart's
//! migration pass. Timestamps that are missing or unreadable rehydrate to
//! the Unix epoch so repeated loads stay deterministic.

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    cart::records::{LooseNumber, fresh_id, product_kind},
    images::canonical_image_name,
};

use super::WishlistItem;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistItemRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    price: Option<LooseNumber>,
    #[serde(default)]
    added_at: Option<String>,
}

impl WishlistItemRecord {
    fn into_item(self) -> WishlistItem {
        let added_at = self
            .added_at
            .as_deref()
            .and_then(|raw| raw.parse::<Timestamp>().ok())
            .unwrap_or(Timestamp::UNIX_EPOCH);

        WishlistItem {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(fresh_id),
            product_id: self.product_id.unwrap_or_default(),
            product_type: product_kind(self.product_type.as_deref()),
            name: self.name.unwrap_or_default(),
            image: canonical_image_name(self.image.as_deref()),
            price: self
                .price
                .as_ref()
                .and_then(LooseNumber::as_i64)
                .unwrap_or(0),
            added_at,
        }
    }
}

/// Decode a persisted snapshot, migrating legacy shapes.
///
/// # Errors
///
/// Returns the decode error when the snapshot is not a JSON array of
/// objects; the caller treats that as "no saved wishlist".
pub(crate) fn rehydrate(raw: &str) -> Result<Vec<WishlistItem>, serde_json::Error> {
    let records: Vec<WishlistItemRecord> = serde_json::from_str(raw)?;

    Ok(records.into_iter().map(WishlistItemRecord::into_item).collect())
}
