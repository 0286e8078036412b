//! Quotes
//!
//! Composes the unit price for a customized product from its detail-page
//! variants: base price plus the deltas of the selected size, lining and
//! header. The selected color never carries a delta. The resulting quote
//! can be turned into a cart draft, freezing the price and the
//! customization snapshot at the moment of insertion.

use thiserror::Error;

use crate::{
    cart::{CartDraft, Customization},
    catalog::{Detailed, Product},
};

/// Errors resolving a selection against a product's variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// No size variant with the given value.
    #[error("unknown size: {0}")]
    UnknownSize(String),

    /// No color variant with the given name.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// No lining variant with the given name.
    #[error("unknown lining: {0}")]
    UnknownLining(String),

    /// No header variant with the given name.
    #[error("unknown header: {0}")]
    UnknownHeader(String),
}

/// Variant choices for a quote. Each field selects by the variant's
/// stable value or name; `None` leaves that dimension uncustomized.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Size variant value, e.g. "6ft".
    pub size: Option<String>,

    /// Color variant name, e.g. "Midnight Black".
    pub color: Option<String>,

    /// Lining variant name, e.g. "Blackout".
    pub lining: Option<String>,

    /// Header variant name, e.g. "Eyelet".
    pub header: Option<String>,
}

/// A priced selection, ready to become a cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Unit price: base price plus selected variant deltas.
    pub unit_price: i64,

    /// Number of units quoted.
    pub quantity: u32,

    /// `unit_price * quantity`.
    pub total_price: i64,

    /// Snapshot of the selected variants.
    pub customizations: Customization,
}

impl Quote {
    /// Build a cart draft from this quote, freezing its prices and
    /// customization snapshot.
    #[must_use]
    pub fn into_cart_draft(self, product: &Product) -> CartDraft {
        CartDraft {
            product_id: product.id.clone(),
            product_type: product.category,
            name: product.name.clone(),
            image: product.image.clone(),
            quantity: self.quantity,
            price: self.unit_price,
            total_price: self.total_price,
            customizations: Some(self.customizations),
        }
    }
}

/// Price a selection against a product and its details.
///
/// # Errors
///
/// Returns a [`QuoteError`] naming the first selection entry that does
/// not resolve to a variant.
pub fn quote(detailed: Detailed<'_>, selection: &Selection, quantity: u32) -> Result<Quote, QuoteError> {
    let details = detailed.details;

    let size = selection
        .size
        .as_deref()
        .map(|value| {
            details
                .sizes
                .iter()
                .find(|variant| variant.value == value)
                .cloned()
                .ok_or_else(|| QuoteError::UnknownSize(value.to_string()))
        })
        .transpose()?;

    let color = selection
        .color
        .as_deref()
        .map(|name| {
            details
                .colors
                .iter()
                .find(|variant| variant.name == name)
                .cloned()
                .ok_or_else(|| QuoteError::UnknownColor(name.to_string()))
        })
        .transpose()?;

    let lining = selection
        .lining
        .as_deref()
        .map(|name| {
            details
                .lining
                .iter()
                .find(|variant| variant.name == name)
                .cloned()
                .ok_or_else(|| QuoteError::UnknownLining(name.to_string()))
        })
        .transpose()?;

    let header = selection
        .header
        .as_deref()
        .map(|name| {
            details
                .headers
                .iter()
                .find(|variant| variant.name == name)
                .cloned()
                .ok_or_else(|| QuoteError::UnknownHeader(name.to_string()))
        })
        .transpose()?;

    let unit_price = detailed.product.price
        + size.as_ref().map_or(0, |variant| variant.price_delta)
        + lining.as_ref().map_or(0, |variant| variant.price_delta)
        + header.as_ref().map_or(0, |variant| variant.price_delta);

    Ok(Quote {
        unit_price,
        quantity,
        total_price: unit_price * i64::from(quantity),
        customizations: Customization {
            size,
            color,
            lining,
            header,
        },
    })
}
