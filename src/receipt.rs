//! Receipt
//!
//! Renders a cart as a terminal table with a short summary block. Prices
//! are stored as plain integers throughout the crate; this is the one
//! place they are dressed up as money for display.

use std::io;

use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::{CartLine, CartStore},
    storage::Storage,
};

/// Errors that can occur while writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output sink could not be written.
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Format an amount as Indian rupees.
#[must_use]
pub fn inr(amount: i64) -> Money<'static, iso::Currency> {
    Money::from_major(amount, iso::INR)
}

/// A renderable snapshot of the cart's lines and totals.
#[derive(Debug, Clone)]
pub struct CartReceipt<'a> {
    lines: &'a [CartLine],
    item_count: u64,
    total: i64,
}

impl<'a> CartReceipt<'a> {
    /// Build a receipt over the given lines.
    #[must_use]
    pub fn new(lines: &'a [CartLine]) -> Self {
        Self {
            lines,
            item_count: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            total: lines.iter().map(|line| line.total_price).sum(),
        }
    }

    /// Build a receipt over a cart store's current lines.
    #[must_use]
    pub fn from_store<S: Storage>(cart: &'a CartStore<S>) -> Self {
        Self::new(cart.items())
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Grand total across all lines, as money.
    #[must_use]
    pub fn total(&self) -> Money<'static, iso::Currency> {
        inr(self.total)
    }

    /// Write the receipt table and summary to the given sink.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the sink cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Type", "Qty", "Unit Price", "Total"]);

        for line in self.lines {
            let name = if line.customizations.is_some() {
                format!("{} (customized)", line.name)
            } else {
                line.name.clone()
            };

            builder.push_record([
                name,
                line.product_type.label().to_string(),
                line.quantity.to_string(),
                inr(line.price).to_string(),
                inr(line.total_price).to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::sharp());
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Items: {}", self.item_count)?;
        writeln!(out, "Total: {}", self.total())?;

        Ok(())
    }
}
