//! Cart records
//!
//! Lenient shapes for persisted cart snapshots and the one-shot migration
//! pass that turns them into typed lines. Older clients persisted numeric
//! fields as strings and image references in legacy forms; everything is
//! repaired here at load time, never in steady-state mutation code.

use serde::{Deserialize, de::IgnoredAny};
use serde_json::Value;
use uuid::Uuid;

use crate::{catalog::ProductKind, images::canonical_image_name};

use super::{CartLine, Customization};

/// A number that older clients may have persisted as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseNumber {
    /// A real JSON number.
    Number(serde_json::Number),
    /// A number encoded as a string.
    Text(String),
    /// Anything else; treated as absent.
    Other(IgnoredAny),
}

impl LooseNumber {
    /// Integer value, if the payload is an integer or parses as one.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
            Self::Other(_) => None,
        }
    }

    /// Whether the payload was a real JSON number.
    pub(crate) fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Resolve a persisted product-type marker; unknown markers fall back to
/// ready-made, the only kind older snapshots contained.
pub(crate) fn product_kind(marker: Option<&str>) -> ProductKind {
    match marker {
        Some(marker) if marker.eq_ignore_ascii_case("custom") => ProductKind::Custom,
        _ => ProductKind::Readymade,
    }
}

/// Generate a fresh line identifier.
pub(crate) fn fresh_id() -> String {
    Uuid::now_v7().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLineRecord {
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
    quantity: Option<LooseNumber>,
    #[serde(default)]
    price: Option<LooseNumber>,
    #[serde(default)]
    total_price: Option<LooseNumber>,
    #[serde(default)]
    customizations: Option<Value>,
}

impl CartLineRecord {
    fn into_line(self) -> CartLine {
        let quantity = match self.quantity.as_ref().and_then(LooseNumber::as_i64) {
            Some(value) => u32::try_from(value).unwrap_or(0),
            None => 1,
        };

        let price = self
            .price
            .as_ref()
            .and_then(LooseNumber::as_i64)
            .unwrap_or(0);

        // Persisted totals are only trusted when they were real numbers;
        // everything else is recomputed from the repaired fields.
        let total_price = self
            .total_price
            .as_ref()
            .filter(|total| total.is_number())
            .and_then(LooseNumber::as_i64)
            .unwrap_or_else(|| price * i64::from(quantity));

        CartLine {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(fresh_id),
            product_id: self.product_id.unwrap_or_default(),
            product_type: product_kind(self.product_type.as_deref()),
            name: self.name.unwrap_or_default(),
            image: canonical_image_name(self.image.as_deref()),
            quantity,
            price,
            total_price,
            customizations: self
                .customizations
                .and_then(|value| serde_json::from_value::<Customization>(value).ok()),
        }
    }
}

/// Decode a persisted snapshot, migrating legacy shapes.
///
/// # Errors
///
/// Returns the decode error when the snapshot is not a JSON array of
/// objects; the caller treats that as "no saved cart".
pub(crate) fn rehydrate(raw: &str) -> Result<Vec<CartLine>, serde_json::Error> {
    let records: Vec<CartLineRecord> = serde_json::from_str(raw)?;

    Ok(records.into_iter().map(CartLineRecord::into_line).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_snapshot_is_repaired() {
        let raw = r#"[{"image":"readymade_curtain3.png","price":1000,"quantity":"2"}]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");

        assert_eq!(line.image, "readymade3.png");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, 1000);
        assert_eq!(line.total_price, 2000);
        assert!(!line.id.is_empty(), "missing ids are regenerated");
    }

    #[test]
    fn numeric_total_is_trusted_verbatim() {
        let raw = r#"[{"price":500,"quantity":3,"totalPrice":1500}]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");

        assert_eq!(line.total_price, 1500);
    }

    #[test]
    fn stringly_total_is_recomputed() {
        let raw = r#"[{"price":500,"quantity":2,"totalPrice":"999"}]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");

        assert_eq!(line.total_price, 1000);
    }

    #[test]
    fn non_numeric_quantity_defaults_to_one() {
        let raw = r#"[{"price":700,"quantity":"lots"}]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");

        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_price, 700);
    }

    #[test]
    fn product_type_markers_resolve_leniently() {
        assert_eq!(product_kind(Some("custom")), ProductKind::Custom);
        assert_eq!(product_kind(Some("Custom")), ProductKind::Custom);
        assert_eq!(product_kind(Some("readymade")), ProductKind::Readymade);
        assert_eq!(product_kind(Some("mystery")), ProductKind::Readymade);
        assert_eq!(product_kind(None), ProductKind::Readymade);
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(rehydrate("not json").is_err());
        assert!(rehydrate(r#"{"image":"x"}"#).is_err());
    }

    #[test]
    fn customization_snapshot_survives_rehydration() {
        let raw = r#"[{
            "price": 4599,
            "quantity": 1,
            "customizations": {
                "size": {"label": "6ft Width", "value": "6ft", "price_delta": 600}
            }
        }]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");
        let customizations = line
            .customizations
            .as_ref()
            .expect("expected customizations");
        let size = customizations.size.as_ref().expect("expected a size");

        assert_eq!(size.value, "6ft");
        assert_eq!(size.price_delta, 600);
    }

    #[test]
    fn unreadable_customizations_are_dropped() {
        let raw = r#"[{"price": 100, "quantity": 1, "customizations": "old-format"}]"#;

        let lines = rehydrate(raw).expect("snapshot should decode");
        let line = lines.first().expect("expected one line");

        assert!(line.customizations.is_none());
    }
}
