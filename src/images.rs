//! Image references
//!
//! Product images are looked up by bare filename in the asset collection.
//! Persisted state and older seed data may carry directory prefixes or
//! legacy naming, so everything funnels through [`canonical_image_name`]
//! before it is stored or compared.

/// Fallback filename used when a record carries no usable image reference.
pub const PLACEHOLDER_IMAGE: &str = "readymade1.png";

const IMAGE_DIR_PREFIX: &str = "/images/";
const LEGACY_PREFIX: &str = "readymade_curtain";
const LEGACY_SUFFIX: &str = ".png";

/// Normalize a possibly-legacy image reference to its canonical filename.
///
/// Empty or missing references resolve to [`PLACEHOLDER_IMAGE`]. A leading
/// `/images/` directory prefix is stripped, and legacy
/// `readymade_curtain<n>.png` names are rewritten to `readymade<n>.png`.
/// Anything else is assumed canonical and passes through unchanged, so the
/// function is idempotent.
#[must_use]
pub fn canonical_image_name(reference: Option<&str>) -> String {
    let Some(reference) = reference else {
        return PLACEHOLDER_IMAGE.to_string();
    };

    if reference.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }

    let mut name = reference;
    while let Some(stripped) = name.strip_prefix(IMAGE_DIR_PREFIX) {
        name = stripped;
    }

    rewrite_legacy_name(name).unwrap_or_else(|| name.to_string())
}

fn rewrite_legacy_name(name: &str) -> Option<String> {
    let digits = name
        .strip_prefix(LEGACY_PREFIX)?
        .strip_suffix(LEGACY_SUFFIX)?;

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some(format!("readymade{digits}{LEGACY_SUFFIX}"))
}
