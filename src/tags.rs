//! Product tags
//!
//! A small sorted, deduplicated tag set used for product badges and
//! tag-based lookups. Backed by a `SmallVec` since products rarely carry
//! more than a handful of tags.

use smallvec::SmallVec;

use serde::{Deserialize, Serialize};

/// A sorted, deduplicated set of product tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: SmallVec<[String; 5]>,
}

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: SmallVec::new(),
        }
    }

    /// Create a tag set from string slices.
    #[must_use]
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::from(tags.iter().map(ToString::to_string).collect::<Vec<_>>())
    }

    /// Check whether the set contains the given tag.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|entry| entry.as_str().cmp(tag)).is_ok()
    }

    /// Add a tag, keeping the set sorted and deduplicated.
    pub fn add(&mut self, tag: &str) {
        let tag_string = tag.to_string();

        if let Err(pos) = self.tags.binary_search(&tag_string) {
            self.tags.insert(pos, tag_string);
        }
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut tags: SmallVec<[String; 5]> = tags.into_iter().collect();

        tags.sort();
        tags.dedup();

        Self { tags }
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags.into_vec()
    }
}
