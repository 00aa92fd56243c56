//! Spoken bin names mapped to the category labels used in schedule descriptions.

use std::fmt;

use serde::Serialize;

/// Synonym table. Keys are lower-case; lookup is exact.
const BIN_TYPES: &[(&str, &str)] = &[
    ("red", "red box"),
    ("red bin", "red box"),
    ("red box", "red box"),
    ("plastic", "red box"),
    ("plastics", "red box"),
    ("green", "residual waste bin"),
    ("residual waste", "residual waste bin"),
    ("residual", "residual waste bin"),
    ("black", "black box"),
    ("black box", "black box"),
    ("glass", "black box"),
    ("metal", "black box"),
    ("blue bin", "blue bin"),
    ("blue", "blue bin"),
    ("paper", "blue bin"),
    ("garden waste", "brown bin"),
    ("brown bin", "brown bin"),
    ("brown", "brown bin"),
    ("food", "food bin"),
    ("food bin", "food bin"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// Canonical collection category, matched as a substring of event descriptions.
pub struct BinCategory(&'static str);

impl BinCategory {
    /// Label as it appears in schedule descriptions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BinCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.0)
    }
}

/// Look up a raw term exactly as given.
///
/// Callers are expected to lower-case and trim first; see [`normalize_spoken`].
#[must_use]
pub fn normalize(raw: &str) -> Option<BinCategory> {
    BIN_TYPES
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, category)| BinCategory(category))
}

/// Lower-case a spoken term, trim it, and collapse inner whitespace.
#[must_use]
pub fn clean_spoken(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`clean_spoken`] followed by [`normalize`].
#[must_use]
pub fn normalize_spoken(raw: &str) -> Option<BinCategory> {
    normalize(&clean_spoken(raw))
}

/// Every distinct canonical category, in table order.
pub fn categories() -> impl Iterator<Item = BinCategory> {
    BIN_TYPES
        .iter()
        .enumerate()
        .filter(|(idx, (_, category))| {
            BIN_TYPES
                .iter()
                .take(*idx)
                .all(|(_, earlier)| earlier != category)
        })
        .map(|(_, (_, category))| BinCategory(category))
}
