//! Product status tags.
//!
//! The catalog screen groups products into coarse "status tabs". The remote
//! catalog spells them out as display strings (`"Best Sales"`), which is
//! also how they are serialized.

use serde::{Deserialize, Serialize};

/// Coarse product classification used as a filter facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    #[serde(rename = "Best Sales")]
    BestSales,
    #[serde(rename = "Best Matched")]
    BestMatched,
    #[serde(rename = "Popular")]
    Popular,
    /// Any tag the storefront has no tab for. Never selected by a tab filter.
    #[default]
    #[serde(other)]
    Other,
}

impl ProductStatus {
    /// Tabs in the order the catalog screen shows them.
    pub const TABS: [Self; 3] = [Self::BestSales, Self::BestMatched, Self::Popular];

    /// Display label (also the wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BestSales => "Best Sales",
            Self::BestMatched => "Best Matched",
            Self::Popular => "Popular",
            Self::Other => "Other",
        }
    }

    /// URL-safe slug used in query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BestSales => "best-sales",
            Self::BestMatched => "best-matched",
            Self::Popular => "popular",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    /// Accepts either the label (`Best Sales`) or the slug (`best-sales`),
    /// case-insensitively. Only real tabs parse; `Other` is never a choice.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::TABS
            .into_iter()
            .find(|tab| {
                tab.label().eq_ignore_ascii_case(wanted) || tab.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("invalid product status: {s}"))
    }
}
