//! Pricing tiers: product flavours and customer classes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A named pricing tier such as `sada`, `peri-peri`, `cheese`, `retail` or
/// `wholesale`.
///
/// Tags are normalized on construction (trimmed, lowercased, inner
/// whitespace and underscores collapsed to `-`), so `"Peri Peri"` and
/// `"peri_peri"` name the same tier. Unknown tags are valid; they simply
/// have no built-in price column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Variant(String);

impl Variant {
    pub const SADA: &'static str = "sada";
    pub const PERI_PERI: &'static str = "peri-peri";
    pub const CHEESE: &'static str = "cheese";
    pub const RETAIL: &'static str = "retail";
    pub const WHOLESALE: &'static str = "wholesale";

    /// Create a variant from a free-form tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let normalized = tag
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        Self(normalized)
    }

    /// Returns the normalized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The coarse category used by the linear price fallback.
    #[must_use]
    pub fn category(&self) -> PriceCategory {
        if self.0 == Self::WHOLESALE || self.0.starts_with("wholesale-") {
            PriceCategory::Wholesale
        } else {
            PriceCategory::Retail
        }
    }
}

impl From<String> for Variant {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<&str> for Variant {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<Variant> for String {
    fn from(variant: Variant) -> Self {
        variant.0
    }
}

impl AsRef<str> for Variant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Coarse price category, selecting the per-gram rate of the last-resort
/// price formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    #[default]
    Retail,
    Wholesale,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(Variant::new("Peri Peri").as_str(), "peri-peri");
        assert_eq!(Variant::new("  peri_peri ").as_str(), "peri-peri");
        assert_eq!(Variant::new("CHEESE").as_str(), "cheese");
    }

    #[test]
    fn test_category() {
        assert_eq!(Variant::new("wholesale").category(), PriceCategory::Wholesale);
        assert_eq!(
            Variant::new("Wholesale Cheese").category(),
            PriceCategory::Wholesale
        );
        assert_eq!(Variant::new("sada").category(), PriceCategory::Retail);
        assert_eq!(Variant::new("mystery").category(), PriceCategory::Retail);
    }

    #[test]
    fn test_serde_normalizes_on_read() {
        let variant: Variant = serde_json::from_str("\"Peri Peri\"").unwrap();
        assert_eq!(variant.as_str(), Variant::PERI_PERI);
    }
}
