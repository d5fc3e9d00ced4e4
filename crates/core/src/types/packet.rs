//! Packet sizes sold by the business.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PacketSize`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketSizeError {
    /// The input is not a number of grams.
    #[error("packet size must be a whole number of grams, got {0:?}")]
    NotANumber(String),
    /// The gram value is not one of the sizes on offer.
    #[error("unsupported packet size {0}g (expected one of 50, 100, 250, 500, 1000)")]
    Unsupported(u32),
}

/// One of the fixed packet sizes, in grams.
///
/// Serialized as the plain gram count, so it can be used as a JSON map key
/// (`{"100": "25"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PacketSize {
    G50,
    G100,
    G250,
    G500,
    G1000,
}

impl PacketSize {
    /// Every packet size, smallest first.
    pub const ALL: [Self; 5] = [Self::G50, Self::G100, Self::G250, Self::G500, Self::G1000];

    /// Weight of one packet in grams.
    #[must_use]
    pub const fn grams(self) -> u32 {
        match self {
            Self::G50 => 50,
            Self::G100 => 100,
            Self::G250 => 250,
            Self::G500 => 500,
            Self::G1000 => 1000,
        }
    }

    /// Weight of one packet in grams, as a decimal.
    #[must_use]
    pub fn grams_decimal(self) -> Decimal {
        Decimal::from(self.grams())
    }

    /// Look up a packet size by its gram value.
    ///
    /// # Errors
    ///
    /// Returns [`PacketSizeError::Unsupported`] when no packet of that weight
    /// is sold.
    pub const fn from_grams(grams: u32) -> Result<Self, PacketSizeError> {
        match grams {
            50 => Ok(Self::G50),
            100 => Ok(Self::G100),
            250 => Ok(Self::G250),
            500 => Ok(Self::G500),
            1000 => Ok(Self::G1000),
            other => Err(PacketSizeError::Unsupported(other)),
        }
    }
}

impl TryFrom<u32> for PacketSize {
    type Error = PacketSizeError;

    fn try_from(grams: u32) -> Result<Self, Self::Error> {
        Self::from_grams(grams)
    }
}

impl From<PacketSize> for u32 {
    fn from(size: PacketSize) -> Self {
        size.grams()
    }
}

impl fmt::Display for PacketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.grams())
    }
}

impl std::str::FromStr for PacketSize {
    type Err = PacketSizeError;

    /// Accepts `250` or `250g`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('g')
            .or_else(|| trimmed.strip_suffix('G'))
            .unwrap_or(trimmed);
        let grams = digits
            .parse::<u32>()
            .map_err(|_| PacketSizeError::NotANumber(s.to_owned()))?;
        Self::from_grams(grams)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_by_weight() {
        let grams: Vec<u32> = PacketSize::ALL.iter().map(|s| s.grams()).collect();
        assert_eq!(grams, vec![50, 100, 250, 500, 1000]);
    }

    #[test]
    fn test_parse_with_and_without_suffix() {
        assert_eq!("250".parse::<PacketSize>().unwrap(), PacketSize::G250);
        assert_eq!("1000g".parse::<PacketSize>().unwrap(), PacketSize::G1000);
        assert_eq!(" 50G ".parse::<PacketSize>().unwrap(), PacketSize::G50);
    }

    #[test]
    fn test_parse_unsupported() {
        assert_eq!(
            "300".parse::<PacketSize>(),
            Err(PacketSizeError::Unsupported(300))
        );
        assert!(matches!(
            "abc".parse::<PacketSize>(),
            Err(PacketSizeError::NotANumber(_))
        ));
    }

    #[test]
    fn test_serde_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(PacketSize::G100, 2_u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"100":2}"#);

        let parsed: std::collections::BTreeMap<PacketSize, u32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_deserialize_rejects_unknown_size() {
        assert!(serde_json::from_str::<PacketSize>("75").is_err());
    }
}
