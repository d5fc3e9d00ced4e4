//! Core types for Snack Ledger.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod packet;
pub mod status;
pub mod variant;

pub use id::*;
pub use packet::{PacketSize, PacketSizeError};
pub use status::*;
pub use variant::{PriceCategory, Variant};
