//! Status enums for orders and payments.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order fulfilment status.
///
/// Both transitions are always legal and only happen on explicit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How much of an order's value has been received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing outstanding.
    Paid,
    /// Some money received, some still outstanding.
    Partial,
    /// Nothing received yet.
    Unpaid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Partial => write!(f, "Partial"),
            Self::Unpaid => write!(f, "Unpaid"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(OrderStatus::Pending.toggled(), OrderStatus::Completed);
        assert_eq!(OrderStatus::Completed.toggled(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_from_str() {
        assert_eq!("Pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!(
            "completed".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completed
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_payment_status_display() {
        assert_eq!(PaymentStatus::Paid.to_string(), "Paid");
        assert_eq!(PaymentStatus::Partial.to_string(), "Partial");
        assert_eq!(PaymentStatus::Unpaid.to_string(), "Unpaid");
    }
}
