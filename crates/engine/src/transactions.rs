//! Transactions of the account feed and their decoding.
use std::{fmt, str::FromStr};

use api_types::feed::FeedItem;

use crate::{DecodeError, Money};

/// Whether money entered or left the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Wire values accepted by [`Direction::from_str`], for error messages.
    pub const ACCEPTED: &'static str = "[IN, OUT]";

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DecodeError;

    /// Exact, case-sensitive match on `IN` / `OUT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Direction::In),
            "OUT" => Ok(Direction::Out),
            other => Err(DecodeError::InvalidValue {
                field: "direction",
                value: other.to_string(),
                accepted: Self::ACCEPTED,
            }),
        }
    }
}

/// One feed item reduced to what the roundup needs.
///
/// `amount` is the magnitude of the movement; `direction` carries the sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub amount: Money,
    pub direction: Direction,
}

impl Transaction {
    pub fn new(amount: Money, direction: Direction) -> Self {
        Self { amount, direction }
    }

    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Out
    }
}

impl TryFrom<FeedItem> for Transaction {
    type Error = DecodeError;

    fn try_from(item: FeedItem) -> Result<Self, Self::Error> {
        let minor_units = item
            .amount
            .and_then(|amount| amount.minor_units)
            .ok_or(DecodeError::MissingNumber("amount.minorUnits"))?;

        let direction = item
            .direction
            .ok_or(DecodeError::MissingField("direction"))?
            .parse()?;

        Ok(Transaction {
            amount: Money::from_minor_units(minor_units),
            direction,
        })
    }
}
