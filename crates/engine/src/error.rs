//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`EngineError`] for invalid domain values built locally (currency
//!   codes).
//! - [`DecodeError`] when a remote payload fails structural validation.
//! - [`ApiError`] for every failure of a [`BankApi`] call, tagged with the
//!   [`Capability`] that was being invoked.
//!
//!  [`BankApi`]: crate::BankApi
use std::fmt;

use thiserror::Error;

/// Boxed low-level cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// A remote payload that does not have the expected shape.
///
/// Messages name the offending field with a JSON path relative to the
/// decoded record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("a numeric value for $.{0} is required")]
    MissingNumber(&'static str),
    #[error("a value for $.{0} is required")]
    MissingField(&'static str),
    #[error("invalid value {value:?} for $.{field}, accepted values: {accepted}")]
    InvalidValue {
        field: &'static str,
        value: String,
        accepted: &'static str,
    },
    #[error("unsupported currency {0:?} for $.currency")]
    UnsupportedCurrency(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Remote capability a [`BankApi`](crate::BankApi) call exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Accounts,
    TransactionFeed,
    SavingsGoalTransfer,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Accounts => "accounts",
            Capability::TransactionFeed => "transaction feed",
            Capability::SavingsGoalTransfer => "savings goal transfer",
        })
    }
}

/// Failure of a remote banking call.
///
/// None of these are recovered locally: a run stops at the first one.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The base endpoint is not a usable absolute URL. Raised before any
    /// network access.
    #[error("invalid base url: {0}")]
    Configuration(String),
    #[error("could not reach the {capability} api: {source}")]
    Transport {
        capability: Capability,
        #[source]
        source: BoxError,
    },
    #[error("status code {status} returned by {url}")]
    UnexpectedStatus {
        capability: Capability,
        status: u16,
        url: String,
    },
    #[error("could not decode the {capability} response: {source}")]
    Decode {
        capability: Capability,
        #[source]
        source: DecodeError,
    },
}

impl ApiError {
    /// The capability that failed, if the error happened past configuration.
    #[must_use]
    pub fn capability(&self) -> Option<Capability> {
        match self {
            ApiError::Configuration(_) => None,
            ApiError::Transport { capability, .. }
            | ApiError::UnexpectedStatus { capability, .. }
            | ApiError::Decode { capability, .. } => Some(*capability),
        }
    }

    pub fn transport(capability: Capability, source: impl Into<BoxError>) -> Self {
        ApiError::Transport {
            capability,
            source: source.into(),
        }
    }

    pub fn decode(capability: Capability, source: impl Into<DecodeError>) -> Self {
        ApiError::Decode {
            capability,
            source: source.into(),
        }
    }
}
