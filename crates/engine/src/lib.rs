//! Domain core of the roundup: money, time windows, decoded accounts and
//! transactions, and the service that turns last week's spending into a
//! savings goal transfer.
//!
//! The remote bank is reached through the [`BankApi`] trait; the HTTP
//! implementation lives in the `bank_client` crate.
pub use accounts::Account;
pub use api::BankApi;
pub use currency::Currency;
pub use error::{ApiError, BoxError, Capability, DecodeError, EngineError};
pub use interval::{Clock, FixedClock, Interval, SystemClock, wire_timestamp};
pub use money::Money;
pub use roundup::{AccountRoundup, RoundupService, roundup_for, total_roundup};
pub use transactions::{Direction, Transaction};

mod accounts;
mod api;
mod currency;
mod error;
mod interval;
mod money;
mod roundup;
mod transactions;
