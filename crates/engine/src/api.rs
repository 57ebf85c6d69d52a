use std::future::Future;

use uuid::Uuid;

use crate::{Account, ApiError, Interval, Money, Transaction};

/// Remote operations the roundup needs from the bank.
///
/// Every call is attempted exactly once; implementations must not retry.
pub trait BankApi {
    /// All accounts visible to the credential.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Account>, ApiError>> + Send;

    /// Transactions of the account's default category inside `interval`.
    fn transactions(
        &self,
        account: &Account,
        interval: &Interval,
    ) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    /// Moves `amount` from the account into the savings goal.
    ///
    /// `transfer_uid` is the idempotency key of the transfer. Callers draw a
    /// new key for each logical transfer and reuse it when resending that
    /// same transfer.
    fn transfer(
        &self,
        account: &Account,
        savings_goal_uid: &str,
        amount: Money,
        transfer_uid: Uuid,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
