//! Weekly roundup of outgoing transactions into a savings goal.
use uuid::Uuid;

use crate::{Account, ApiError, BankApi, Clock, Interval, Money, Transaction};

/// Amount that brings `amount` up to the next whole unit.
///
/// A whole amount is already rounded and contributes nothing: `5.00` gives
/// `0.00`, `4.35` gives `0.65`.
#[must_use]
pub fn roundup_for(amount: Money) -> Money {
    let fractional = amount.fractional();
    if fractional.is_zero() {
        Money::ZERO
    } else {
        Money::ONE - fractional
    }
}

/// Sum of the roundups of the outgoing transactions. Incoming ones are
/// skipped.
#[must_use]
pub fn total_roundup(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|transaction| transaction.is_outgoing())
        .map(|transaction| roundup_for(transaction.amount))
        .sum()
}

/// Outcome of the roundup for one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRoundup {
    pub account_uid: String,
    pub amount: Money,
    /// Idempotency key of the transfer, `None` when nothing was transferred.
    pub transfer_uid: Option<Uuid>,
}

impl AccountRoundup {
    pub fn transferred(&self) -> bool {
        self.transfer_uid.is_some()
    }
}

/// Drives the roundup over every account of the credential.
#[derive(Debug)]
pub struct RoundupService<'a, A, C> {
    api: &'a A,
    clock: C,
}

impl<'a, A: BankApi, C: Clock> RoundupService<'a, A, C> {
    pub fn new(api: &'a A, clock: C) -> Self {
        Self { api, clock }
    }

    /// Rounds up last week's outgoing transactions of every account into
    /// `savings_goal_uid`.
    ///
    /// Accounts are processed one at a time. The first error aborts the run,
    /// so accounts after a failing one are neither read nor transferred from.
    /// Accounts with nothing to round up are reported but not transferred.
    pub async fn execute(&self, savings_goal_uid: &str) -> Result<Vec<AccountRoundup>, ApiError> {
        let interval = Interval::last_week(&self.clock);
        let accounts = self.api.accounts().await?;
        tracing::info!("Found {} account(s)", accounts.len());

        let mut report = Vec::with_capacity(accounts.len());
        for account in &accounts {
            report.push(self.round_up_account(account, &interval, savings_goal_uid).await?);
        }
        Ok(report)
    }

    async fn round_up_account(
        &self,
        account: &Account,
        interval: &Interval,
        savings_goal_uid: &str,
    ) -> Result<AccountRoundup, ApiError> {
        let transactions = self.api.transactions(account, interval).await?;
        let amount = total_roundup(&transactions);
        tracing::debug!(
            "account {}: {} transaction(s), roundup {amount}",
            account.account_uid,
            transactions.len()
        );

        if amount.is_zero() {
            tracing::info!("account {}: nothing to round up", account.account_uid);
            return Ok(AccountRoundup {
                account_uid: account.account_uid.clone(),
                amount,
                transfer_uid: None,
            });
        }

        let transfer_uid = Uuid::new_v4();
        self.api
            .transfer(account, savings_goal_uid, amount, transfer_uid)
            .await?;
        tracing::info!(
            "account {}: transferred {amount} {} into savings goal {savings_goal_uid}",
            account.account_uid,
            account.currency
        );

        Ok(AccountRoundup {
            account_uid: account.account_uid.clone(),
            amount,
            transfer_uid: Some(transfer_uid),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use chrono::DateTime;

    use super::*;
    use crate::{Capability, Currency, Direction, FixedClock};

    fn money(minor_units: i64) -> Money {
        Money::from_minor_units(minor_units)
    }

    fn out(minor_units: i64) -> Transaction {
        Transaction::new(money(minor_units), Direction::Out)
    }

    fn incoming(minor_units: i64) -> Transaction {
        Transaction::new(money(minor_units), Direction::In)
    }

    fn not_found(capability: Capability) -> ApiError {
        ApiError::UnexpectedStatus {
            capability,
            status: 404,
            url: "http://bank.test".to_string(),
        }
    }

    #[derive(Debug, PartialEq)]
    struct Transfer {
        account_uid: String,
        savings_goal_uid: String,
        amount: Money,
        transfer_uid: Uuid,
    }

    #[derive(Default)]
    struct FakeBank {
        accounts: Vec<Account>,
        feeds: HashMap<String, Vec<Transaction>>,
        failing_feed: Option<String>,
        failing_transfer: Option<String>,
        intervals: Mutex<Vec<Interval>>,
        feed_calls: Mutex<Vec<String>>,
        transfers: Mutex<Vec<Transfer>>,
    }

    impl FakeBank {
        fn with_accounts(feeds: &[(&str, Vec<Transaction>)]) -> Self {
            Self {
                accounts: feeds
                    .iter()
                    .map(|(uid, _)| Account::new(*uid, "defaultCategory", Currency::Gbp))
                    .collect(),
                feeds: feeds
                    .iter()
                    .map(|(uid, transactions)| (uid.to_string(), transactions.clone()))
                    .collect(),
                ..Self::default()
            }
        }

        fn transferred(&self) -> Vec<(String, Money)> {
            self.transfers
                .lock()
                .unwrap()
                .iter()
                .map(|t| (t.account_uid.clone(), t.amount))
                .collect()
        }
    }

    impl BankApi for FakeBank {
        async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
            Ok(self.accounts.clone())
        }

        async fn transactions(
            &self,
            account: &Account,
            interval: &Interval,
        ) -> Result<Vec<Transaction>, ApiError> {
            self.intervals.lock().unwrap().push(*interval);
            self.feed_calls
                .lock()
                .unwrap()
                .push(account.account_uid.clone());
            if self.failing_feed.as_deref() == Some(account.account_uid.as_str()) {
                return Err(not_found(Capability::TransactionFeed));
            }
            Ok(self
                .feeds
                .get(&account.account_uid)
                .cloned()
                .unwrap_or_default())
        }

        async fn transfer(
            &self,
            account: &Account,
            savings_goal_uid: &str,
            amount: Money,
            transfer_uid: Uuid,
        ) -> Result<(), ApiError> {
            if self.failing_transfer.as_deref() == Some(account.account_uid.as_str()) {
                return Err(not_found(Capability::SavingsGoalTransfer));
            }
            self.transfers.lock().unwrap().push(Transfer {
                account_uid: account.account_uid.clone(),
                savings_goal_uid: savings_goal_uid.to_string(),
                amount,
                transfer_uid,
            });
            Ok(())
        }
    }

    fn clock() -> FixedClock {
        FixedClock::new(DateTime::parse_from_rfc3339("2020-01-21T10:15:30Z").unwrap())
    }

    #[test]
    fn roundup_for_fractional_amount_completes_the_unit() {
        assert_eq!(roundup_for(money(435)), money(65));
        assert_eq!(roundup_for(money(1)), money(99));
        assert_eq!(roundup_for(money(99)), money(1));
    }

    #[test]
    fn roundup_for_whole_amount_is_zero() {
        assert_eq!(roundup_for(money(500)), Money::ZERO);
        assert_eq!(roundup_for(money(0)), Money::ZERO);
        assert_eq!(roundup_for(money(60000)), Money::ZERO);
    }

    #[test]
    fn total_roundup_of_nothing_is_zero() {
        assert_eq!(total_roundup(&[]), Money::ZERO);
    }

    #[test]
    fn total_roundup_sums_outgoing_transactions() {
        let transactions = [out(435), out(520), out(87)];
        assert_eq!(total_roundup(&transactions), money(158));
    }

    #[test]
    fn total_roundup_ignores_incoming_transactions() {
        let transactions = [incoming(60000), out(3765), out(2221)];
        assert_eq!(total_roundup(&transactions), money(114));

        let only_incoming = [incoming(1), incoming(1234)];
        assert_eq!(total_roundup(&only_incoming), Money::ZERO);
    }

    #[tokio::test]
    async fn execute_transfers_the_roundup_of_an_account() {
        let bank =
            FakeBank::with_accounts(&[("accountOne", vec![out(435), out(520), out(87)])]);

        let report = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap();

        let transfers = bank.transfers.lock().unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].account_uid, "accountOne");
        assert_eq!(transfers[0].savings_goal_uid, "savingsGoalUid");
        assert_eq!(transfers[0].amount, money(158));
        assert_eq!(report[0].transfer_uid, Some(transfers[0].transfer_uid));
    }

    #[tokio::test]
    async fn execute_rounds_up_each_account_independently() {
        let bank = FakeBank::with_accounts(&[
            ("accountOne", vec![out(158)]),
            ("accountTwo", vec![out(84)]),
        ]);

        let report = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap();

        assert_eq!(
            bank.transferred(),
            vec![
                ("accountOne".to_string(), money(42)),
                ("accountTwo".to_string(), money(16)),
            ]
        );
        assert!(report.iter().all(AccountRoundup::transferred));
        let transfers = bank.transfers.lock().unwrap();
        assert_ne!(transfers[0].transfer_uid, transfers[1].transfer_uid);
        let reported: Vec<_> = report.iter().map(|roundup| roundup.transfer_uid).collect();
        assert_eq!(
            reported,
            vec![Some(transfers[0].transfer_uid), Some(transfers[1].transfer_uid)]
        );
    }

    #[tokio::test]
    async fn execute_reads_last_week_from_the_clock() {
        let bank = FakeBank::with_accounts(&[("accountOne", vec![])]);

        RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap();

        let intervals = bank.intervals.lock().unwrap();
        assert_eq!(intervals.as_slice(), &[Interval::last_week(&clock())]);
    }

    #[tokio::test]
    async fn execute_skips_the_transfer_when_nothing_to_round_up() {
        let bank = FakeBank::with_accounts(&[
            ("accountOne", vec![out(500), incoming(321)]),
            ("accountTwo", vec![out(84)]),
        ]);

        let report = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap();

        assert_eq!(
            bank.transferred(),
            vec![("accountTwo".to_string(), money(16))]
        );
        assert_eq!(
            report[0],
            AccountRoundup {
                account_uid: "accountOne".to_string(),
                amount: Money::ZERO,
                transfer_uid: None,
            }
        );
    }

    #[tokio::test]
    async fn feed_failure_stops_before_later_accounts() {
        let mut bank = FakeBank::with_accounts(&[
            ("accountOne", vec![out(158)]),
            ("accountTwo", vec![out(84)]),
        ]);
        bank.failing_feed = Some("accountOne".to_string());

        let err = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap_err();

        assert_eq!(err.capability(), Some(Capability::TransactionFeed));
        assert!(bank.transferred().is_empty());
        assert_eq!(*bank.feed_calls.lock().unwrap(), vec!["accountOne".to_string()]);
    }

    #[tokio::test]
    async fn transfer_failure_stops_before_later_accounts() {
        let mut bank = FakeBank::with_accounts(&[
            ("accountOne", vec![out(158)]),
            ("accountTwo", vec![out(84)]),
        ]);
        bank.failing_transfer = Some("accountOne".to_string());

        let err = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::UnexpectedStatus { status: 404, .. }
        ));
        assert!(bank.transferred().is_empty());
        assert_eq!(*bank.feed_calls.lock().unwrap(), vec!["accountOne".to_string()]);
    }

    #[tokio::test]
    async fn execute_without_accounts_reports_nothing() {
        let bank = FakeBank::default();

        let report = RoundupService::new(&bank, clock())
            .execute("savingsGoalUid")
            .await
            .unwrap();

        assert!(report.is_empty());
        assert!(bank.transferred().is_empty());
    }
}
