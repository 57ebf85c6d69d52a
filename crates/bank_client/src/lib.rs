//! HTTP implementation of [`engine::BankApi`].
//!
//! One [`Client`] is built per run from the base endpoint and the bearer
//! token and passed by reference to whoever needs it. Each call is sent once;
//! failures are classified into [`ApiError`] and tagged with the remote
//! capability that failed.
use std::fmt;

use api_types::{
    account::Accounts,
    feed::FeedItems,
    savings_goal::{TopUpAmount, TopUpRequest},
};
use engine::{
    Account, ApiError, BankApi, Capability, Interval, Money, Transaction, wire_timestamp,
};
use reqwest::{RequestBuilder, Response, Url, header};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Sandbox environment of the bank.
pub const DEFAULT_BASE_URL: &str = "https://api-sandbox.starlingbank.com";

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    token: String,
    http: reqwest::Client,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Builds a client with a default transport.
    ///
    /// Fails with [`ApiError::Configuration`] if `base_url` is not an
    /// absolute URL that can carry a path.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    /// Builds a client on top of a caller-configured transport (timeouts,
    /// proxies, TLS).
    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|err| ApiError::Configuration(format!("{base_url:?}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "{base_url:?}: cannot be used as a base"
            )));
        }
        Ok(Self {
            base_url: parsed,
            token: token.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL, keeping any
    /// path prefix it already has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Configuration(format!(
                    "{:?}: cannot be used as a base",
                    self.base_url.as_str()
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends the request once and keeps only 2xx responses.
    async fn send(
        &self,
        capability: Capability,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let res = request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                tracing::error!("{capability} api unreachable: {err}");
                ApiError::transport(capability, err)
            })?;

        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let url = res.url().to_string();
        tracing::warn!("{capability} api returned {status} for {url}");
        Err(ApiError::UnexpectedStatus {
            capability,
            status: status.as_u16(),
            url,
        })
    }

    /// Sends the request and decodes the body as `T`.
    ///
    /// The body is read in full before decoding so a broken stream is a
    /// transport failure and a bad payload a decode failure.
    async fn fetch<T: DeserializeOwned>(
        &self,
        capability: Capability,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self
            .send(capability, request)
            .await?
            .text()
            .await
            .map_err(|err| ApiError::transport(capability, err))?;

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!("{capability} api sent an invalid payload: {err}");
            ApiError::decode(capability, err)
        })
    }
}

impl BankApi for Client {
    async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        let capability = Capability::Accounts;
        let url = self.endpoint(&["api", "v2", "accounts"])?;
        tracing::debug!("GET {url}");

        let body: Accounts = self.fetch(capability, self.http.get(url)).await?;
        body.accounts
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::decode(capability, err))
    }

    async fn transactions(
        &self,
        account: &Account,
        interval: &Interval,
    ) -> Result<Vec<Transaction>, ApiError> {
        let capability = Capability::TransactionFeed;
        let url = self.endpoint(&[
            "api",
            "v2",
            "feed",
            "account",
            account.account_uid.as_str(),
            "category",
            account.default_category.as_str(),
            "transactions-between",
        ])?;
        tracing::debug!("GET {url}");

        let request = self.http.get(url).query(&[
            ("minTransactionTimestamp", wire_timestamp(&interval.begin())),
            ("maxTransactionTimestamp", wire_timestamp(&interval.end())),
        ]);
        let body: FeedItems = self.fetch(capability, request).await?;
        let transactions = body
            .feed_items
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::decode(capability, err))?;

        tracing::debug!(
            "account {}: {} feed item(s)",
            account.account_uid,
            transactions.len()
        );
        Ok(transactions)
    }

    async fn transfer(
        &self,
        account: &Account,
        savings_goal_uid: &str,
        amount: Money,
        transfer_uid: Uuid,
    ) -> Result<(), ApiError> {
        let capability = Capability::SavingsGoalTransfer;
        let transfer_uid = transfer_uid.to_string();
        let url = self.endpoint(&[
            "api",
            "v2",
            "account",
            account.account_uid.as_str(),
            "savings-goals",
            savings_goal_uid,
            "add-money",
            transfer_uid.as_str(),
        ])?;
        tracing::debug!("PUT {url}");

        let payload = TopUpRequest {
            amount: TopUpAmount {
                currency: account.currency.code().to_string(),
                minor_units: amount.minor_units(),
            },
        };
        self.send(capability, self.http.put(url).json(&payload))
            .await?;
        Ok(())
    }
}
