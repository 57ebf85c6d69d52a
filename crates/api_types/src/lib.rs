//! Wire shapes of the remote banking API.
//!
//! Fields the domain requires are still `Option` here: presence is checked by
//! the engine decoders so a missing field is reported with its JSON path
//! instead of a generic codec error. Unknown fields are ignored.
use serde::{Deserialize, Serialize};

/// Amount in the currency's minor units, as the API transmits it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAndAmount {
    pub currency: Option<String>,
    pub minor_units: Option<i64>,
}

pub mod account {
    use super::*;

    /// `GET /api/v2/accounts` response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Accounts {
        pub accounts: Vec<AccountItem>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountItem {
        pub account_uid: Option<String>,
        pub default_category: Option<String>,
        /// ISO currency code. Older sandbox payloads omit it.
        pub currency: Option<String>,
    }
}

pub mod feed {
    use super::*;

    /// `GET .../transactions-between` response.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FeedItems {
        pub feed_items: Vec<FeedItem>,
    }

    /// One transaction record of the feed.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct FeedItem {
        pub amount: Option<CurrencyAndAmount>,
        pub direction: Option<String>,
    }
}

pub mod savings_goal {
    use super::*;

    /// `PUT .../add-money/{transferUid}` request body.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TopUpRequest {
        pub amount: TopUpAmount,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TopUpAmount {
        pub currency: String,
        pub minor_units: i64,
    }
}
