use api_types::account::AccountItem;

use crate::{Currency, DecodeError};

/// A bank account as listed by the accounts endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Account {
    pub account_uid: String,
    /// Category whose transactions make up the account's main feed.
    pub default_category: String,
    pub currency: Currency,
}

impl Account {
    pub fn new(
        account_uid: impl Into<String>,
        default_category: impl Into<String>,
        currency: Currency,
    ) -> Self {
        Self {
            account_uid: account_uid.into(),
            default_category: default_category.into(),
            currency,
        }
    }
}

impl TryFrom<AccountItem> for Account {
    type Error = DecodeError;

    fn try_from(item: AccountItem) -> Result<Self, Self::Error> {
        let account_uid = item
            .account_uid
            .ok_or(DecodeError::MissingField("accountUid"))?;
        let default_category = item
            .default_category
            .ok_or(DecodeError::MissingField("defaultCategory"))?;
        let currency = match item.currency {
            Some(code) => Currency::try_from(code.as_str())
                .map_err(|_| DecodeError::UnsupportedCurrency(code))?,
            None => Currency::default(),
        };

        Ok(Account {
            account_uid,
            default_category,
            currency,
        })
    }
}
