use crate::errors::BalRsError;
use crate::math::units;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Read-only view of a token shared by pool tokens, nested pool tokens and underlyings.
pub trait TokenLike {
    fn address(&self) -> Address;
    fn symbol(&self) -> &str;
    fn decimals(&self) -> u8;
}

/// The minimal token shape the liquidity SDK needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalToken {
    pub address: Address,
    pub decimals: u8,
    pub index: usize,
}

/// A token known to a pool, either directly or through nesting/wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnownToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenLike for KnownToken {
    fn address(&self) -> Address {
        self.address
    }
    fn symbol(&self) -> &str {
        &self.symbol
    }
    fn decimals(&self) -> u8 {
        self.decimals
    }
}

/// A user-entered amount. Consumed immediately by the unit converter, never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanTokenAmount {
    pub human_amount: String,
    pub token_address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl HumanTokenAmount {
    pub fn new(human_amount: impl Into<String>, token_address: Address) -> Self {
        Self {
            human_amount: human_amount.into(),
            token_address,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        units::is_empty_human_amount(&self.human_amount)
    }
}

impl Debug for HumanTokenAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("HumanTokenAmount")
            .field(&self.human_amount)
            .field(&self.token_address)
            .finish()
    }
}

/// Raw fixed-point amount as consumed by the SDK and the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAmount {
    pub address: Address,
    pub raw_amount: U256,
    pub decimals: u8,
    pub symbol: String,
}

impl InputAmount {
    pub fn from_human<T: TokenLike + ?Sized>(human_amount: &str, token: &T) -> Result<Self, BalRsError> {
        Ok(Self {
            address: token.address(),
            raw_amount: units::to_raw(human_amount, token.decimals())?,
            decimals: token.decimals(),
            symbol: token.symbol().to_string(),
        })
    }

    pub fn to_human(&self) -> String {
        units::to_human(self.raw_amount, self.decimals)
    }

    pub fn to_human_amount(&self) -> HumanTokenAmount {
        HumanTokenAmount::new(self.to_human(), self.address).with_symbol(self.symbol.clone())
    }
}

/// An allowance the user must grant before a liquidity action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmountToApprove {
    pub is_permit2: bool,
    pub token_address: Address,
    pub required_raw_amount: U256,
    /// Approval rules may later raise this to the maximum allowance.
    pub requested_raw_amount: U256,
    pub symbol: String,
}

impl From<(InputAmount, bool)> for TokenAmountToApprove {
    fn from((amount, is_permit2): (InputAmount, bool)) -> Self {
        Self {
            is_permit2,
            token_address: amount.address,
            required_raw_amount: amount.raw_amount,
            requested_raw_amount: amount.raw_amount,
            symbol: amount.symbol,
        }
    }
}
