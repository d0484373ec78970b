use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BalRsError {
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Provided token address {address} not found in pool tokens [{pool_tokens}]")]
    TokenNotFound { address: Address, pool_tokens: String },

    #[error(
        "Missing query response in {0}. Build call data was requested before the last query finished"
    )]
    MissingQueryResult(String),

    #[error("Invalid pool {0}: {1}")]
    InvalidPool(String, String),

    #[error("No network configuration for chain: {0}")]
    UnsupportedChain(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BalRsError {
    pub(crate) fn invalid_amount(amount: &str, reason: impl Into<String>) -> Self {
        BalRsError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.into(),
        }
    }
}
