use crate::balancer::handlers::{
    AddLiquidityHandlerKind, AddLiquidityParams, RemoveLiquidityHandlerKind, RemoveLiquidityParams,
};
use crate::errors::BalRsError;
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warning,
}

/// Structured context attached to a reported error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub message: String,
    pub severity: Severity,
    pub extra: Map<String, Value>,
}

impl ErrorContext {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()));
        self.extra.insert(key.into(), value);
        self
    }

    pub fn for_add_liquidity_handler(
        message: impl Into<String>,
        handler: AddLiquidityHandlerKind,
        params: &AddLiquidityParams,
    ) -> Self {
        // Reported as a single JSON string.
        let human_amounts_in = serde_json::to_string(&params.human_amounts_in)
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));

        Self::new(message, Severity::Fatal)
            .with_extra("handler", handler.name())
            .with_extra(
                "params",
                json!({
                    "chainId": params.chain_id,
                    "humanAmountsIn": human_amounts_in,
                    "poolId": params.pool_id,
                    "poolType": params.pool_type,
                    "slippage": params.slippage,
                    "userAddress": params.user_address,
                }),
            )
    }

    pub fn for_remove_liquidity_handler(
        message: impl Into<String>,
        handler: RemoveLiquidityHandlerKind,
        params: &RemoveLiquidityParams,
    ) -> Self {
        Self::new(message, Severity::Fatal)
            .with_extra("handler", handler.name())
            .with_extra(
                "params",
                json!({
                    "chainId": params.chain_id,
                    "humanBptIn": params.human_bpt_in,
                    "poolId": params.pool_id,
                    "slippage": params.slippage,
                    "userAddress": params.user_address,
                }),
            )
    }

    /// Context for a failed transaction simulation; `extra` is attached as-is.
    pub fn for_simulation(message: impl Into<String>, extra: Map<String, Value>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Fatal,
            extra,
        }
    }
}

/// Sink for errors that indicate a broken invariant rather than bad user input.
pub trait ErrorReporter {
    fn capture(&self, error: &BalRsError, context: &ErrorContext);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture(&self, error: &BalRsError, context: &ErrorContext) {
        let extra = Value::Object(context.extra.clone());
        tracing::error!(
            severity = ?context.severity,
            %extra,
            %error,
            "{}",
            context.message
        );
    }
}
