pub mod balancer;
pub mod core;
pub mod errors;
pub mod lock;
pub mod math;
pub mod network;
pub mod reporting;

pub use errors::BalRsError;

pub use balancer::adapter::LiquidityActionHelpers;
pub use balancer::pool::Pool;
pub use network::{Chain, NetworkConfig, NetworkRegistry};

pub use core::token::{HumanTokenAmount, InputAmount, TokenLike};
