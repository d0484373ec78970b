pub mod adapter;
pub mod api;
pub mod classifier;
pub mod handlers;
pub mod pool;
