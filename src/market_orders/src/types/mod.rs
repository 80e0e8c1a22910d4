//! Shared value types for orders, results and emitted records

pub mod events;
pub mod orders;

pub use events::{EngineEvent, FeesDistributed, OrderExecuted};
pub use orders::{Asset, ExecutionResult, Order, OrderType};
