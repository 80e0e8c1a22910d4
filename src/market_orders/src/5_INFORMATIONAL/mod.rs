//! Informational - read-only views over engine bookkeeping
//!
//! Nothing here touches the host or moves funds.

pub mod fee_stats;
pub mod history;

pub use fee_stats::{fee_stats, FeeStats};
pub use history::ExecutionHistory;
