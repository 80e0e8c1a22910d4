//! Fee Accounting - fee slice calculation, native accumulation, distribution
//!
//! - **fee_policy**: exact-integer `split` of gross input and `distribute` of accrued fees
//! - **accumulator**: engine statistics plus the atomic `flush` to burn and staking sinks

pub mod accumulator;
pub mod fee_policy;

pub use accumulator::{flush, FeeAccumulator, FlushReport};
pub use fee_policy::{Distribution, FeePolicy, FeeSplit};
