//! # Router Adapter Module
//!
//! Narrow call contract between the engine and the AMM router.
//!
//! ## Architecture
//! - **approvals/**: exact-amount router allowance before every token-input hop
//! - **swaps/**: the three swap shapes (native→token, token→native, token→token)
//! - **slippage/**: minimum-output floor check against measured deltas
//!
//! ## Key Constraints
//! - **Fee-on-transfer variants only**: any hop may touch a fee-bearing asset
//! - **Never expire**: every call passes `NO_DEADLINE`
//! - **Direct pairs**: paths are `[token_in, token_out]`, with the wrapped
//!   native asset standing in for native coin
//!
//! ## Swap Flow
//! 1. **Approve**: token inputs only, exactly the hop amount
//! 2. **Execute**: router call with the caller's minimum output
//! 3. **Measure**: balance delta at the recipient
//! 4. **Validate**: delta against the minimum (main leg only)

pub mod approvals;
pub mod slippage;
pub mod swaps;

pub use swaps::RouterAdapter;
