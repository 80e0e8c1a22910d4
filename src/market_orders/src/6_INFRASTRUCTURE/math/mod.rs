//! Math - Pure functions for exact integer arithmetic

pub mod pure_math;

pub use pure_math::{apply_bps, checked_sub, is_zero, multiply_and_divide, saturating_sub, zero};
