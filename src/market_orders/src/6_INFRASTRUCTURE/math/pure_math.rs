//! Pure mathematical functions - no I/O, no host access
//! All functions here must be deterministic and side-effect free

use candid::Nat;
use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use crate::infrastructure::constants::BASIS_POINTS;
use crate::infrastructure::errors::{CalculationError, MarketOrderError, Result};

pub fn zero() -> Nat {
    Nat::from(0u64)
}

pub fn is_zero(amount: &Nat) -> bool {
    amount.0.is_zero()
}

/// Multiply two Nats and divide by a third with arbitrary precision
/// Formula: (a × b) ÷ c, truncating toward zero
pub fn multiply_and_divide(a: &Nat, b: &Nat, c: &Nat) -> Result<Nat> {
    if is_zero(c) {
        return Err(MarketOrderError::Calculation(CalculationError::DivisionByZero {
            operation: format!("({} × {}) ÷ {}", a, b, c),
        }));
    }

    // BigUint intermediate: no u128 ceiling on the product
    let product: BigUint = &a.0 * &b.0;
    Ok(Nat::from(product / &c.0))
}

/// floor(amount × bps ÷ 10000)
pub fn apply_bps(amount: &Nat, bps: u32) -> Result<Nat> {
    multiply_and_divide(amount, &Nat::from(bps), &Nat::from(BASIS_POINTS))
}

/// a − b, failing instead of wrapping when b > a
pub fn checked_sub(a: &Nat, b: &Nat, operation: &str) -> Result<Nat> {
    a.0.checked_sub(&b.0)
        .map(Nat::from)
        .ok_or_else(|| {
            MarketOrderError::Calculation(CalculationError::Underflow {
                operation: format!("{}: {} - {}", operation, a, b),
            })
        })
}

/// a − b clamped at zero
pub fn saturating_sub(a: &Nat, b: &Nat) -> Nat {
    a.0.checked_sub(&b.0).map(Nat::from).unwrap_or_else(zero)
}

// ===== Tests =====
