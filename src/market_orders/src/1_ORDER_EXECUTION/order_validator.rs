//! Validation for incoming orders. Runs before any funds move.

use candid::{Nat, Principal};
use crate::infrastructure::{is_zero, MarketOrderError, OrderError, Result};
use crate::types::{Order, OrderType};

pub fn validate_order(trader: &Principal, order: &Order, wrapped_native: Principal) -> Result<()> {
    if trader == &Principal::anonymous() {
        return Err(invalid("anonymous trader"));
    }

    if order.order_type == OrderType::Invalid {
        return Err(invalid("order type is invalid"));
    }

    if is_zero(&order.amount_in_offered) {
        return Err(invalid("amount_in_offered must be greater than zero"));
    }

    if order.token_in == order.token_out {
        return Err(invalid("token_in and token_out must differ"));
    }

    let native_in = order.token_in == wrapped_native;
    let native_out = order.token_out == wrapped_native;
    match order.order_type {
        OrderType::EthForTokens if !native_in => Err(invalid("EthForTokens must spend the wrapped native asset")),
        OrderType::TokensForEth if !native_out => Err(invalid("TokensForEth must buy the wrapped native asset")),
        OrderType::TokensForTokens if native_in || native_out => {
            Err(invalid("TokensForTokens cannot involve the wrapped native asset"))
        }
        _ => Ok(()),
    }
}

/// Attached native value must match the offer for native input and be absent otherwise
pub fn validate_attached_value(order: &Order, attached_value: &Nat) -> Result<()> {
    let expected = if order.order_type.takes_native_input() {
        order.amount_in_offered.clone()
    } else {
        Nat::from(0u64)
    };

    if *attached_value != expected {
        return Err(MarketOrderError::Order(OrderError::TransferMismatch {
            asset: "native".to_string(),
            expected,
            received: attached_value.clone(),
            reason: format!("attached value does not match {} order", order.order_type.as_str()),
        }));
    }
    Ok(())
}

fn invalid(reason: &str) -> MarketOrderError {
    MarketOrderError::Order(OrderError::InvalidOrder { reason: reason.to_string() })
}
