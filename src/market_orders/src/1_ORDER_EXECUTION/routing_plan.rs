//! Routing plan selection - a pure function of the order type

use candid::Principal;
use crate::infrastructure::{MarketOrderError, OrderError, Result};
use crate::types::{Asset, Order, OrderType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingPlan {
    /// Net native → `token_out` for the trader; the fee is already native and stays put
    NativeToToken { token_out: Principal },
    /// Gross `token_in` → native at the engine; proceeds minus the fee go to the trader
    TokenToNative { token_in: Principal },
    /// Hop A: net `token_in` → `token_out` for the trader.
    /// Hop B: fee `token_in` → native at the engine, no minimum.
    TokenToToken { token_in: Principal, token_out: Principal },
}

pub fn plan_route(order: &Order) -> Result<RoutingPlan> {
    match order.order_type {
        OrderType::EthForTokens => Ok(RoutingPlan::NativeToToken { token_out: order.token_out }),
        OrderType::TokensForEth => Ok(RoutingPlan::TokenToNative { token_in: order.token_in }),
        OrderType::TokensForTokens => Ok(RoutingPlan::TokenToToken {
            token_in: order.token_in,
            token_out: order.token_out,
        }),
        OrderType::Invalid => Err(MarketOrderError::Order(OrderError::InvalidOrder {
            reason: "no routing plan for invalid order type".to_string(),
        })),
    }
}

impl RoutingPlan {
    /// Every pair the plan may swap through, including the fee leg
    pub fn required_pairs(&self, wrapped_native: Principal) -> Vec<(Principal, Principal)> {
        match *self {
            RoutingPlan::NativeToToken { token_out } => vec![(wrapped_native, token_out)],
            RoutingPlan::TokenToNative { token_in } => vec![(token_in, wrapped_native)],
            RoutingPlan::TokenToToken { token_in, token_out } => {
                vec![(token_in, token_out), (token_in, wrapped_native)]
            }
        }
    }

    pub fn input_asset(&self) -> Asset {
        match *self {
            RoutingPlan::NativeToToken { .. } => Asset::Native,
            RoutingPlan::TokenToNative { token_in } | RoutingPlan::TokenToToken { token_in, .. } => {
                Asset::Token(token_in)
            }
        }
    }
}
