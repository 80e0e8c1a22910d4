use candid::{CandidType, Deserialize, Nat, Principal};
use serde::Serialize;
use std::fmt;

/// Order shape submitted by a trader.
///
/// Wire codes follow declaration order: 0 = TokensForTokens, 1 = EthForTokens,
/// 2 = TokensForEth. Any other code decodes to `Invalid`, which is always rejected.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    TokensForTokens,
    EthForTokens,
    TokensForEth,
    Invalid,
}

impl OrderType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => OrderType::TokensForTokens,
            1 => OrderType::EthForTokens,
            2 => OrderType::TokensForEth,
            _ => OrderType::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::TokensForTokens => "tokens_for_tokens",
            OrderType::EthForTokens => "eth_for_tokens",
            OrderType::TokensForEth => "tokens_for_eth",
            OrderType::Invalid => "invalid",
        }
    }

    /// True when the trader pays with attached native coin
    pub fn takes_native_input(&self) -> bool {
        matches!(self, OrderType::EthForTokens)
    }
}

/// A market order. Constructed per call and never persisted.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_type: OrderType,
    pub token_in: Principal,
    pub token_out: Principal,
    pub amount_in_offered: Nat,
    pub amount_out_expected: Nat,
}

impl Order {
    pub fn new(
        order_type: OrderType,
        token_in: Principal,
        token_out: Principal,
        amount_in_offered: impl Into<Nat>,
        amount_out_expected: impl Into<Nat>,
    ) -> Self {
        Self {
            order_type,
            token_in,
            token_out,
            amount_in_offered: amount_in_offered.into(),
            amount_out_expected: amount_out_expected.into(),
        }
    }
}

/// Returned synchronously from `execute_order`, never stored on its own.
///
/// `actual_amount_in` is the net amount routed for the trader (gross received
/// minus the fee slice). `actual_amount_out` is the balance delta observed at
/// the trader, not the router's advertised figure.
#[derive(CandidType, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub actual_amount_in: Nat,
    pub actual_amount_out: Nat,
}

/// Something a ledger can hold a balance of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    Token(Principal),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token(token) => write!(f, "token {}", token),
        }
    }
}
