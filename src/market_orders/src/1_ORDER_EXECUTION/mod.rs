//! # Order Execution Module
//!
//! Per-order state machine in front of the AMM router.
//!
//! ## Stages
//! `Validated → Received → FeeSplit → Routed → Reported`. A failure at any
//! stage rejects the order and reverts the host to the checkpoint opened on
//! entry, so balances, allowances and events are left exactly as they were.
//!
//! ## Order Flow
//! 1. **Validate**: order shape and attached value, then pool existence for
//!    every hop before any funds move
//! 2. **Receive**: pull token input by `transfer_from` and measure the delta,
//!    or take attached native value as-is
//! 3. **Split**: `(net, fee)` from the gross amount actually received
//! 4. **Route**: one or two router calls depending on the order type
//! 5. **Report**: post-condition check, `OrderExecuted` event, result
//!
//! ## Native Input
//! Attached value is credited to the engine account by the host before
//! `execute_order` runs and is reclaimed by the host if the call fails.
//!
//! ## Bookkeeping
//! Fee statistics and execution history are updated only after the host
//! checkpoint commits.

pub mod order_validator;
pub mod routing_plan;


use candid::{Nat, Principal};
use tracing::{debug, info, warn};
use crate::_2_FEE_ACCOUNTING::{flush, FeeAccumulator, FeePolicy, FeeSplit, FlushReport};
use crate::_3_BALANCE_TRACKING::{balance_of, measure_delta, measure_received};
use crate::_4_ROUTER_ADAPTER::{slippage::validate_min_output, RouterAdapter};
use crate::_5_INFORMATIONAL::{fee_stats, ExecutionHistory, FeeStats};
use crate::infrastructure::stable_storage::{restore_state, save_state, StableState};
use crate::infrastructure::{
    checked_sub, is_zero, zero, EngineConfig, Host, MarketOrderError, OrderError, Result, SwapLeg,
    STATE_SCHEMA_VERSION,
};
use crate::types::{Asset, EngineEvent, ExecutionResult, Order, OrderExecuted};
use order_validator::{validate_attached_value, validate_order};
use routing_plan::{plan_route, RoutingPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
    Validated,
    Received,
    FeeSplit,
    Routed,
    Reported,
}

/// Everything an order produced, applied to engine bookkeeping after commit
#[derive(Debug)]
struct Settlement {
    result: ExecutionResult,
    record: OrderExecuted,
    fee_accrued_native: Nat,
    flush: Option<FlushReport>,
}

/// What the routing stage handed back
struct Routed {
    amount_out: Nat,
    fee_accrued_native: Nat,
}

pub struct MarketOrderEngine {
    config: EngineConfig,
    fee_policy: FeePolicy,
    adapter: RouterAdapter,
    accumulator: FeeAccumulator,
    history: ExecutionHistory,
}

impl MarketOrderEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let fee_policy = FeePolicy::from_settings(&config.fees)?;

        info!(
            "Market order engine {} configured: fee {}%, burn/stake {}/{} bps",
            config.engine_id,
            fee_policy.fee_rate_percent(),
            fee_policy.burn_share_bps(),
            fee_policy.stake_share_bps()
        );

        Ok(Self {
            adapter: RouterAdapter::from_config(&config),
            history: ExecutionHistory::new(config.max_history),
            accumulator: FeeAccumulator::default(),
            fee_policy,
            config,
        })
    }

    /// Rebuilds an engine from bytes produced by [`MarketOrderEngine::export_state`]
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let state = restore_state(bytes)?;
        let mut engine = Self::new(state.config)?;
        engine.accumulator = state.accumulator;
        engine.history = ExecutionHistory::from_records(state.history, engine.config.max_history);
        Ok(engine)
    }

    pub fn export_state(&self) -> Result<Vec<u8>> {
        save_state(&StableState {
            version: STATE_SCHEMA_VERSION,
            config: self.config.clone(),
            accumulator: self.accumulator.clone(),
            history: self.history.records().to_vec(),
        })
    }

    /// Fill a market order for `trader`.
    ///
    /// `attached_value` is the native coin sent with the call. It must equal
    /// `amount_in_offered` for `EthForTokens` and be zero otherwise.
    pub fn execute_order<H: Host>(
        &mut self,
        host: &mut H,
        trader: Principal,
        order: Order,
        attached_value: Nat,
    ) -> Result<ExecutionResult> {
        info!(
            "🔄 Executing {} order for {}: {} of {} → {} (min {})",
            order.order_type.as_str(),
            trader,
            order.amount_in_offered,
            order.token_in,
            order.token_out,
            order.amount_out_expected
        );

        let checkpoint = host.checkpoint();
        let mut stage = None;

        match self.run_order(host, trader, &order, &attached_value, &mut stage) {
            Ok(settlement) => {
                host.commit(checkpoint);

                self.accumulator.record_accrual(&settlement.fee_accrued_native);
                if let Some(report) = &settlement.flush {
                    self.accumulator.record_flush(report);
                }
                self.history.record(settlement.record);

                info!(
                    "✅ Order filled: {} in, {} out, {} native fee accrued",
                    settlement.result.actual_amount_in,
                    settlement.result.actual_amount_out,
                    settlement.fee_accrued_native
                );
                Ok(settlement.result)
            }
            Err(e) => {
                host.revert_to(checkpoint);
                match stage {
                    Some(reached) => warn!("❌ Order rejected after {:?}: {}", reached, e),
                    None => warn!("❌ Order rejected during validation: {}", e),
                }
                Err(e)
            }
        }
    }

    /// Permissionless flush of accrued fees to the burn and staking sinks.
    ///
    /// A zero balance is a no-op. On failure nothing moves and the
    /// accumulator is unchanged.
    pub fn stake_and_burn<H: Host>(&mut self, host: &mut H) -> Result<FlushReport> {
        info!("🔥 Stake and burn requested");
        let report = flush(host, &self.config, &self.fee_policy, &self.accumulator)?;
        self.accumulator.record_flush(&report);
        Ok(report)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    pub fn accumulator(&self) -> &FeeAccumulator {
        &self.accumulator
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    pub fn execution_history_paginated(&self, offset: u64, limit: u64) -> (Vec<OrderExecuted>, u64) {
        self.history.paginated(offset, limit)
    }

    pub fn fee_stats(&self) -> FeeStats {
        fee_stats(&self.fee_policy, &self.accumulator, self.history.len() as u64)
    }

    /// Native coin waiting for the next flush, read from the ledger
    pub fn pending_fees<H: Host>(&self, host: &H) -> Result<Nat> {
        Ok(host.native_balance(self.config.engine_id)?)
    }

    fn run_order<H: Host>(
        &self,
        host: &mut H,
        trader: Principal,
        order: &Order,
        attached_value: &Nat,
        stage: &mut Option<OrderStage>,
    ) -> Result<Settlement> {
        let engine = self.config.engine_id;

        // Step 1: Validate
        validate_order(&trader, order, self.config.wrapped_native)?;
        validate_attached_value(order, attached_value)?;
        enter(stage, OrderStage::Validated);

        let plan = plan_route(order)?;
        for (token_a, token_b) in plan.required_pairs(self.config.wrapped_native) {
            self.adapter.ensure_pool(host, token_a, token_b)?;
        }
        let guarded = self.guarded_balances(host, order)?;

        // Step 2: Receive
        let received = self.receive_input(host, trader, order, &plan)?;
        enter(stage, OrderStage::Received);

        // Step 3: Split
        let split = self.fee_policy.split(&received)?;
        debug!("Split {} received into net {} / fee {}", received, split.net, split.fee);
        enter(stage, OrderStage::FeeSplit);

        // Step 4: Route
        let routed = self.route(host, trader, order, &plan, &received, &split)?;
        enter(stage, OrderStage::Routed);

        // Step 5: Report
        self.check_no_trapped_balance(host, &guarded)?;

        let result = ExecutionResult {
            actual_amount_in: split.net.clone(),
            actual_amount_out: routed.amount_out,
        };
        let record = OrderExecuted {
            trader,
            order_type: order.order_type,
            token_in: order.token_in,
            token_out: order.token_out,
            amounts: result.clone(),
            fee_charged: split.fee,
            fee_accrued_native: routed.fee_accrued_native.clone(),
            timestamp: host.timestamp(),
        };
        host.emit_event(engine, EngineEvent::OrderExecuted(record.clone()));

        let flush_report = if self.config.flush_on_execute {
            let mut projected = self.accumulator.clone();
            projected.record_accrual(&routed.fee_accrued_native);
            Some(flush(host, &self.config, &self.fee_policy, &projected)?)
        } else {
            None
        };
        enter(stage, OrderStage::Reported);

        Ok(Settlement {
            result,
            record,
            fee_accrued_native: routed.fee_accrued_native,
            flush: flush_report,
        })
    }

    fn receive_input<H: Host>(&self, host: &mut H, trader: Principal, order: &Order, plan: &RoutingPlan) -> Result<Nat> {
        let engine = self.config.engine_id;
        let input = plan.input_asset();

        let received = measure_received(host, input, engine, &order.amount_in_offered, |host| {
            if let Asset::Token(token) = input {
                host.transfer_from(token, engine, trader, engine, &order.amount_in_offered)
                    .map_err(|e| {
                        MarketOrderError::Order(OrderError::TransferMismatch {
                            asset: input.to_string(),
                            expected: order.amount_in_offered.clone(),
                            received: zero(),
                            reason: e.to_string(),
                        })
                    })?;
            }
            Ok(())
        })?;

        if is_zero(&received) {
            return Err(MarketOrderError::Order(OrderError::TransferMismatch {
                asset: input.to_string(),
                expected: order.amount_in_offered.clone(),
                received,
                reason: "nothing arrived at the engine".to_string(),
            }));
        }

        debug!("Received {} of {} (offered {})", received, input, order.amount_in_offered);
        Ok(received)
    }

    fn route<H: Host>(
        &self,
        host: &mut H,
        trader: Principal,
        order: &Order,
        plan: &RoutingPlan,
        received: &Nat,
        split: &FeeSplit,
    ) -> Result<Routed> {
        let engine = self.config.engine_id;
        let minimum = &order.amount_out_expected;

        match *plan {
            RoutingPlan::NativeToToken { token_out } => {
                let amount_out = self.adapter.swap_native_for_tokens(host, &split.net, minimum, token_out, trader)?;
                validate_min_output(SwapLeg::Main, &amount_out, minimum)?;
                Ok(Routed { amount_out, fee_accrued_native: split.fee.clone() })
            }

            RoutingPlan::TokenToNative { token_in } => {
                // The whole receipt is sold so no fee-slice tokens stay behind
                let proceeds =
                    self.adapter.swap_tokens_for_native(host, SwapLeg::Main, token_in, received, minimum, engine)?;
                // The trader's floor binds the AMM's gross proceeds, not the payout after the fee
                validate_min_output(SwapLeg::Main, &proceeds, minimum)?;

                if proceeds < split.fee {
                    return Err(MarketOrderError::Order(OrderError::InsufficientProceeds {
                        proceeds,
                        fee: split.fee.clone(),
                    }));
                }
                let payout = checked_sub(&proceeds, &split.fee, "proceeds payout")?;

                let amount_out = if is_zero(&payout) {
                    zero()
                } else {
                    measure_delta(host, Asset::Native, trader, |host| {
                        host.transfer_native(engine, trader, &payout).map_err(|e| {
                            MarketOrderError::Order(OrderError::ProceedsTransferFailed {
                                recipient: trader,
                                amount: payout.clone(),
                                reason: e.to_string(),
                            })
                        })
                    })?
                };
                debug!("Forwarded {} of {} native proceeds, kept {}", amount_out, proceeds, split.fee);

                Ok(Routed { amount_out, fee_accrued_native: split.fee.clone() })
            }

            RoutingPlan::TokenToToken { token_in, token_out } => {
                // Hop A
                let amount_out =
                    self.adapter.swap_tokens_for_tokens(host, token_in, token_out, &split.net, minimum, trader)?;
                validate_min_output(SwapLeg::Main, &amount_out, minimum)?;

                // Hop B
                let fee_accrued_native = if is_zero(&split.fee) {
                    debug!("Fee slice is zero, fee leg skipped");
                    zero()
                } else {
                    self.adapter.swap_tokens_for_native(host, SwapLeg::Fee, token_in, &split.fee, &zero(), engine)?
                };

                Ok(Routed { amount_out, fee_accrued_native })
            }
        }
    }

    /// Engine balances of every non-native order asset, captured before funds move
    fn guarded_balances<H: Host>(&self, host: &H, order: &Order) -> Result<Vec<(Asset, Nat)>> {
        let mut guarded = Vec::new();
        for token in [order.token_in, order.token_out] {
            if token == self.config.wrapped_native {
                continue;
            }
            let asset = Asset::Token(token);
            guarded.push((asset, balance_of(host, asset, self.config.engine_id)?));
        }
        Ok(guarded)
    }

    fn check_no_trapped_balance<H: Host>(&self, host: &H, guarded: &[(Asset, Nat)]) -> Result<()> {
        for (asset, before) in guarded {
            let after = balance_of(host, *asset, self.config.engine_id)?;
            if after != *before {
                return Err(MarketOrderError::Order(OrderError::TrappedBalance {
                    asset: asset.to_string(),
                    before: before.clone(),
                    after,
                }));
            }
        }
        Ok(())
    }
}

fn enter(stage: &mut Option<OrderStage>, next: OrderStage) {
    debug!("Order stage → {:?}", next);
    *stage = Some(next);
}
