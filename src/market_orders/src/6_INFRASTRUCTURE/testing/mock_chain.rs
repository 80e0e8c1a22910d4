//! In-memory host used by the test suites
//!
//! Native coin shares its balance entry with the wrapped-native token, so the
//! router "unwraps" by moving that entry. Pools quote a fixed rate and pay out
//! of their own reserves. Fee-on-transfer tokens deliver `amount - floor(amount
//! × bps ÷ 10000)` and destroy the difference. Two knobs misbehave on
//! purpose: a router that pulls less input than asked, and a router that
//! checks its minimum against the quote instead of the recipient's delta.

use std::collections::{HashMap, HashSet};
use candid::{Nat, Principal};
use crate::infrastructure::{
    apply_bps, saturating_sub, zero, AmmRouter, AssetLedger, Environment, HostError, HostResult,
};
use crate::types::EngineEvent;

const FIRST_POOL_ID: u8 = 100;

#[derive(Debug, Clone, Copy)]
struct Pool {
    account: Principal,
    token_a: Principal,
    token_b: Principal,
    /// 1 token_a buys `rate_num / rate_den` token_b
    rate_num: u64,
    rate_den: u64,
}

impl Pool {
    fn quote(&self, token_in: Principal, amount: &Nat) -> Nat {
        let (num, den) = if token_in == self.token_a {
            (self.rate_num, self.rate_den)
        } else {
            (self.rate_den, self.rate_num)
        };
        Nat::from((&amount.0 * num) / den)
    }
}

#[derive(Debug, Clone, Default)]
struct ChainState {
    /// (asset, owner) → balance; native coin is keyed by the wrapped-native id
    balances: HashMap<(Principal, Principal), Nat>,
    /// (token, owner, spender) → remaining allowance
    allowances: HashMap<(Principal, Principal, Principal), Nat>,
    events: Vec<(Principal, EngineEvent)>,
}

pub struct MockChain {
    state: ChainState,
    journal: Vec<ChainState>,
    wrapped_native: Principal,
    router: Principal,
    pools: Vec<Pool>,
    transfer_fee_bps: HashMap<Principal, u32>,
    rejecting: HashSet<Principal>,
    /// token → units the router leaves behind when pulling a swap input
    pull_shortfall: HashMap<Principal, u64>,
    /// Router compares its own quote, not the recipient's delta, to the minimum
    checks_quoted_output: bool,
    now: u64,
    next_pool_id: u8,
}

impl MockChain {
    pub fn new(wrapped_native: Principal, router: Principal) -> Self {
        Self {
            state: ChainState::default(),
            journal: Vec::new(),
            wrapped_native,
            router,
            pools: Vec::new(),
            transfer_fee_bps: HashMap::new(),
            rejecting: HashSet::new(),
            pull_shortfall: HashMap::new(),
            checks_quoted_output: false,
            now: 1_700_000_000_000_000_000,
            next_pool_id: FIRST_POOL_ID,
        }
    }

    pub fn mint_native(&mut self, owner: Principal, amount: u64) {
        let native = self.wrapped_native;
        self.mint(native, owner, amount);
    }

    pub fn mint(&mut self, token: Principal, owner: Principal, amount: u64) {
        let entry = self.state.balances.entry((token, owner)).or_insert_with(zero);
        entry.0 += amount;
    }

    /// Registers a fixed-rate pool funded with `reserve` of both sides and
    /// returns its account
    pub fn add_pool(&mut self, token_a: Principal, token_b: Principal, rate_num: u64, rate_den: u64, reserve: u64) -> Principal {
        let account = Principal::from_slice(&[self.next_pool_id]);
        self.next_pool_id += 1;
        self.pools.push(Pool { account, token_a, token_b, rate_num, rate_den });
        self.mint(token_a, account, reserve);
        self.mint(token_b, account, reserve);
        account
    }

    pub fn set_transfer_fee(&mut self, token: Principal, bps: u32) {
        self.transfer_fee_bps.insert(token, bps);
    }

    /// Native transfers to `account` fail from now on
    pub fn reject_native(&mut self, account: Principal) {
        self.rejecting.insert(account);
    }

    /// Router pulls `shortfall` fewer units of `token` than the swap's input
    pub fn short_router_pull(&mut self, token: Principal, shortfall: u64) {
        self.pull_shortfall.insert(token, shortfall);
    }

    /// Router enforces `amount_out_min` against its pre-transfer-fee quote
    pub fn check_quoted_output(&mut self) {
        self.checks_quoted_output = true;
    }

    pub fn advance_time(&mut self, nanos: u64) {
        self.now += nanos;
    }

    pub fn balance(&self, asset: Principal, owner: Principal) -> Nat {
        self.state.balances.get(&(asset, owner)).cloned().unwrap_or_else(zero)
    }

    pub fn native(&self, owner: Principal) -> Nat {
        self.balance(self.wrapped_native, owner)
    }

    pub fn allowance(&self, token: Principal, owner: Principal, spender: Principal) -> Nat {
        self.state.allowances.get(&(token, owner, spender)).cloned().unwrap_or_else(zero)
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.state.events.iter().map(|(_, event)| event.clone()).collect()
    }

    pub fn events_from(&self, emitter: Principal) -> Vec<EngineEvent> {
        self.state.events.iter()
            .filter(|(from, _)| *from == emitter)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn open_checkpoints(&self) -> usize {
        self.journal.len()
    }

    fn debit(&mut self, asset: Principal, owner: Principal, amount: &Nat) -> HostResult<()> {
        let available = self.balance(asset, owner);
        if available < *amount {
            return Err(HostError::InsufficientBalance {
                asset: asset.to_text(),
                owner,
                required: amount.clone(),
                available,
            });
        }
        self.state.balances.insert((asset, owner), saturating_sub(&available, amount));
        Ok(())
    }

    fn credit(&mut self, asset: Principal, owner: Principal, amount: &Nat) {
        let entry = self.state.balances.entry((asset, owner)).or_insert_with(zero);
        entry.0 += &amount.0;
    }

    /// Moves `amount` out of `from`, applying the asset's transfer fee to what `to` receives
    fn move_asset(&mut self, asset: Principal, from: Principal, to: Principal, amount: &Nat) -> HostResult<()> {
        if asset == self.wrapped_native && self.rejecting.contains(&to) {
            return Err(HostError::Rejected {
                party: to,
                reason: "recipient refuses native coin".to_string(),
            });
        }
        self.debit(asset, from, amount)?;
        let fee_bps = self.transfer_fee_bps.get(&asset).copied().unwrap_or(0);
        let fee = apply_bps(amount, fee_bps).unwrap_or_else(|_| zero());
        self.credit(asset, to, &saturating_sub(amount, &fee));
        Ok(())
    }

    fn find_pool(&self, token_a: Principal, token_b: Principal) -> Option<Pool> {
        self.pools.iter().copied().find(|pool| {
            (pool.token_a == token_a && pool.token_b == token_b)
                || (pool.token_a == token_b && pool.token_b == token_a)
        })
    }

    fn pools_for(&self, path: &[Principal]) -> HostResult<Vec<Pool>> {
        if path.len() < 2 {
            return Err(HostError::InvalidPath { reason: format!("path of length {}", path.len()) });
        }
        path.windows(2)
            .map(|hop| {
                self.find_pool(hop[0], hop[1]).ok_or(HostError::PairNotFound {
                    token_a: hop[0],
                    token_b: hop[1],
                })
            })
            .collect()
    }

    /// Runs `op` against the live state and restores it if `op` fails
    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> HostResult<T>) -> HostResult<T> {
        let snapshot = self.state.clone();
        let result = op(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    /// Pays `input` from `caller` into the first pool, walks every hop and
    /// checks the recipient's delta of the last asset against `amount_out_min`
    fn route(
        &mut self,
        caller: Principal,
        input: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        pull_with_allowance: bool,
    ) -> HostResult<()> {
        let pools = self.pools_for(path)?;
        let last_asset = path[path.len() - 1];
        let out_before = self.balance(last_asset, to);

        let first_pool = pools[0].account;
        let pool_before = self.balance(path[0], first_pool);
        if pull_with_allowance {
            let router = self.router;
            let shortfall = Nat::from(self.pull_shortfall.get(&path[0]).copied().unwrap_or(0));
            let pulled = saturating_sub(input, &shortfall);
            self.transfer_from(path[0], router, caller, first_pool, &pulled)?;
        } else {
            self.move_asset(path[0], caller, first_pool, input)?;
        }
        let mut received = saturating_sub(&self.balance(path[0], first_pool), &pool_before);
        let mut quoted = zero();

        for (i, pool) in pools.iter().enumerate() {
            let asset_out = path[i + 1];
            let amount_out = pool.quote(path[i], &received);
            let recipient = pools.get(i + 1).map(|next| next.account).unwrap_or(to);
            let recipient_before = self.balance(asset_out, recipient);
            self.move_asset(asset_out, pool.account, recipient, &amount_out)?;
            received = saturating_sub(&self.balance(asset_out, recipient), &recipient_before);
            quoted = amount_out;
        }

        let delivered = if self.checks_quoted_output {
            quoted
        } else {
            saturating_sub(&self.balance(last_asset, to), &out_before)
        };
        if delivered < *amount_out_min {
            return Err(HostError::InsufficientOutputAmount {
                minimum: amount_out_min.clone(),
                received: delivered,
            });
        }
        Ok(())
    }
}

impl AssetLedger for MockChain {
    fn native_balance(&self, owner: Principal) -> HostResult<Nat> {
        Ok(self.native(owner))
    }

    fn token_balance(&self, token: Principal, owner: Principal) -> HostResult<Nat> {
        Ok(self.balance(token, owner))
    }

    fn transfer_native(&mut self, from: Principal, to: Principal, amount: &Nat) -> HostResult<()> {
        let native = self.wrapped_native;
        self.move_asset(native, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Principal,
        spender: Principal,
        from: Principal,
        to: Principal,
        amount: &Nat,
    ) -> HostResult<()> {
        let approved = self.allowance(token, from, spender);
        if approved < *amount {
            return Err(HostError::InsufficientAllowance {
                token,
                spender,
                required: amount.clone(),
                approved,
            });
        }
        self.atomically(|chain| {
            chain.move_asset(token, from, to, amount)?;
            chain.state.allowances.insert((token, from, spender), saturating_sub(&approved, amount));
            Ok(())
        })
    }

    fn approve(&mut self, token: Principal, owner: Principal, spender: Principal, amount: &Nat) -> HostResult<()> {
        self.state.allowances.insert((token, owner, spender), amount.clone());
        Ok(())
    }
}

impl AmmRouter for MockChain {
    fn get_pair(&self, token_a: Principal, token_b: Principal) -> Option<Principal> {
        self.find_pool(token_a, token_b).map(|pool| pool.account)
    }

    fn swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        value: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        _deadline: u64,
    ) -> HostResult<()> {
        if path.first() != Some(&self.wrapped_native) {
            return Err(HostError::InvalidPath { reason: "path must start at wrapped native".to_string() });
        }
        self.atomically(|chain| chain.route(caller, value, amount_out_min, path, to, false))
    }

    fn swap_exact_tokens_for_eth_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        _deadline: u64,
    ) -> HostResult<()> {
        if path.last() != Some(&self.wrapped_native) {
            return Err(HostError::InvalidPath { reason: "path must end at wrapped native".to_string() });
        }
        self.atomically(|chain| chain.route(caller, amount_in, amount_out_min, path, to, true))
    }

    fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
        &mut self,
        caller: Principal,
        amount_in: &Nat,
        amount_out_min: &Nat,
        path: &[Principal],
        to: Principal,
        _deadline: u64,
    ) -> HostResult<()> {
        self.atomically(|chain| chain.route(caller, amount_in, amount_out_min, path, to, true))
    }
}

impl Environment for MockChain {
    /// Journal depth at the time the checkpoint was opened
    type Checkpoint = usize;

    fn checkpoint(&mut self) -> usize {
        self.journal.push(self.state.clone());
        self.journal.len() - 1
    }

    fn commit(&mut self, checkpoint: usize) {
        self.journal.truncate(checkpoint);
    }

    fn revert_to(&mut self, checkpoint: usize) {
        if let Some(snapshot) = self.journal.get(checkpoint).cloned() {
            self.state = snapshot;
        }
        self.journal.truncate(checkpoint);
    }

    fn emit_event(&mut self, emitter: Principal, event: EngineEvent) {
        self.state.events.push((emitter, event));
    }

    fn timestamp(&self) -> u64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u8) -> Principal {
        Principal::from_slice(&[id])
    }

    const WETH: u8 = 3;
    const ROUTER: u8 = 2;

    #[test]
    fn test_transfer_fee_reduces_delivery() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.mint(p(10), p(7), 1000);
        chain.set_transfer_fee(p(10), 100);
        chain.approve(p(10), p(7), p(1), &Nat::from(1000u64)).unwrap();

        chain.transfer_from(p(10), p(1), p(7), p(1), &Nat::from(1000u64)).unwrap();

        assert_eq!(chain.balance(p(10), p(1)), Nat::from(990u64));
        assert_eq!(chain.balance(p(10), p(7)), zero());
        assert_eq!(chain.allowance(p(10), p(7), p(1)), zero());
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.mint(p(10), p(7), 1000);
        let result = chain.transfer_from(p(10), p(1), p(7), p(1), &Nat::from(1u64));
        assert!(matches!(result, Err(HostError::InsufficientAllowance { .. })));
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.mint_native(p(1), 100);

        let outer = chain.checkpoint();
        chain.transfer_native(p(1), p(5), &Nat::from(10u64)).unwrap();
        let inner = chain.checkpoint();
        chain.transfer_native(p(1), p(6), &Nat::from(20u64)).unwrap();
        chain.revert_to(inner);

        assert_eq!(chain.native(p(5)), Nat::from(10u64));
        assert_eq!(chain.native(p(6)), zero());

        chain.revert_to(outer);
        assert_eq!(chain.native(p(1)), Nat::from(100u64));
        assert_eq!(chain.open_checkpoints(), 0);
    }

    #[test]
    fn test_multi_hop_swap_and_slippage() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.add_pool(p(WETH), p(10), 3, 1, 1_000_000);
        chain.add_pool(p(10), p(11), 1, 1, 1_000_000);
        chain.mint_native(p(1), 100);

        let path = [p(WETH), p(10), p(11)];
        let result = chain.swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(100u64), &Nat::from(301u64), &path, p(7), u64::MAX,
        );
        assert!(matches!(result, Err(HostError::InsufficientOutputAmount { .. })));
        assert_eq!(chain.native(p(1)), Nat::from(100u64));

        chain.swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(100u64), &Nat::from(300u64), &path, p(7), u64::MAX,
        ).unwrap();
        assert_eq!(chain.balance(p(11), p(7)), Nat::from(300u64));
    }

    #[test]
    fn test_missing_pair() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        assert_eq!(chain.get_pair(p(10), p(11)), None);
        let result = chain.swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(1u64), &zero(), &[p(10), p(11)], p(1), u64::MAX,
        );
        assert!(matches!(result, Err(HostError::PairNotFound { .. })));
    }

    #[test]
    fn test_short_pull_leaves_input_with_caller() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.add_pool(p(10), p(11), 1, 1, 1_000_000);
        chain.mint(p(10), p(1), 100);
        chain.approve(p(10), p(1), p(ROUTER), &Nat::from(100u64)).unwrap();
        chain.short_router_pull(p(10), 10);

        chain.swap_exact_tokens_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(100u64), &zero(), &[p(10), p(11)], p(7), u64::MAX,
        ).unwrap();

        assert_eq!(chain.balance(p(10), p(1)), Nat::from(10u64));
        assert_eq!(chain.balance(p(11), p(7)), Nat::from(90u64));
    }

    #[test]
    fn test_quoted_output_check_ignores_transfer_fee() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.add_pool(p(WETH), p(10), 1, 1, 1_000_000);
        chain.set_transfer_fee(p(10), 100);
        chain.mint_native(p(1), 200);
        let path = [p(WETH), p(10)];

        let strict = chain.swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(100u64), &Nat::from(100u64), &path, p(7), u64::MAX,
        );
        assert!(matches!(strict, Err(HostError::InsufficientOutputAmount { .. })));

        chain.check_quoted_output();
        chain.swap_exact_eth_for_tokens_supporting_fee_on_transfer_tokens(
            p(1), &Nat::from(100u64), &Nat::from(100u64), &path, p(7), u64::MAX,
        ).unwrap();
        assert_eq!(chain.balance(p(10), p(7)), Nat::from(99u64));
    }

    #[test]
    fn test_rejecting_recipient() {
        let mut chain = MockChain::new(p(WETH), p(ROUTER));
        chain.mint_native(p(1), 10);
        chain.reject_native(p(5));
        let result = chain.transfer_native(p(1), p(5), &Nat::from(1u64));
        assert!(matches!(result, Err(HostError::Rejected { .. })));
        assert_eq!(chain.native(p(1)), Nat::from(10u64));
    }
}
