//! # Initial Token Offering Contract
//!
//! This is the root crate of the **Initial Token Offering (ITO)** contract: a
//! multi-pool fundraising ledger. Admins configure up to `pool_count` pools,
//! each accepting its own deposit token under its own caps and whitelist
//! policy; users deposit while the shared sale window is active; after the
//! window closes each depositor harvests a pro-rata share of the offering
//! token, with oversubscribed pools refunding (and optionally taxing) the
//! excess contribution.
//!
//! | Phase        | Entry Point(s)                                            |
//! |--------------|-----------------------------------------------------------|
//! | Bootstrap    | [`InitialTokenOffering::init`]                            |
//! | Role admin   | `set_manager`                                             |
//! | Configuration| `set_pool`, `add_to_whitelist`, `set_tier`, `set_offering_token`, `set_overflow_tax` |
//! | Sale         | [`InitialTokenOffering::deposit_pool`], `start_sale`, `end_sale` |
//! | Settlement   | [`InitialTokenOffering::harvest_pool`]                    |
//! | Recovery     | `recover_token`                                           |
//! | Queries      | `view_pool_information`, `user_info`, `current_phase`, `sale_window`, ... |
//!
//! ## Architecture
//!
//! Authorization is fully delegated to [`roles`], whitelist semantics to
//! [`whitelist`], harvest arithmetic to [`settlement`], and storage access to
//! [`storage`]. This file contains the public entry points, the precondition
//! ordering, and event emissions.
//!
//! Every operation is atomic: a panic (including a re-raised token failure)
//! aborts the invocation and rolls back all storage writes, so no caller ever
//! observes a partially-applied deposit or harvest.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

pub mod events;
pub mod roles;
pub mod settlement;
mod storage;
pub mod types;
pub mod whitelist;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use types::{Pool, SalePhase, SaleWindow, UserPoolPosition};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    Unauthorized = 2,
    InvalidWindow = 3,
    SaleNotActive = 4,
    SaleNotEnded = 5,
    PoolIdOutOfRange = 6,
    InvalidPoolConfig = 7,
    DepositsStopped = 8,
    NotWhitelisted = 9,
    ZeroAmount = 10,
    PerUserLimitExceeded = 11,
    OfferingTokenUnset = 12,
    OfferingTokenAlreadySet = 13,
    NothingToHarvest = 14,
    AlreadyHarvested = 15,
    TransferFailed = 16,
    MathOverflow = 17,
    TokenNotRecoverable = 18,
}

#[contract]
pub struct InitialTokenOffering;

#[contractimpl]
impl InitialTokenOffering {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: owner, pool count, and sale window.
    ///
    /// Must be called exactly once immediately after deployment. Subsequent
    /// calls panic with `Error::AlreadyInitialized`.
    ///
    /// - `owner` must sign the transaction and becomes the fixed owner.
    /// - `pool_count` pre-allocates pool ids `0..pool_count` (must be > 0).
    /// - The sale runs over ledger sequences `[now + start_offset,
    ///   now + end_offset)`; `end_offset` must exceed `start_offset`.
    /// - `offering_token`, when given, is the one-time offering-token write
    ///   (the constructor shape that takes the token up front).
    pub fn init(
        env: Env,
        owner: Address,
        pool_count: u32,
        start_offset: u32,
        end_offset: u32,
        offering_token: Option<Address>,
    ) {
        owner.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if pool_count == 0 {
            panic_with_error!(&env, Error::InvalidPoolConfig);
        }
        if end_offset <= start_offset {
            panic_with_error!(&env, Error::InvalidWindow);
        }

        let sequence = env.ledger().sequence();
        roles::init_owner(&env, &owner);
        storage::set_pool_count(&env, pool_count);
        storage::set_window(
            &env,
            &SaleWindow {
                start_block: sequence + start_offset,
                end_block: sequence + end_offset,
            },
        );

        if let Some(token) = offering_token {
            storage::set_offering_token(&env, &token);
            events::emit_offering_token_set(&env, token);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Set or clear the manager flag on `target`. Owner-only.
    pub fn set_manager(env: Env, caller: Address, target: Address, enabled: bool) {
        caller.require_auth();
        roles::set_manager(&env, &caller, &target, enabled);
    }

    /// Return `true` if `address` holds the manager flag.
    pub fn is_manager(env: Env, address: Address) -> bool {
        roles::is_manager(&env, &address)
    }

    /// Return the contract owner.
    pub fn owner(env: Env) -> Address {
        roles::owner(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pool configuration
    // ─────────────────────────────────────────────────────────

    /// Configure (or reconfigure) pool `pool_id`.
    ///
    /// - `caller` must be the owner or a manager.
    /// - `pool_id` must be below the `pool_count` fixed at `init`.
    /// - `offering_amount` and `raising_amount` must be positive;
    ///   `limit_per_user` of 0 means unlimited.
    ///
    /// Reconfiguration overwrites only the configuration fields:
    /// `total_deposited`, `tax_collected`, and all user positions survive, so
    /// adjusting caps mid-sale can never corrupt already-accepted funds.
    pub fn set_pool(
        env: Env,
        caller: Address,
        offering_amount: i128,
        raising_amount: i128,
        limit_per_user: i128,
        pool_id: u32,
        deposit_token: Address,
        has_whitelist: bool,
        is_stop_deposit: bool,
        has_tax: bool,
        has_overflow: bool,
    ) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        Self::require_pool_id(&env, pool_id);
        if offering_amount <= 0 || raising_amount <= 0 || limit_per_user < 0 {
            panic_with_error!(&env, Error::InvalidPoolConfig);
        }

        let mut pool = storage::get_pool(&env, pool_id);
        pool.offering_amount = offering_amount;
        pool.raising_amount = raising_amount;
        pool.limit_per_user = limit_per_user;
        pool.deposit_token = Some(deposit_token.clone());
        pool.has_whitelist = has_whitelist;
        pool.is_stop_deposit = is_stop_deposit;
        pool.has_tax = has_tax;
        pool.has_overflow = has_overflow;
        storage::set_pool(&env, pool_id, &pool);

        events::emit_pool_configured(&env, pool_id, offering_amount, raising_amount, deposit_token);
    }

    /// Read-only snapshot of pool `pool_id`.
    ///
    /// An in-range id that was never configured returns the default record
    /// (`is_stop_deposit = true`, no deposit token).
    pub fn view_pool_information(env: Env, pool_id: u32) -> Pool {
        Self::require_pool_id(&env, pool_id);
        storage::get_pool(&env, pool_id)
    }

    /// Number of pre-allocated pools.
    pub fn pool_count(env: Env) -> u32 {
        storage::get_pool_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Whitelist
    // ─────────────────────────────────────────────────────────

    /// Assign `tier` to every address in `addresses`. Operator-gated.
    pub fn add_to_whitelist(env: Env, caller: Address, addresses: Vec<Address>, tier: u32) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        whitelist::add_many(&env, &addresses, tier);
    }

    /// Overwrite the tier stored for a single address; tier 0 removes.
    /// Operator-gated.
    pub fn set_tier(env: Env, caller: Address, address: Address, tier: u32) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        whitelist::set_tier(&env, &address, tier);
    }

    /// Return the whitelist tier of `address` (0 = not whitelisted).
    pub fn tier_of(env: Env, address: Address) -> u32 {
        whitelist::tier_of(&env, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Offering token & tax policy
    // ─────────────────────────────────────────────────────────

    /// One-time write of the offering (payout) token. Operator-gated.
    ///
    /// Panics with `Error::OfferingTokenAlreadySet` on any second write,
    /// including when `init` already set it.
    pub fn set_offering_token(env: Env, caller: Address, token: Address) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        if storage::get_offering_token(&env).is_some() {
            panic_with_error!(&env, Error::OfferingTokenAlreadySet);
        }
        storage::set_offering_token(&env, &token);
        events::emit_offering_token_set(&env, token);
    }

    /// The offering token, if set.
    pub fn offering_token(env: Env) -> Option<Address> {
        storage::get_offering_token(&env)
    }

    /// Set the tax rate (basis points, max 10_000) applied to overflow
    /// refunds on `has_tax` pools. Operator-gated.
    pub fn set_overflow_tax(env: Env, caller: Address, bps: u32) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        if i128::from(bps) > settlement::BPS_DENOMINATOR {
            panic_with_error!(&env, Error::InvalidPoolConfig);
        }
        storage::set_overflow_tax_bps(&env, bps);
    }

    /// Current overflow tax rate in basis points.
    pub fn overflow_tax_bps(env: Env) -> u32 {
        storage::get_overflow_tax_bps(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Sale window
    // ─────────────────────────────────────────────────────────

    /// Force the sale active by moving `start_block` to the current ledger
    /// sequence. Operator-gated.
    ///
    /// Panics with `Error::InvalidWindow` if the window has already ended.
    pub fn start_sale(env: Env, caller: Address) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        let mut window = storage::get_window(&env);
        let sequence = env.ledger().sequence();
        if sequence >= window.end_block {
            panic_with_error!(&env, Error::InvalidWindow);
        }
        window.start_block = sequence;
        storage::set_window(&env, &window);
        events::emit_sale_started(&env, sequence);
    }

    /// Force the sale ended by moving `end_block` to the current ledger
    /// sequence. Operator-gated.
    ///
    /// Panics with `Error::InvalidWindow` if that would place the end at or
    /// before the start (the window must stay well-formed).
    pub fn end_sale(env: Env, caller: Address) {
        caller.require_auth();
        roles::require_operator(&env, &caller);
        let mut window = storage::get_window(&env);
        let sequence = env.ledger().sequence();
        if sequence <= window.start_block {
            panic_with_error!(&env, Error::InvalidWindow);
        }
        window.end_block = sequence;
        storage::set_window(&env, &window);
        events::emit_sale_ended(&env, sequence);
    }

    /// The sale phase at the current ledger sequence.
    pub fn current_phase(env: Env) -> SalePhase {
        storage::get_window(&env).phase_at(env.ledger().sequence())
    }

    /// The configured sale window.
    pub fn sale_window(env: Env) -> SaleWindow {
        storage::get_window(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Deposit ledger
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's deposit token into pool `pool_id`.
    ///
    /// Preconditions, checked in order, each with its own error: the sale
    /// phase must be `Active`; the pool must not have deposits stopped (an
    /// unconfigured pool always does); the caller must be eligible when the
    /// pool is whitelisted; `amount` must be positive; and when the pool has
    /// a per-user limit the cumulative contribution may not exceed it, even
    /// by one unit.
    ///
    /// No pool-level cap against `raising_amount` is enforced here;
    /// oversubscription is resolved at harvest.
    pub fn deposit_pool(env: Env, user: Address, amount: i128, pool_id: u32) {
        user.require_auth();
        Self::require_pool_id(&env, pool_id);
        if Self::current_phase(env.clone()) != SalePhase::Active {
            panic_with_error!(&env, Error::SaleNotActive);
        }

        let mut pool = storage::get_pool(&env, pool_id);
        if pool.is_stop_deposit {
            panic_with_error!(&env, Error::DepositsStopped);
        }
        if !whitelist::is_eligible(&env, &user, &pool) {
            panic_with_error!(&env, Error::NotWhitelisted);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut position = storage::get_position(&env, pool_id, &user);
        let contributed = position
            .amount_contributed
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::MathOverflow));
        if pool.limit_per_user > 0 && contributed > pool.limit_per_user {
            panic_with_error!(&env, Error::PerUserLimitExceeded);
        }

        // Configured pools always carry a token; a missing one means the
        // registry was never written and deposits are still stopped.
        let deposit_token = match pool.deposit_token.clone() {
            Some(token) => token,
            None => panic_with_error!(&env, Error::DepositsStopped),
        };

        // Pull funds first; a token failure aborts before any ledger write.
        let token_client = token::Client::new(&env, &deposit_token);
        if token_client
            .try_transfer(&user, &env.current_contract_address(), &amount)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailed);
        }

        position.amount_contributed = contributed;
        pool.total_deposited = pool
            .total_deposited
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::MathOverflow));
        storage::set_position(&env, pool_id, &user, &position);
        storage::set_pool(&env, pool_id, &pool);

        events::emit_deposit(&env, pool_id, user, amount);
    }

    /// Read a user's position in pool `pool_id` (zeroed when absent).
    pub fn user_info(env: Env, address: Address, pool_id: u32) -> UserPoolPosition {
        Self::require_pool_id(&env, pool_id);
        storage::get_position(&env, pool_id, &address)
    }

    // ─────────────────────────────────────────────────────────
    // Harvest engine
    // ─────────────────────────────────────────────────────────

    /// Settle the caller's position in pool `pool_id`: pay the pro-rata
    /// offering share and, on oversubscribed pools, the (possibly taxed)
    /// overflow refund. One-time per (pool, user).
    ///
    /// The harvested flag and the tax accrual are written before the
    /// outbound transfers; if either transfer fails the whole invocation
    /// aborts and the flag is rolled back with everything else, so payout is
    /// exactly-once or not-at-all.
    pub fn harvest_pool(env: Env, user: Address, pool_id: u32) {
        user.require_auth();
        Self::require_pool_id(&env, pool_id);
        if Self::current_phase(env.clone()) != SalePhase::Ended {
            panic_with_error!(&env, Error::SaleNotEnded);
        }

        let offering_token = match storage::get_offering_token(&env) {
            Some(token) => token,
            None => panic_with_error!(&env, Error::OfferingTokenUnset),
        };

        let mut position = storage::get_position(&env, pool_id, &user);
        if position.amount_contributed == 0 {
            panic_with_error!(&env, Error::NothingToHarvest);
        }
        if position.has_harvested {
            panic_with_error!(&env, Error::AlreadyHarvested);
        }

        let mut pool = storage::get_pool(&env, pool_id);
        let tax_bps = storage::get_overflow_tax_bps(&env);
        let outcome = match settlement::settle(&pool, position.amount_contributed, tax_bps) {
            Ok(outcome) => outcome,
            Err(err) => panic_with_error!(&env, err),
        };

        position.has_harvested = true;
        storage::set_position(&env, pool_id, &user, &position);
        if outcome.tax_amount > 0 {
            pool.tax_collected = pool
                .tax_collected
                .checked_add(outcome.tax_amount)
                .unwrap_or_else(|| panic_with_error!(&env, Error::MathOverflow));
            storage::set_pool(&env, pool_id, &pool);
        }

        let contract = env.current_contract_address();
        if outcome.offering_payout > 0 {
            let offering_client = token::Client::new(&env, &offering_token);
            if offering_client
                .try_transfer(&contract, &user, &outcome.offering_payout)
                .is_err()
            {
                panic_with_error!(&env, Error::TransferFailed);
            }
        }
        if outcome.refund_amount > 0 {
            // A harvestable position implies a configured pool.
            let deposit_token = match pool.deposit_token.clone() {
                Some(token) => token,
                None => panic_with_error!(&env, Error::TransferFailed),
            };
            let deposit_client = token::Client::new(&env, &deposit_token);
            if deposit_client
                .try_transfer(&contract, &user, &outcome.refund_amount)
                .is_err()
            {
                panic_with_error!(&env, Error::TransferFailed);
            }
        }

        events::emit_harvest(
            &env,
            pool_id,
            user,
            outcome.offering_payout,
            outcome.refund_amount,
            outcome.tax_amount,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Recovery
    // ─────────────────────────────────────────────────────────

    /// Sweep `amount` of a stranded `token` to `to`. Owner-only.
    ///
    /// Refuses the offering token and every configured pool's deposit token
    /// with `Error::TokenNotRecoverable`: those balances back unharvested
    /// positions.
    pub fn recover_token(env: Env, caller: Address, token: Address, to: Address, amount: i128) {
        caller.require_auth();
        roles::require_owner(&env, &caller);
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        if storage::get_offering_token(&env) == Some(token.clone()) {
            panic_with_error!(&env, Error::TokenNotRecoverable);
        }
        let pool_count = storage::get_pool_count(&env);
        for pool_id in 0..pool_count {
            if storage::get_pool(&env, pool_id).deposit_token == Some(token.clone()) {
                panic_with_error!(&env, Error::TokenNotRecoverable);
            }
        }

        let token_client = token::Client::new(&env, &token);
        if token_client
            .try_transfer(&env.current_contract_address(), &to, &amount)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailed);
        }
        events::emit_recovered(&env, token, to, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_pool_id(env: &Env, pool_id: u32) {
        if pool_id >= storage::get_pool_count(env) {
            panic_with_error!(env, Error::PoolIdOutOfRange);
        }
    }
}
