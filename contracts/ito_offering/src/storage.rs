//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the ITO contract:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type         | Description                            |
//! |------------------|--------------|----------------------------------------|
//! | `Owner`          | `Address`    | Contract owner, set once at `init`     |
//! | `PoolCount`      | `u32`        | Number of pre-allocated pools          |
//! | `Window`         | `SaleWindow` | Sale start/end ledger sequences        |
//! | `OfferingToken`  | `Address`    | Payout asset, written at most once     |
//! | `OverflowTaxBps` | `u32`        | Tax rate on overflow refunds           |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type               | Description              |
//! |--------------------------|--------------------|--------------------------|
//! | `Pool(id)`               | `Pool`             | Pool config + totals     |
//! | `Position(id, addr)`     | `UserPoolPosition` | Per-user contribution    |
//! | `Tier(addr)`             | `u32`              | Whitelist tier           |
//! | `Manager(addr)`          | `bool`             | Manager flag             |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! Pools and positions are read through get-or-default accessors so the
//! registry behaves as a pre-allocated array: every in-range id yields a
//! record, absent entries read as [`Pool::unconfigured`] /
//! [`UserPoolPosition::empty`].

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Pool, SaleWindow, UserPoolPosition};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract owner (Instance).
    Owner,
    /// Fixed number of pools set at `init` (Instance).
    PoolCount,
    /// Sale window boundaries (Instance).
    Window,
    /// Offering token address, once set (Instance).
    OfferingToken,
    /// Overflow tax rate in basis points (Instance).
    OverflowTaxBps,
    /// Pool record keyed by id (Persistent).
    Pool(u32),
    /// User position keyed by (pool id, address) (Persistent).
    Position(u32, Address),
    /// Whitelist tier keyed by address (Persistent).
    Tier(Address),
    /// Manager flag keyed by address (Persistent).
    Manager(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::Owner, owner);
}

/// Read the owner. Existence is an initialization invariant: every entry
/// point except `init` is unreachable before `init` succeeds.
pub fn get_owner(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .expect("not initialized")
}

pub fn set_pool_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::PoolCount, &count);
}

pub fn get_pool_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn set_window(env: &Env, window: &SaleWindow) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::Window, window);
}

pub fn get_window(env: &Env) -> SaleWindow {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Window)
        .expect("not initialized")
}

pub fn set_offering_token(env: &Env, token: &Address) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::OfferingToken, token);
}

pub fn get_offering_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::OfferingToken)
}

pub fn set_overflow_tax_bps(env: &Env, bps: u32) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::OverflowTaxBps, &bps);
}

/// Tax rate applied to overflow refunds on `has_tax` pools. Defaults to 1%.
pub fn get_overflow_tax_bps(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::OverflowTaxBps)
        .unwrap_or(100)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key, if the entry exists.
fn bump_persistent(env: &Env, key: &DataKey) {
    if env.storage().persistent().has(key) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
}

/// Load a pool record; an id never touched by `set_pool` reads as the
/// unconfigured default. Callers are responsible for the id-range check.
pub fn get_pool(env: &Env, pool_id: u32) -> Pool {
    let key = DataKey::Pool(pool_id);
    let pool = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(Pool::unconfigured);
    bump_persistent(env, &key);
    pool
}

pub fn set_pool(env: &Env, pool_id: u32, pool: &Pool) {
    let key = DataKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    bump_persistent(env, &key);
}

/// Load a user's position in a pool; absent positions read as empty.
pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> UserPoolPosition {
    let key = DataKey::Position(pool_id, user.clone());
    let position = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(UserPoolPosition::empty);
    bump_persistent(env, &key);
    position
}

pub fn set_position(env: &Env, pool_id: u32, user: &Address, position: &UserPoolPosition) {
    let key = DataKey::Position(pool_id, user.clone());
    env.storage().persistent().set(&key, position);
    bump_persistent(env, &key);
}

/// Whitelist tier for `address`; absent entries are tier 0 (ineligible).
pub fn get_tier(env: &Env, address: &Address) -> u32 {
    let key = DataKey::Tier(address.clone());
    let tier = env.storage().persistent().get(&key).unwrap_or(0);
    bump_persistent(env, &key);
    tier
}

pub fn set_tier(env: &Env, address: &Address, tier: u32) {
    let key = DataKey::Tier(address.clone());
    if tier == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &tier);
        bump_persistent(env, &key);
    }
}

pub fn get_manager(env: &Env, address: &Address) -> bool {
    let key = DataKey::Manager(address.clone());
    let enabled = env.storage().persistent().get(&key).unwrap_or(false);
    bump_persistent(env, &key);
    enabled
}

pub fn set_manager(env: &Env, address: &Address, enabled: bool) {
    let key = DataKey::Manager(address.clone());
    if enabled {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}
