//! # Whitelist Registry
//!
//! Address → tier mapping consulted by the deposit ledger for pools with
//! `has_whitelist` set. Tier 0 (or no entry) means ineligible; tier 1 is the
//! standard whitelist tier; higher tiers are stored verbatim but carry no
//! extra meaning yet — eligibility is only the `tier >= 1` check.
//!
//! Mutations are operator-gated at the entry points; this module only
//! implements the semantics.

use soroban_sdk::{symbol_short, Address, Env, Vec};

use crate::storage;
use crate::types::Pool;

/// Overwrite the tier stored for `address`. Idempotent; tier 0 removes the
/// entry entirely.
///
/// Emits a `wl_set` event.
pub fn set_tier(env: &Env, address: &Address, tier: u32) {
    storage::set_tier(env, address, tier);
    env.events()
        .publish((symbol_short!("wl_set"),), (address.clone(), tier));
}

/// Batched [`set_tier`]: assign `tier` to every address in the list.
pub fn add_many(env: &Env, addresses: &Vec<Address>, tier: u32) {
    for address in addresses.iter() {
        set_tier(env, &address, tier);
    }
}

/// Tier stored for `address`, 0 when absent.
pub fn tier_of(env: &Env, address: &Address) -> u32 {
    storage::get_tier(env, address)
}

/// True when `pool` does not require a whitelist, or `address` holds any
/// tier >= 1.
pub fn is_eligible(env: &Env, address: &Address, pool: &Pool) -> bool {
    !pool.has_whitelist || storage::get_tier(env, address) >= 1
}
