//! # Roles — owner/manager access control
//!
//! The ITO's privileged surface is a flat two-level role set:
//!
//! ```text
//! Owner
//!   └── Managers (any number, boolean flags)
//! ```
//!
//! ## Storage layout
//!
//! - `DataKey::Owner`          → `Address` — the one and only owner.
//! - `DataKey::Manager(addr)`  → `bool`    — manager flag for `addr`.
//!
//! ## Event emissions
//!
//! Manager mutations emit a `mgr_set` event so off-chain indexers can
//! reconstruct the manager set without reading storage:
//!
//! | Event topic prefix | Trigger                     |
//! |--------------------|-----------------------------|
//! | `mgr_set`          | Manager flag set or cleared |
//!
//! ## Threat model notes
//!
//! - Only the owner can appoint or remove managers; managers cannot mint
//!   more managers.
//! - The owner cannot be replaced or removed; ownership is fixed at `init`.
//! - Every guard takes the *claimed* caller address; entry points must pair
//!   it with `require_auth()` so the claim is signature-backed.

use soroban_sdk::{symbol_short, Address, Env};

use crate::{storage, Error};

/// Record the owner at initialization. The `AlreadyInitialized` check lives
/// in the `init` entry point.
pub fn init_owner(env: &Env, owner: &Address) {
    storage::set_owner(env, owner);
}

/// The contract owner.
pub fn owner(env: &Env) -> Address {
    storage::get_owner(env)
}

/// Returns `true` if `address` currently holds the manager flag.
pub fn is_manager(env: &Env, address: &Address) -> bool {
    storage::get_manager(env, address)
}

/// Set or clear the manager flag on `target`. Owner-only.
///
/// Emits a `mgr_set` event.
pub fn set_manager(env: &Env, caller: &Address, target: &Address, enabled: bool) {
    require_owner(env, caller);
    storage::set_manager(env, target, enabled);
    env.events()
        .publish((symbol_short!("mgr_set"), target.clone()), enabled);
}

/// Assert that `address` is the owner. Panics with `Error::Unauthorized`.
pub fn require_owner(env: &Env, address: &Address) {
    if *address != storage::get_owner(env) {
        soroban_sdk::panic_with_error!(env, Error::Unauthorized);
    }
}

/// Assert that `address` is the owner or a manager.
/// Gates every pool/whitelist/window/offering-token mutation.
#[inline]
pub fn require_operator(env: &Env, address: &Address) {
    if *address == storage::get_owner(env) || storage::get_manager(env, address) {
        return;
    }
    soroban_sdk::panic_with_error!(env, Error::Unauthorized);
}
