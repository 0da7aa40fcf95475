//! # Types
//!
//! Shared data structures used across all modules of the ITO contract.
//!
//! ## Design decisions
//!
//! ### Pre-allocated pools
//!
//! The contract is constructed with a fixed `pool_count`; every id in
//! `0..pool_count` is a valid pool from day one. An id that has never been
//! configured reads as [`Pool::unconfigured`], which carries
//! `is_stop_deposit = true` and no deposit token, so deposits into it are
//! rejected until an admin calls `set_pool`. This keeps `view_pool_information`
//! total over the id range without a separate "exists" flag.
//!
//! ### Sale phase as a Finite-State Machine
//!
//! [`SalePhase`] is derived from the ledger sequence and the stored
//! [`SaleWindow`], never stored itself:
//!
//! ```text
//! NotStarted ──► Active ──► Ended
//! ```
//!
//! The phase only moves forward because the ledger sequence only moves
//! forward; `start_sale`/`end_sale` clamp the window boundaries to the
//! current sequence but can never reorder them.

use soroban_sdk::{contracttype, Address};

/// Current phase of the sale, shared by every pool.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Before `start_block`; only admin configuration is possible.
    NotStarted,
    /// Deposits are accepted.
    Active,
    /// Deposits are closed; harvesting is open.
    Ended,
}

/// Sale window boundaries in ledger sequence numbers, set at `init`.
///
/// Half-open: the sale is active for sequences in `[start_block, end_block)`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SaleWindow {
    pub start_block: u32,
    pub end_block: u32,
}

impl SaleWindow {
    /// Map a ledger sequence to the sale phase.
    pub fn phase_at(&self, sequence: u32) -> SalePhase {
        if sequence < self.start_block {
            SalePhase::NotStarted
        } else if sequence < self.end_block {
            SalePhase::Active
        } else {
            SalePhase::Ended
        }
    }
}

/// Configuration and running totals for one offering pool.
///
/// Amounts are `i128` token units (18-decimal fixed point by convention).
/// Configuration fields are overwritten wholesale by `set_pool`;
/// `total_deposited` and `tax_collected` are owned by the deposit ledger and
/// the harvest engine respectively and survive reconfiguration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Offering-token units allocated to this pool.
    pub offering_amount: i128,
    /// Target raise in deposit-token units; the harvest denominator unless
    /// the pool is oversubscribed with `has_overflow`.
    pub raising_amount: i128,
    /// Per-user deposit cap; 0 means unlimited.
    pub limit_per_user: i128,
    /// Token this pool accepts. `None` until the pool is configured.
    pub deposit_token: Option<Address>,
    /// Apply the contract's overflow tax to this pool's refunds at harvest.
    pub has_tax: bool,
    /// Restrict deposits to whitelisted (tier >= 1) addresses.
    pub has_whitelist: bool,
    /// Deposits rejected while set. Defaults to `true` for unconfigured pools.
    pub is_stop_deposit: bool,
    /// Allow `total_deposited` to exceed `raising_amount`; the excess is
    /// refunded pro rata at harvest.
    pub has_overflow: bool,
    /// Sum of all accepted deposits. Always equals the sum of every
    /// position's `amount_contributed` for this pool.
    pub total_deposited: i128,
    /// Overflow tax retained across all harvests of this pool.
    pub tax_collected: i128,
}

impl Pool {
    /// The record every in-range pool id holds before `set_pool` touches it.
    pub fn unconfigured() -> Self {
        Pool {
            offering_amount: 0,
            raising_amount: 0,
            limit_per_user: 0,
            deposit_token: None,
            has_tax: false,
            has_whitelist: false,
            is_stop_deposit: true,
            has_overflow: false,
            total_deposited: 0,
            tax_collected: 0,
        }
    }

    /// True once `total_deposited` exceeds the raising target on an
    /// overflow-enabled pool. Decides the harvest denominator.
    pub fn is_oversubscribed(&self) -> bool {
        self.has_overflow && self.total_deposited > self.raising_amount
    }
}

/// Per-(pool, user) deposit record. Created on first deposit, never deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPoolPosition {
    /// Accumulated accepted deposits in the pool's deposit token.
    pub amount_contributed: i128,
    /// Transitions false -> true exactly once, during harvest.
    pub has_harvested: bool,
}

impl UserPoolPosition {
    pub fn empty() -> Self {
        UserPoolPosition {
            amount_contributed: 0,
            has_harvested: false,
        }
    }
}
