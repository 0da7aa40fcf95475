
#![allow(dead_code)]

extern crate std;

use crate::settlement::Settlement;
use crate::types::{Pool, UserPoolPosition};

/// INV-1: a pool's running total equals the sum of its positions.
pub fn assert_total_matches_positions(pool_id: u32, pool: &Pool, positions: &[UserPoolPosition]) {
    let sum: i128 = positions.iter().map(|p| p.amount_contributed).sum();
    assert_eq!(
        pool.total_deposited, sum,
        "INV-1 violated: pool {} total {} != position sum {}",
        pool_id, pool.total_deposited, sum
    );
}

/// INV-2: without overflow enabled a pool may still exceed its target (no
/// deposit-time cap), but an oversubscribed denominator is only ever used
/// when `has_overflow` is set.
pub fn assert_oversubscription_flag(pool: &Pool) {
    if pool.is_oversubscribed() {
        assert!(
            pool.has_overflow,
            "INV-2 violated: oversubscribed pool without has_overflow"
        );
        assert!(
            pool.total_deposited > pool.raising_amount,
            "INV-2 violated: oversubscribed pool not past target"
        );
    }
}

/// INV-3: a settlement never pays out more than the contribution justifies
/// and never produces negative components.
pub fn assert_settlement_bounds(pool: &Pool, contributed: i128, outcome: &Settlement) {
    assert!(
        outcome.offering_payout >= 0,
        "INV-3 violated: negative payout {}",
        outcome.offering_payout
    );
    assert!(
        outcome.offering_payout <= pool.offering_amount,
        "INV-3 violated: payout {} exceeds pool offering {}",
        outcome.offering_payout,
        pool.offering_amount
    );
    assert!(
        outcome.refund_amount >= 0 && outcome.tax_amount >= 0,
        "INV-3 violated: negative refund/tax"
    );
    assert!(
        outcome.refund_amount + outcome.tax_amount <= contributed,
        "INV-3 violated: refund {} + tax {} exceeds contribution {}",
        outcome.refund_amount,
        outcome.tax_amount,
        contributed
    );
}

/// INV-4: the sum of all settlements of a pool stays within the pool's
/// offering allocation and its deposited funds.
pub fn assert_pool_solvent(pool: &Pool, outcomes: &[Settlement]) {
    let paid: i128 = outcomes.iter().map(|o| o.offering_payout).sum();
    let refunded: i128 = outcomes.iter().map(|o| o.refund_amount + o.tax_amount).sum();
    assert!(
        paid <= pool.offering_amount,
        "INV-4 violated: total payout {} exceeds offering {}",
        paid,
        pool.offering_amount
    );
    assert!(
        refunded <= pool.total_deposited,
        "INV-4 violated: total refund {} exceeds deposits {}",
        refunded,
        pool.total_deposited
    );
}

/// INV-5: a position's harvested flag only ever moves false -> true.
pub fn assert_harvest_monotonic(before: &UserPoolPosition, after: &UserPoolPosition) {
    assert!(
        !(before.has_harvested && !after.has_harvested),
        "INV-5 violated: has_harvested reverted to false"
    );
}

/// INV-6: reconfiguration preserves the accumulators.
pub fn assert_reconfigure_preserves_totals(before: &Pool, after: &Pool) {
    assert_eq!(
        before.total_deposited, after.total_deposited,
        "INV-6 violated: set_pool reset total_deposited"
    );
    assert_eq!(
        before.tax_collected, after.tax_collected,
        "INV-6 violated: set_pool reset tax_collected"
    );
}
