//! # Settlement — harvest arithmetic
//!
//! Pure computation of a depositor's harvest outcome from a pool snapshot and
//! their contribution. No storage, no `Env`: the harvest entry point loads
//! state, calls [`settle`], then applies the result.
//!
//! All divisions are integer divisions truncating toward zero, on i128
//! amounts (18-decimal fixed point by convention). Intermediate products use
//! checked arithmetic; `Error::MathOverflow` is returned rather than wrapping.
//!
//! ## The overflow rule
//!
//! For a pool that is *not* oversubscribed the denominator is the raising
//! target, so a depositor who contributed `c` receives
//! `offering * c / raising` and no refund.
//!
//! For an oversubscribed pool (`has_overflow` and `total > raising`) the
//! denominator becomes the total actually deposited: everyone's offering
//! share shrinks proportionally, and the contribution beyond each user's
//! effective pro-rata raising share is refunded. Pools flagged `has_tax`
//! retain `tax_bps` basis points of that refund as `tax_amount`.

use crate::types::Pool;
use crate::Error;

/// Basis-point denominator for the overflow tax rate.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Outcome of harvesting one position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settlement {
    /// Offering-token units paid to the depositor.
    pub offering_payout: i128,
    /// Deposit-token units returned to the depositor (oversubscribed pools).
    pub refund_amount: i128,
    /// Deposit-token units retained by the pool out of the gross refund.
    pub tax_amount: i128,
}

/// `a * b / denominator` with checked intermediate product.
fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(denominator))
        .ok_or(Error::MathOverflow)
}

/// Compute the harvest outcome for a contribution of `contributed` into
/// `pool`, with `tax_bps` as the contract's overflow tax rate.
///
/// Preconditions (enforced by the harvest entry point): `contributed > 0`
/// and the pool has been configured (`raising_amount > 0`).
pub fn settle(pool: &Pool, contributed: i128, tax_bps: u32) -> Result<Settlement, Error> {
    let oversubscribed = pool.is_oversubscribed();
    let denominator = if oversubscribed {
        pool.total_deposited
    } else {
        pool.raising_amount
    };
    if denominator <= 0 {
        return Err(Error::MathOverflow);
    }

    let offering_payout = mul_div(pool.offering_amount, contributed, denominator)?;

    if !oversubscribed {
        return Ok(Settlement {
            offering_payout,
            refund_amount: 0,
            tax_amount: 0,
        });
    }

    // The deposit-token amount this user effectively raised; the rest of
    // their contribution is excess.
    let raised_share = mul_div(pool.raising_amount, contributed, denominator)?;
    let refund_gross = contributed
        .checked_sub(raised_share)
        .ok_or(Error::MathOverflow)?;

    let tax_amount = if pool.has_tax {
        mul_div(refund_gross, i128::from(tax_bps), BPS_DENOMINATOR)?
    } else {
        0
    };

    Ok(Settlement {
        offering_payout,
        refund_amount: refund_gross - tax_amount,
        tax_amount,
    })
}
