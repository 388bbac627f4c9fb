//! Fixed-point voting power math.
//!
//! ## Formulas
//! ```text
//! P                 = 10^18                                  // 1.0
//! balance_power     = isqrt(balance * P)
//! multiplier        = P + min(elapsed, 30d) * P / 30d         // P ..= 2P
//! stake_power       = isqrt(staked * P) * multiplier / P
//! voting_power      = balance_power + stake_power
//! ```
//! Products are taken in `U256` so that `i128` token amounts at 18 decimals
//! never overflow before the square root brings them back down. Division
//! truncates toward zero everywhere.

use soroban_sdk::{Env, U256};

use crate::ContractError;

/// Fixed-point representation of `1.0`.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;
/// Time after which the stake multiplier stops growing (30 days).
pub const MAX_BONUS_DURATION: u64 = 30 * 86_400;

fn precision_u256(env: &Env) -> U256 {
    U256::from_u128(env, PRECISION as u128)
}

fn narrow(value: &U256) -> Result<i128, ContractError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(ContractError::Overflow)
}

/// Floor square root via the Babylonian method.
///
/// Returns the largest `y` with `y * y <= x`. Safe for every `U256` value,
/// including `U256::MAX`.
pub fn isqrt(x: &U256) -> U256 {
    let env = x.env();
    let zero = U256::from_u32(env, 0);
    if *x == zero {
        return zero;
    }
    let two = U256::from_u32(env, 2);

    let mut y = x.clone();
    // (x + 1) / 2, written so it cannot overflow at the top of the range.
    let mut z = x.div(&two).add(&x.rem_euclid(&two));
    while z < y {
        y = z.clone();
        z = x.div(&z).add(&z).div(&two);
    }
    y
}

/// `isqrt(amount * P)`, the square-root compression of a token amount.
///
/// Non-positive amounts have no power.
pub fn sqrt_scaled(env: &Env, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Ok(0);
    }
    let scaled = U256::from_u128(env, amount as u128).mul(&precision_u256(env));
    narrow(&isqrt(&scaled))
}

/// Stake multiplier after `elapsed` seconds of continuous staking.
///
/// Linear from `P` at zero to `2P` at [`MAX_BONUS_DURATION`], flat after.
pub fn multiplier_for_elapsed(elapsed: u64) -> i128 {
    if elapsed >= MAX_BONUS_DURATION {
        return 2 * PRECISION;
    }
    // elapsed < 2^22, so the product stays far inside i128.
    PRECISION + (elapsed as i128 * PRECISION) / MAX_BONUS_DURATION as i128
}

/// Power contributed by the wallet balance.
pub fn balance_power(env: &Env, balance: i128) -> Result<i128, ContractError> {
    sqrt_scaled(env, balance)
}

/// Power contributed by a staked amount under the given multiplier.
pub fn stake_power(env: &Env, staked: i128, multiplier: i128) -> Result<i128, ContractError> {
    if staked <= 0 {
        return Ok(0);
    }
    let base = U256::from_u128(env, sqrt_scaled(env, staked)? as u128);
    let boosted = base
        .mul(&U256::from_u128(env, multiplier as u128))
        .div(&precision_u256(env));
    narrow(&boosted)
}

/// `numerator * P / denominator`, or zero when the denominator is zero.
pub fn ratio(env: &Env, numerator: i128, denominator: i128) -> U256 {
    if denominator <= 0 || numerator <= 0 {
        return U256::from_u32(env, 0);
    }
    U256::from_u128(env, numerator as u128)
        .mul(&precision_u256(env))
        .div(&U256::from_u128(env, denominator as u128))
}
