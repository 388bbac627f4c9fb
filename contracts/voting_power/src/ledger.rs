//! Stake ledger storage.
//!
//! Per-account records live in persistent storage under `(STAKE, account)`;
//! the global total and the token address live in instance storage.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const STAKE: Symbol = symbol_short!("STAKE");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const TOKEN: Symbol = symbol_short!("TOKEN");

// TTL: ~30 days
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// Custody position of a single account.
///
/// `stake_start_time` is set when the position opens (zero to non-zero) and
/// cleared when it closes again; deposits and partial withdrawals in between
/// leave it alone.
///
/// Whether a position is open is decided by `staked_amount`, not by a
/// non-zero `stake_start_time`: a position opened while the ledger clock
/// reads 0 stores a start time of 0 yet still accrues its bonus from then.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakeRecord {
    pub staked_amount: i128,
    pub stake_start_time: u64,
}

impl StakeRecord {
    pub fn is_staking(&self) -> bool {
        self.staked_amount > 0
    }

    /// Seconds the current position has been open, zero when closed.
    pub fn elapsed(&self, now: u64) -> u64 {
        if !self.is_staking() {
            return 0;
        }
        now.saturating_sub(self.stake_start_time)
    }

    /// Record after depositing `amount` at time `now`.
    pub fn deposited(&self, amount: i128, now: u64) -> Result<StakeRecord, ContractError> {
        let staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        let stake_start_time = if self.is_staking() {
            self.stake_start_time
        } else {
            now
        };
        Ok(StakeRecord {
            staked_amount,
            stake_start_time,
        })
    }

    /// Record after withdrawing `amount`.
    pub fn withdrawn(&self, amount: i128) -> Result<StakeRecord, ContractError> {
        if amount > self.staked_amount {
            return Err(ContractError::InsufficientStake);
        }
        let staked_amount = self.staked_amount - amount;
        let stake_start_time = if staked_amount == 0 {
            0
        } else {
            self.stake_start_time
        };
        Ok(StakeRecord {
            staked_amount,
            stake_start_time,
        })
    }
}

fn stake_key(account: &Address) -> (Symbol, Address) {
    (STAKE, account.clone())
}

pub(crate) fn load_record(env: &Env, account: &Address) -> StakeRecord {
    env.storage()
        .persistent()
        .get(&stake_key(account))
        .unwrap_or_default()
}

pub(crate) fn store_record(env: &Env, account: &Address, record: &StakeRecord) {
    let key = stake_key(account);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub(crate) fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub(crate) fn configure(env: &Env, token: &Address) {
    env.storage().instance().set(&TOKEN, token);
    env.storage().instance().set(&TOTAL_STAKED, &0i128);
}

pub(crate) fn token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&TOKEN)
        .ok_or(ContractError::NotInitialized)
}
