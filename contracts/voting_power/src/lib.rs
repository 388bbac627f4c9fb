#![no_std]

//! # Square-Root Voting Power
//!
//! Wraps an arbitrary Soroban token and reports voting power that grows with
//! the square root of holdings instead of linearly:
//!
//! - **Balance power**: `sqrt(balance × P)` over the holder's live wallet balance
//! - **Stake power**: `sqrt(staked × P) × multiplier / P` over tokens held in
//!   custody by this contract
//! - **Time multiplier**: grows linearly from 1× to 2× over 30 days of
//!   continuous staking, reset only when the position is fully withdrawn
//!
//! All values are fixed-point with `P = 10^18`. Read-side functions never
//! mutate state; `stake` / `unstake` act only on the caller's own position.

pub mod custody;
pub mod events;
pub mod ledger;
pub mod power;

use soroban_sdk::{contract, contractimpl, contracttype, log, Address, Env, U256};

use ledger::StakeRecord;
use power::{MAX_BONUS_DURATION, PRECISION};

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    InvalidAddress = 2,
    InvalidAmount = 3,
    InsufficientStake = 4,
    TransferFailed = 5,
    Overflow = 6,
}

// ── Public return types ───────────────────────────────────────────────────────

/// Side-by-side view of two accounts returned by `compare_voters`.
///
/// Balances are wallet plus staked tokens. Ratios are `a × P / b`, zero when
/// `b` is zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterComparison {
    pub balance_a: i128,
    pub balance_b: i128,
    pub power_a: i128,
    pub power_b: i128,
    pub balance_ratio: U256,
    pub power_ratio: U256,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VotingPowerContract;

#[contractimpl]
impl VotingPowerContract {
    // ── Construction ──────────────────────────────────────────────────────────

    /// Bind the contract to the token whose holders it scores.
    ///
    /// Runs once at deployment; the token address cannot change afterwards.
    pub fn __constructor(env: Env, token: Address) -> Result<(), ContractError> {
        if token == env.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }

        ledger::configure(&env, &token);
        events::publish_token_configured(&env, &token);

        Ok(())
    }

    // ── Staking ───────────────────────────────────────────────────────────────

    /// Move `amount` tokens from `staker` into custody.
    ///
    /// Requires a prior token allowance for this contract. Opening a position
    /// starts the bonus clock; topping up an open position does not restart it.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        staker.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let token = ledger::token(&env)?;

        let record = ledger::load_record(&env, &staker);
        let updated = record.deposited(amount, env.ledger().timestamp())?;
        let total = ledger::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;

        custody::pull(&env, &token, &staker, amount)?;

        ledger::store_record(&env, &staker, &updated);
        ledger::set_total_staked(&env, total);

        log!(&env, "stake", staker, amount, updated.staked_amount);
        events::publish_stake_changed(&env, &staker, amount, updated.staked_amount);

        Ok(updated.staked_amount)
    }

    /// Return `amount` staked tokens to `staker`.
    ///
    /// Withdrawing the whole position ends the session and its time bonus.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        staker.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let token = ledger::token(&env)?;

        let record = ledger::load_record(&env, &staker);
        let updated = record.withdrawn(amount)?;
        let total = ledger::total_staked(&env)
            .checked_sub(amount)
            .ok_or(ContractError::Overflow)?;

        custody::push(&env, &token, &staker, amount)?;

        ledger::store_record(&env, &staker, &updated);
        ledger::set_total_staked(&env, total);

        log!(&env, "unstake", staker, amount, updated.staked_amount);
        events::publish_stake_changed(&env, &staker, -amount, updated.staked_amount);

        Ok(updated.staked_amount)
    }

    // ── Voting power ──────────────────────────────────────────────────────────

    /// Total voting power: balance power plus stake power.
    pub fn voting_power(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::total_power(&env, &account)
    }

    /// `sqrt(balance × P)` over the account's live wallet balance.
    pub fn voting_power_from_balance(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::balance_power(&env, &account)
    }

    /// `sqrt(staked × P) × time_multiplier / P`, zero when nothing is staked.
    pub fn voting_power_from_stake(env: Env, account: Address) -> Result<i128, ContractError> {
        Self::stake_power(&env, &account)
    }

    /// Stake multiplier in `[P, 2P]`; `P` when the account is not staking.
    pub fn time_multiplier(env: Env, account: Address) -> i128 {
        let record = ledger::load_record(&env, &account);
        Self::multiplier(&env, &record)
    }

    /// Seconds since the current position opened, zero when not staking.
    pub fn stake_duration(env: Env, account: Address) -> u64 {
        ledger::load_record(&env, &account).elapsed(env.ledger().timestamp())
    }

    /// Compare holdings and voting power of two accounts.
    pub fn compare_voters(
        env: Env,
        account_a: Address,
        account_b: Address,
    ) -> Result<VoterComparison, ContractError> {
        let balance_a = Self::holdings(&env, &account_a)?;
        let balance_b = Self::holdings(&env, &account_b)?;
        let power_a = Self::total_power(&env, &account_a)?;
        let power_b = Self::total_power(&env, &account_b)?;

        Ok(VoterComparison {
            balance_a,
            balance_b,
            power_a,
            power_b,
            balance_ratio: power::ratio(&env, balance_a, balance_b),
            power_ratio: power::ratio(&env, power_a, power_b),
        })
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        ledger::token(&env)
    }

    pub fn get_staked(env: Env, account: Address) -> i128 {
        ledger::load_record(&env, &account).staked_amount
    }

    pub fn get_stake_record(env: Env, account: Address) -> StakeRecord {
        ledger::load_record(&env, &account)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        ledger::total_staked(&env)
    }

    pub fn precision(_env: Env) -> i128 {
        PRECISION
    }

    pub fn max_bonus_duration(_env: Env) -> u64 {
        MAX_BONUS_DURATION
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn multiplier(env: &Env, record: &StakeRecord) -> i128 {
        if !record.is_staking() {
            return PRECISION;
        }
        power::multiplier_for_elapsed(record.elapsed(env.ledger().timestamp()))
    }

    fn balance_power(env: &Env, account: &Address) -> Result<i128, ContractError> {
        let token = ledger::token(env)?;
        let balance = custody::balance_of(env, &token, account);
        power::balance_power(env, balance)
    }

    fn stake_power(env: &Env, account: &Address) -> Result<i128, ContractError> {
        let record = ledger::load_record(env, account);
        if !record.is_staking() {
            return Ok(0);
        }
        power::stake_power(env, record.staked_amount, Self::multiplier(env, &record))
    }

    fn total_power(env: &Env, account: &Address) -> Result<i128, ContractError> {
        Self::balance_power(env, account)?
            .checked_add(Self::stake_power(env, account)?)
            .ok_or(ContractError::Overflow)
    }

    /// Wallet balance plus staked balance.
    fn holdings(env: &Env, account: &Address) -> Result<i128, ContractError> {
        let token = ledger::token(env)?;
        custody::balance_of(env, &token, account)
            .checked_add(ledger::load_record(env, account).staked_amount)
            .ok_or(ContractError::Overflow)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
