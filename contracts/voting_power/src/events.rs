//! Event publishing for the voting power contract.

#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_token_configured(env: &Env, token: &Address) {
    env.events()
        .publish((symbol_short!("TKN_CFG"),), token.clone());
}

/// `delta` is positive for deposits and negative for withdrawals.
pub fn publish_stake_changed(env: &Env, account: &Address, delta: i128, new_staked: i128) {
    env.events().publish(
        (symbol_short!("STK_CHG"), account.clone()),
        (delta, new_staked),
    );
}
