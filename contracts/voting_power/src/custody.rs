//! Token movements in and out of contract custody.
//!
//! Both helpers go through the generated `try_*` client methods so that a
//! rejecting or panicking token surfaces as [`ContractError::TransferFailed`]
//! instead of aborting the invocation.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::ContractError;

/// Pull `amount` from `from` into custody using the allowance granted to
/// this contract.
pub(crate) fn pull(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    match TokenClient::new(env, token).try_transfer_from(&custody, from, &custody, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Return `amount` from custody to `to`.
pub(crate) fn push(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let custody = env.current_contract_address();
    match TokenClient::new(env, token).try_transfer(&custody, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

pub(crate) fn balance_of(env: &Env, token: &Address, account: &Address) -> i128 {
    TokenClient::new(env, token).balance(account)
}
