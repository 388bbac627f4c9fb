#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};
use voting_power::{VotingPowerContract, VotingPowerContractClient};

const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Actions covering every mutating entry point plus time travel.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Unstake { amount: u64 },
    UnstakeAll,
    AdvanceTime { delta: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VotingPowerContract, (&token,));
    let client = VotingPowerContractClient::new(&env, &contract_id);

    let token_client = TokenClient::new(&env, &token);
    let mut users = Vec::new();
    for _ in 0..4 {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&u, &1_000_000_000_000i128);
        users.push(u);
    }

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let amt = amount as i128;
                let expiry = env.ledger().sequence() + 1_000;
                token_client.approve(caller, &contract_id, &amt, &expiry);
                let _ = client.try_stake(caller, &amt);
            }
            FuzzAction::Unstake { amount } => {
                let _ = client.try_unstake(caller, &(amount as i128));
            }
            FuzzAction::UnstakeAll => {
                let staked = client.get_staked(caller);
                if staked > 0 {
                    client.unstake(caller, &staked);
                }
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let total = client.get_total_staked();
        assert_eq!(
            token_client.balance(&contract_id),
            total,
            "INVARIANT VIOLATION: custody does not match total_staked"
        );

        let mut sum = 0i128;
        for u in &users {
            let record = client.get_stake_record(u);
            sum += record.staked_amount;
            assert!(record.staked_amount >= 0, "INVARIANT VIOLATION: negative stake");
            assert_eq!(
                record.staked_amount > 0,
                record.stake_start_time != 0,
                "INVARIANT VIOLATION: start time out of sync with position"
            );

            let m = client.time_multiplier(u);
            assert!(
                (PRECISION..=2 * PRECISION).contains(&m),
                "INVARIANT VIOLATION: multiplier {} out of range",
                m
            );

            let total_power = client.voting_power(u);
            let parts = client.voting_power_from_balance(u) + client.voting_power_from_stake(u);
            assert_eq!(total_power, parts, "INVARIANT VIOLATION: power decomposition");
        }
        assert_eq!(sum, total, "INVARIANT VIOLATION: total_staked != sum of stakes");
    }
});
