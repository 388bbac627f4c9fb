//! # Voting Power Testing Framework
//!
//! Reusable harness for exercising the voting power contract with
//! property-based tests and ledger invariant checks.
//!
//! ```text
//! test/framework/
//! ├── mod.rs         — TestEnv, VotingPowerHarness, snapshots
//! ├── generators.rs  — proptest strategies for amounts, durations, actions
//! └── invariants.rs  — state and transition invariants
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut env = TestEnv::new();
//! let harness = VotingPowerHarness::new(&mut env);
//! let alice = harness.create_holder(1_000);
//! harness.stake(&alice, 400);
//! InvariantSet::ledger_defaults().assert_all(&harness.snapshot(&[alice]));
//! ```

extern crate std;


use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};
use voting_power::{ContractError, VotingPowerContract, VotingPowerContractClient};

/// Timestamp the harness starts at. Non-zero so that `stake_start_time == 0`
/// unambiguously means "not staking".
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with address generation and time control.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(GENESIS_TIMESTAMP);
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    /// Generate a fresh Soroban address (cached for re-use).
    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a SAC token and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Voting Power Harness ─────────────────────────────────────────────────────

/// Voting power contract bound to a freshly deployed SAC token.
pub struct VotingPowerHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: VotingPowerContractClient<'static>,
    pub contract_id: Address,
    pub token: Address,
}

impl<'a> VotingPowerHarness<'a> {
    /// Deploy the contract bound to a new token.
    pub fn new(env: &'a mut TestEnv) -> Self {
        let token = env.deploy_token();
        let contract_id = env.env.register(VotingPowerContract, (&token,));
        let client = VotingPowerContractClient::new(&env.env, &contract_id);

        Self {
            env,
            client,
            contract_id,
            token,
        }
    }

    /// Create a holder with `amount` tokens and a matching allowance for the
    /// contract.
    pub fn create_holder(&self, amount: i128) -> Address {
        let holder = Address::generate(&self.env.env);
        self.env.mint_tokens(&self.token, &holder, amount);
        self.approve(&holder, amount);
        holder
    }

    /// Set the contract's allowance over `holder`'s tokens.
    pub fn approve(&self, holder: &Address, amount: i128) {
        let expiry = self.env.env.ledger().sequence() + 100_000;
        TokenClient::new(&self.env.env, &self.token).approve(
            holder,
            &self.contract_id,
            &amount,
            &expiry,
        );
    }

    pub fn stake(&self, holder: &Address, amount: i128) -> i128 {
        self.client.stake(holder, &amount)
    }

    pub fn try_stake(&self, holder: &Address, amount: i128) -> Result<i128, ContractError> {
        match self.client.try_stake(holder, &amount) {
            Ok(Ok(v)) => Ok(v),
            Err(Ok(e)) => Err(e),
            other => panic!("unexpected host failure: {:?}", other),
        }
    }

    pub fn unstake(&self, holder: &Address, amount: i128) -> i128 {
        self.client.unstake(holder, &amount)
    }

    pub fn try_unstake(&self, holder: &Address, amount: i128) -> Result<i128, ContractError> {
        match self.client.try_unstake(holder, &amount) {
            Ok(Ok(v)) => Ok(v),
            Err(Ok(e)) => Err(e),
            other => panic!("unexpected host failure: {:?}", other),
        }
    }

    pub fn wallet_balance(&self, holder: &Address) -> i128 {
        TokenClient::new(&self.env.env, &self.token).balance(holder)
    }

    pub fn custody_balance(&self) -> i128 {
        self.wallet_balance(&self.contract_id)
    }

    pub fn total_staked(&self) -> i128 {
        self.client.get_total_staked()
    }

    /// Snapshot of all observable ledger and power state for `holders`.
    pub fn snapshot(&self, holders: &[Address]) -> LedgerSnapshot {
        let accounts = holders
            .iter()
            .map(|h| {
                let record = self.client.get_stake_record(h);
                AccountView {
                    address: h.clone(),
                    wallet: self.wallet_balance(h),
                    staked_amount: record.staked_amount,
                    stake_start_time: record.stake_start_time,
                    multiplier: self.client.time_multiplier(h),
                    balance_power: self.client.voting_power_from_balance(h),
                    stake_power: self.client.voting_power_from_stake(h),
                    voting_power: self.client.voting_power(h),
                }
            })
            .collect();

        LedgerSnapshot {
            timestamp: self.env.timestamp(),
            total_staked: self.total_staked(),
            custody_balance: self.custody_balance(),
            precision: self.client.precision(),
            accounts,
        }
    }
}

/// Per-account slice of a [`LedgerSnapshot`].
#[derive(Debug, Clone)]
pub struct AccountView {
    pub address: Address,
    pub wallet: i128,
    pub staked_amount: i128,
    pub stake_start_time: u64,
    pub multiplier: i128,
    pub balance_power: i128,
    pub stake_power: i128,
    pub voting_power: i128,
}

/// Immutable view of contract state at a point in time.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub timestamp: u64,
    pub total_staked: i128,
    pub custody_balance: i128,
    pub precision: i128,
    pub accounts: std::vec::Vec<AccountView>,
}

impl LedgerSnapshot {
    /// Sum of all tracked accounts' staked amounts.
    pub fn sum_staked(&self) -> i128 {
        self.accounts.iter().map(|a| a.staked_amount).sum()
    }

    pub fn account(&self, address: &Address) -> Option<&AccountView> {
        self.accounts.iter().find(|a| &a.address == address)
    }
}
