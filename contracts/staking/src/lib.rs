#![no_std]
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, log, Address, Env};
use staking_shared::RewardTier;

pub mod events;
pub mod gateway;
pub mod holders;
pub mod ledger;
pub mod oracle;

use gateway::TokenGateway;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const ENTRY_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const ENTRY_LIFETIME_THRESHOLD: u32 = ENTRY_BUMP_AMOUNT - 20 * DAY_IN_LEDGERS;

/// Keep a persistent entry alive for another bump period.
pub(crate) fn extend_entry(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
}

pub(crate) fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
}

// Data Types
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Account {
    pub deposited: i128,
    pub staking_since: u64,
    pub last_claimed_at: u64,
    pub total_earned: i128,
}

/// How `withdraw` validates the requested amount.
///
/// `Legacy` reproduces the deployed check, which only rejects an amount equal
/// to the whole deposit (and negatives). A holder therefore can never fully
/// exit under `Legacy`, and an amount above the deposit is only stopped by the
/// ledger subtraction. `Strict` requires `0 < amount <= deposited`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WithdrawPolicy {
    Legacy,
    Strict,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub admin: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub price_feed: Address,
    pub withdraw_policy: WithdrawPolicy,
}

// Storage Keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Account(Address),
    HolderAt(u32),
    HolderSlot(Address), // 1-based position in HolderAt
    HolderCount,
    TotalClaimedRewards,
    TotalDeposited,
}

// Error Types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    TransferFailed = 5,
    NumericOverflow = 6,
}

#[contract]
pub struct StakingLedgerContract;

#[contractimpl]
impl StakingLedgerContract {
    /// Initialize the ledger with its two assets and the price feed
    pub fn initialize(
        env: Env,
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        price_feed: Address,
        withdraw_policy: WithdrawPolicy,
    ) -> Result<(), LedgerError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(LedgerError::AlreadyInitialized);
        }

        admin.require_auth();

        let config = LedgerConfig {
            admin: admin.clone(),
            staking_token,
            reward_token,
            price_feed,
            withdraw_policy,
        };

        env.storage().instance().set(&DataKey::Config, &config);
        env.storage()
            .instance()
            .set(&DataKey::TotalClaimedRewards, &0i128);
        env.storage()
            .instance()
            .set(&DataKey::TotalDeposited, &0i128);
        env.storage().instance().set(&DataKey::HolderCount, &0u32);
        extend_instance(&env);

        log!(&env, "Staking ledger initialized by admin: {}", admin);

        Ok(())
    }

    /// Stake `amount` of the staking token into ledger custody
    pub fn deposit(env: Env, holder: Address, amount: i128) -> Result<(), LedgerError> {
        holder.require_auth();

        let config = ledger::load_config(&env)?;
        ledger::deposit(&env, &TokenGateway::new(&env), &config, &holder, amount)?;

        Ok(())
    }

    /// Return `amount` of staked principal to the holder. Does not settle rewards.
    pub fn withdraw(env: Env, holder: Address, amount: i128) -> Result<(), LedgerError> {
        holder.require_auth();

        let config = ledger::load_config(&env)?;
        ledger::withdraw(&env, &TokenGateway::new(&env), &config, &holder, amount)?;

        Ok(())
    }

    /// Settle the caller's pending reward and return the amount paid
    pub fn claim(env: Env, holder: Address) -> Result<i128, LedgerError> {
        holder.require_auth();

        let config = ledger::load_config(&env)?;
        ledger::settle_rewards(&env, &TokenGateway::new(&env), &config, &holder)
    }

    /// Owner-level settlement on behalf of `holder`
    pub fn settle(env: Env, admin: Address, holder: Address) -> Result<i128, LedgerError> {
        admin.require_auth();

        let config = ledger::load_config(&env)?;
        if config.admin != admin {
            return Err(LedgerError::Unauthorized);
        }

        ledger::settle_rewards(&env, &TokenGateway::new(&env), &config, &holder)
    }

    /// Admin function to switch between the legacy and strict withdraw checks
    pub fn set_withdraw_policy(
        env: Env,
        admin: Address,
        policy: WithdrawPolicy,
    ) -> Result<(), LedgerError> {
        admin.require_auth();

        let mut config = ledger::load_config(&env)?;
        if config.admin != admin {
            return Err(LedgerError::Unauthorized);
        }

        config.withdraw_policy = policy;
        env.storage().instance().set(&DataKey::Config, &config);

        log!(&env, "Withdraw policy set to: {}", policy);

        Ok(())
    }

    /// Reward the holder would receive if settled now
    pub fn pending_reward(env: Env, holder: Address) -> i128 {
        let account = ledger::read_account(&env, &holder);
        ledger::accrued_reward(&env, &holder, &account, env.ledger().timestamp())
    }

    /// Tier the holder's elapsed time since last settlement falls into
    pub fn reward_tier(env: Env, holder: Address) -> RewardTier {
        if !holders::contains(&env, &holder) {
            return RewardTier::Unvested;
        }
        let account = ledger::read_account(&env, &holder);
        let now = env.ledger().timestamp();
        let elapsed = staking_shared::elapsed_since(account.last_claimed_at, now);
        RewardTier::for_elapsed(elapsed)
    }

    pub fn holder_count(env: Env) -> u32 {
        holders::size(&env)
    }

    pub fn is_holder(env: Env, holder: Address) -> bool {
        holders::contains(&env, &holder)
    }

    /// Holder stored at `index`; order is unspecified and changes on removal
    pub fn holder_at(env: Env, index: u32) -> Option<Address> {
        holders::at(&env, index)
    }

    /// Latest price from the configured feed. Informational only.
    pub fn oracle_price(env: Env) -> Result<i128, LedgerError> {
        let config = ledger::load_config(&env)?;
        Ok(oracle::latest_price(&env, &config.price_feed))
    }

    pub fn get_account(env: Env, holder: Address) -> Account {
        ledger::read_account(&env, &holder)
    }

    pub fn total_claimed_rewards(env: Env) -> i128 {
        ledger::read_total_claimed(&env)
    }

    pub fn total_deposited(env: Env) -> i128 {
        ledger::read_total_deposited(&env)
    }

    /// Get contract configuration
    pub fn get_config(env: Env) -> Result<LedgerConfig, LedgerError> {
        ledger::load_config(&env)
    }
}
