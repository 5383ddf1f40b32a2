//! Account ledger operations.
//!
//! Every mutating operation validates, computes the new balances and then
//! calls the gateway before writing anything, so a declined transfer leaves
//! storage exactly as it was.

use soroban_sdk::{log, Address, Env};
use staking_shared::{elapsed_since, pending_reward, time_diff_in_days, validate_positive_amount};

use crate::events;
use crate::gateway::TransferGateway;
use crate::holders;
use crate::{
    extend_entry, extend_instance, Account, DataKey, LedgerConfig, LedgerError, WithdrawPolicy,
};

pub fn load_config(env: &Env) -> Result<LedgerConfig, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LedgerError::NotInitialized)
}

/// Account record for `holder`, all-zero if it was never written.
pub fn read_account(env: &Env, holder: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&DataKey::Account(holder.clone()))
        .unwrap_or_default()
}

fn write_account(env: &Env, holder: &Address, account: &Account) {
    let key = DataKey::Account(holder.clone());
    env.storage().persistent().set(&key, account);
    extend_entry(env, &key);
    extend_instance(env);
}

pub fn read_total_claimed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalClaimedRewards)
        .unwrap_or(0)
}

pub fn read_total_deposited(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalDeposited)
        .unwrap_or(0)
}

/// Reward accrued by `holder` at `now`. Only index members with a nonzero
/// deposit accrue.
pub fn accrued_reward(env: &Env, holder: &Address, account: &Account, now: u64) -> i128 {
    if account.deposited <= 0 || !holders::contains(env, holder) {
        return 0;
    }
    let elapsed = elapsed_since(account.last_claimed_at, now);
    pending_reward(account.deposited, elapsed)
}

fn check_withdraw_amount(
    policy: WithdrawPolicy,
    deposited: i128,
    amount: i128,
) -> Result<(), LedgerError> {
    let rejected = match policy {
        WithdrawPolicy::Legacy => amount < 0 || amount == deposited,
        WithdrawPolicy::Strict => amount <= 0 || amount > deposited,
    };
    if rejected {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// Pull `amount` of the staking token from `holder` and credit it.
///
/// A first deposit (or the first after a full exit) joins the holder index and
/// stamps `staking_since`. Pending rewards are left untouched.
pub fn deposit<G: TransferGateway>(
    env: &Env,
    gateway: &G,
    config: &LedgerConfig,
    holder: &Address,
    amount: i128,
) -> Result<Account, LedgerError> {
    if !validate_positive_amount(amount) {
        return Err(LedgerError::InvalidAmount);
    }

    let mut account = read_account(env, holder);
    let deposited = account
        .deposited
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;
    let total_deposited = read_total_deposited(env)
        .checked_add(amount)
        .ok_or(LedgerError::NumericOverflow)?;

    if !gateway.pull(
        &config.staking_token,
        holder,
        &env.current_contract_address(),
        amount,
    ) {
        return Err(LedgerError::TransferFailed);
    }

    let now = env.ledger().timestamp();
    if holders::add(env, holder) {
        account.staking_since = now;
    }
    account.deposited = deposited;

    write_account(env, holder, &account);
    env.storage()
        .instance()
        .set(&DataKey::TotalDeposited, &total_deposited);

    events::publish_deposit(env, holder, amount, deposited);
    log!(
        env,
        "Holder {} deposited {}, balance {}",
        holder.clone(),
        amount,
        deposited
    );

    Ok(account)
}

/// Push `amount` of principal back to `holder`.
///
/// Pending rewards are not settled here; the claim baseline is left as is.
/// Under `WithdrawPolicy::Legacy` an amount above the deposit passes the
/// amount check and fails on the subtraction with `NumericOverflow`.
pub fn withdraw<G: TransferGateway>(
    env: &Env,
    gateway: &G,
    config: &LedgerConfig,
    holder: &Address,
    amount: i128,
) -> Result<Account, LedgerError> {
    let mut account = read_account(env, holder);
    check_withdraw_amount(config.withdraw_policy, account.deposited, amount)?;

    let remaining = account
        .deposited
        .checked_sub(amount)
        .filter(|remaining| *remaining >= 0)
        .ok_or(LedgerError::NumericOverflow)?;
    let total_deposited = read_total_deposited(env)
        .checked_sub(amount)
        .filter(|total| *total >= 0)
        .ok_or(LedgerError::NumericOverflow)?;

    if !gateway.push(&config.staking_token, holder, amount) {
        return Err(LedgerError::TransferFailed);
    }

    account.deposited = remaining;
    write_account(env, holder, &account);
    env.storage()
        .instance()
        .set(&DataKey::TotalDeposited, &total_deposited);

    if remaining == 0 {
        holders::remove(env, holder);
    }

    events::publish_withdraw(env, holder, amount, remaining);
    log!(
        env,
        "Holder {} withdrew {}, balance {}, staked {} days",
        holder.clone(),
        amount,
        remaining,
        time_diff_in_days(account.staking_since, env.ledger().timestamp())
    );

    Ok(account)
}

/// Pay out the pending reward for `holder` and restart its claim clock.
///
/// The clock restarts even when nothing is owed. A declined payout changes
/// nothing, including `last_claimed_at`.
pub fn settle_rewards<G: TransferGateway>(
    env: &Env,
    gateway: &G,
    config: &LedgerConfig,
    holder: &Address,
) -> Result<i128, LedgerError> {
    let now = env.ledger().timestamp();
    let mut account = read_account(env, holder);
    let reward = accrued_reward(env, holder, &account, now);

    if reward > 0 {
        let total_earned = account
            .total_earned
            .checked_add(reward)
            .ok_or(LedgerError::NumericOverflow)?;
        let total_claimed = read_total_claimed(env)
            .checked_add(reward)
            .ok_or(LedgerError::NumericOverflow)?;

        if !gateway.push(&config.reward_token, holder, reward) {
            return Err(LedgerError::TransferFailed);
        }

        account.total_earned = total_earned;
        env.storage()
            .instance()
            .set(&DataKey::TotalClaimedRewards, &total_claimed);

        events::publish_reward_transferred(env, holder, reward, total_earned);
    }

    account.last_claimed_at = now;
    write_account(env, holder, &account);

    log!(env, "Settled {} for holder {}", reward, holder.clone());

    Ok(reward)
}
