use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Events
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub holder: Address,
    pub amount: i128,
    pub deposited: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub holder: Address,
    pub amount: i128,
    pub deposited: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTransferredEvent {
    pub holder: Address,
    pub reward: i128,
    pub total_earned: i128,
    pub timestamp: u64,
}

pub fn publish_deposit(env: &Env, holder: &Address, amount: i128, deposited: i128) {
    let event = DepositEvent {
        holder: holder.clone(),
        amount,
        deposited,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("deposit"), holder.clone()), event);
}

pub fn publish_withdraw(env: &Env, holder: &Address, amount: i128, deposited: i128) {
    let event = WithdrawEvent {
        holder: holder.clone(),
        amount,
        deposited,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("withdraw"), holder.clone()), event);
}

pub fn publish_reward_transferred(env: &Env, holder: &Address, reward: i128, total_earned: i128) {
    let event = RewardTransferredEvent {
        holder: holder.clone(),
        reward,
        total_earned,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("reward"), holder.clone()), event);
}
