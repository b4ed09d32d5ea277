#![allow(deprecated)] // events().publish migration tracked separately

use common::Clock;
use soroban_sdk::{symbol_short, Address, Env, Vec};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub rewards_duration: u64,
    pub start_time: u64,
    pub timestamp: u64,
}

/// Fired when a new reward period is funded.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub amount: i128,
    pub reward_rate: i128,
    pub period_finish: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LpStakedEvent {
    pub account: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub account: Address,
    pub amount: i128,
    pub reward: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnRewardsEvent {
    pub account: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDurationUpdatedEvent {
    pub old_duration: u64,
    pub new_duration: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartTimeEvent {
    pub old_start_time: u64,
    pub new_start_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibleUsersEvent {
    pub users: Vec<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorSetEvent {
    pub operator: Address,
    pub approved: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub by: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipEvent {
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesUpdatedEvent {
    pub deposit_fee_bps: u32,
    pub withdrawal_fee_bps: u32,
    pub recipient: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    staking_token: Address,
    reward_token: Address,
    rewards_duration: u64,
    start_time: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            staking_token,
            reward_token,
            rewards_duration,
            start_time,
            timestamp: env.now(),
        },
    );
}

pub fn publish_reward_added(env: &Env, amount: i128, reward_rate: i128, period_finish: u64) {
    env.events().publish(
        (symbol_short!("RWD_ADDED"),),
        RewardAddedEvent {
            amount,
            reward_rate,
            period_finish,
            timestamp: env.now(),
        },
    );
}

pub fn publish_lp_staked(env: &Env, account: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("LP_STAKED"), account.clone()),
        LpStakedEvent {
            account,
            amount,
            new_total_staked,
            timestamp: env.now(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, account: Address, amount: i128, reward: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), account.clone()),
        WithdrawnEvent {
            account,
            amount,
            reward,
            timestamp: env.now(),
        },
    );
}

pub fn publish_withdrawn_rewards(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), account.clone()),
        WithdrawnRewardsEvent {
            account,
            amount,
            timestamp: env.now(),
        },
    );
}

pub fn publish_rewards_duration_updated(env: &Env, old_duration: u64, new_duration: u64) {
    env.events().publish(
        (symbol_short!("DUR_UPD"),),
        RewardsDurationUpdatedEvent {
            old_duration,
            new_duration,
            timestamp: env.now(),
        },
    );
}

pub fn publish_start_time(env: &Env, old_start_time: u64, new_start_time: u64) {
    env.events().publish(
        (symbol_short!("START_TM"),),
        StartTimeEvent {
            old_start_time,
            new_start_time,
            timestamp: env.now(),
        },
    );
}

pub fn publish_eligible_added(env: &Env, users: Vec<Address>) {
    env.events().publish(
        (symbol_short!("ELIG_ADD"),),
        EligibleUsersEvent {
            users,
            timestamp: env.now(),
        },
    );
}

pub fn publish_eligible_removed(env: &Env, users: Vec<Address>) {
    env.events().publish(
        (symbol_short!("ELIG_REM"),),
        EligibleUsersEvent {
            users,
            timestamp: env.now(),
        },
    );
}

pub fn publish_operator_set(env: &Env, operator: Address, approved: bool) {
    env.events().publish(
        (symbol_short!("OPERATOR"), operator.clone()),
        OperatorSetEvent {
            operator,
            approved,
            timestamp: env.now(),
        },
    );
}

pub fn publish_paused(env: &Env, by: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseChangedEvent {
            by,
            timestamp: env.now(),
        },
    );
}

pub fn publish_unpaused(env: &Env, by: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseChangedEvent {
            by,
            timestamp: env.now(),
        },
    );
}

pub fn publish_owner_proposed(env: &Env, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), from.clone()),
        OwnershipEvent {
            from,
            to,
            timestamp: env.now(),
        },
    );
}

pub fn publish_owner_transferred(env: &Env, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("OWN_XFER"), to.clone()),
        OwnershipEvent {
            from,
            to,
            timestamp: env.now(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), from.clone()),
        OwnershipEvent {
            from,
            to,
            timestamp: env.now(),
        },
    );
}

pub fn publish_fees_updated(
    env: &Env,
    deposit_fee_bps: u32,
    withdrawal_fee_bps: u32,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("FEES_SET"),),
        FeesUpdatedEvent {
            deposit_fee_bps,
            withdrawal_fee_bps,
            recipient,
            timestamp: env.now(),
        },
    );
}
