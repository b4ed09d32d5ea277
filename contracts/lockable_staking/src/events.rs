#![allow(deprecated)] // events().publish migration tracked separately

use common::Clock;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanCreatedEvent {
    pub plan_id: u32,
    pub duration: u64,
    pub apr_bps: u32,
    pub default_apr_bps: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanStatusChangedEvent {
    pub plan_id: u32,
    pub active: bool,
    pub timestamp: u64,
}

/// Fired for every new position, including the successor of an extension.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub account: Address,
    pub stake_id: u32,
    pub plan_id: u32,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub account: Address,
    pub stake_id: u32,
    pub amount: i128,
    pub archived: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedEvent {
    pub account: Address,
    pub old_stake_id: u32,
    pub new_stake_id: u32,
    pub amount: i128,
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

pub fn publish_initialized(env: &Env, owner: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            timestamp: env.now(),
        },
    );
}

pub fn publish_plan_created(
    env: &Env,
    plan_id: u32,
    duration: u64,
    apr_bps: u32,
    default_apr_bps: u32,
) {
    env.events().publish(
        (symbol_short!("PLAN_NEW"), plan_id),
        PlanCreatedEvent {
            plan_id,
            duration,
            apr_bps,
            default_apr_bps,
            timestamp: env.now(),
        },
    );
}

pub fn publish_plan_status_changed(env: &Env, plan_id: u32, active: bool) {
    env.events().publish(
        (symbol_short!("PLAN_STS"), plan_id),
        PlanStatusChangedEvent {
            plan_id,
            active,
            timestamp: env.now(),
        },
    );
}

pub fn publish_staked(env: &Env, account: Address, stake_id: u32, plan_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), account.clone()),
        StakedEvent {
            account,
            stake_id,
            plan_id,
            amount,
            timestamp: env.now(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    account: Address,
    stake_id: u32,
    amount: i128,
    archived: bool,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), account.clone()),
        WithdrawnEvent {
            account,
            stake_id,
            amount,
            archived,
            timestamp: env.now(),
        },
    );
}

pub fn publish_extended(
    env: &Env,
    account: Address,
    old_stake_id: u32,
    new_stake_id: u32,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("EXTENDED"), account.clone()),
        ExtendedEvent {
            account,
            old_stake_id,
            new_stake_id,
            amount,
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
