//! Persistent layout of positions and the staked-address set.
//!
//! Positions live under `(POS, account, index)` with a per-account count,
//! so appending never rewrites earlier entries. Accounts are added to the
//! address set the first time they stake and never removed.

use common::storage::extend_persistent;
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::positions::Position;
use crate::ContractError;

const POSITION: Symbol = symbol_short!("POS");
const POSITION_COUNT: Symbol = symbol_short!("POS_CNT");
const ADDRESS_COUNT: Symbol = symbol_short!("ADDR_CNT");
const ADDRESS_AT: Symbol = symbol_short!("ADDR_AT");

// ── Positions ────────────────────────────────────────────────────────────────

pub fn position_count(env: &Env, account: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&(POSITION_COUNT, account.clone()))
        .unwrap_or(0)
}

pub fn get(env: &Env, account: &Address, index: u32) -> Result<Position, ContractError> {
    env.storage()
        .persistent()
        .get(&(POSITION, account.clone(), index))
        .ok_or(ContractError::InvalidStakeId)
}

/// Overwrites an existing position.
pub fn update(env: &Env, account: &Address, index: u32, position: &Position) {
    let key = (POSITION, account.clone(), index);
    env.storage().persistent().set(&key, position);
    extend_persistent(env, &key);
}

/// Appends a position and returns its index. The first position of an
/// account also registers it in the staked-address set.
pub fn push(env: &Env, account: &Address, position: &Position) -> Result<u32, ContractError> {
    let index = position_count(env, account);
    if index == 0 {
        track_address(env, account)?;
    }
    let next = index
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;

    update(env, account, index, position);
    let count_key = (POSITION_COUNT, account.clone());
    env.storage().persistent().set(&count_key, &next);
    extend_persistent(env, &count_key);

    Ok(index)
}

pub fn all(env: &Env, account: &Address) -> Vec<Position> {
    let mut positions = Vec::new(env);
    for index in 0..position_count(env, account) {
        if let Ok(position) = get(env, account, index) {
            positions.push_back(position);
        }
    }
    positions
}

/// Principal of every open position.
pub fn total_staked(env: &Env, account: &Address) -> Result<i128, ContractError> {
    let mut total: i128 = 0;
    for position in all(env, account).iter() {
        if !position.archived {
            total = total
                .checked_add(position.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
    }
    Ok(total)
}

// ── Staked addresses ─────────────────────────────────────────────────────────

pub fn address_count(env: &Env) -> u32 {
    env.storage().instance().get(&ADDRESS_COUNT).unwrap_or(0)
}

pub fn address_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&(ADDRESS_AT, index))
}

fn track_address(env: &Env, account: &Address) -> Result<(), ContractError> {
    let index = address_count(env);
    let key = (ADDRESS_AT, index);
    env.storage().persistent().set(&key, account);
    extend_persistent(env, &key);

    let next = index
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&ADDRESS_COUNT, &next);
    Ok(())
}
