//! Append-only catalog of staking plans.
//!
//! Plan terms are immutable once created; only the `active` flag can be
//! toggled. Ids are dense and start at 0.

use common::storage::extend_persistent;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

/// Highest APR accepted for either window: 1000% in basis points.
pub const MAX_APR_BPS: u32 = 100_000;

const PLAN_COUNT: Symbol = symbol_short!("PLAN_CNT");
const PLAN: Symbol = symbol_short!("PLAN");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    pub id: u32,
    /// Lock length in seconds.
    pub duration: u64,
    /// APR paid up to maturity.
    pub apr_bps: u32,
    /// APR paid after maturity for as long as the position stays open.
    pub default_apr_bps: u32,
    /// Inactive plans accept no new stakes or extensions.
    pub active: bool,
}

impl Plan {
    /// Builds an active plan after checking its terms.
    pub fn new(
        id: u32,
        duration: u64,
        apr_bps: u32,
        default_apr_bps: u32,
    ) -> Result<Self, ContractError> {
        if duration == 0 {
            return Err(ContractError::InvalidDuration);
        }
        if apr_bps > MAX_APR_BPS || default_apr_bps > MAX_APR_BPS {
            return Err(ContractError::InvalidApr);
        }
        Ok(Self {
            id,
            duration,
            apr_bps,
            default_apr_bps,
            active: true,
        })
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&PLAN_COUNT).unwrap_or(0)
}

/// Validates and appends a plan. Returns it with its assigned id.
pub fn create(
    env: &Env,
    duration: u64,
    apr_bps: u32,
    default_apr_bps: u32,
) -> Result<Plan, ContractError> {
    let id = count(env);
    let plan = Plan::new(id, duration, apr_bps, default_apr_bps)?;
    let next = id.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;

    store(env, &plan);
    env.storage().instance().set(&PLAN_COUNT, &next);
    Ok(plan)
}

pub fn get(env: &Env, id: u32) -> Result<Plan, ContractError> {
    env.storage()
        .persistent()
        .get(&(PLAN, id))
        .ok_or(ContractError::InvalidPlanId)
}

pub fn store(env: &Env, plan: &Plan) {
    let key = (PLAN, plan.id);
    env.storage().persistent().set(&key, plan);
    extend_persistent(env, &key);
}

pub fn all(env: &Env) -> Vec<Plan> {
    let mut plans = Vec::new(env);
    for id in 0..count(env) {
        if let Ok(plan) = get(env, id) {
            plans.push_back(plan);
        }
    }
    plans
}
