//! Fee schedule administered by the owner and applied by the host caller.
//!
//! The reward engines never deduct fees themselves. Opportunity contracts
//! that route deposits into a pool read the schedule and charge it on their
//! side; this module only guarantees the stored values stay within bounds.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::math::{mul_div, BPS_DENOMINATOR};

/// 100% expressed in basis points. No fee may exceed it.
pub const MAX_FEE_BPS: u32 = 10_000;

const FEE_CONFIG: Symbol = symbol_short!("FEE_CFG");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    /// Charged on deposits routed into the contract.
    pub deposit_fee_bps: u32,
    /// Charged on principal leaving the contract.
    pub withdrawal_fee_bps: u32,
    /// Receiver of collected fees.
    pub recipient: Address,
}

impl FeeConfig {
    pub fn is_valid(&self) -> bool {
        self.deposit_fee_bps <= MAX_FEE_BPS && self.withdrawal_fee_bps <= MAX_FEE_BPS
    }
}

/// Fee owed on `amount` at `bps`, rounded down.
///
/// Returns `None` for negative amounts, out-of-range bps or overflow.
pub fn fee_amount(amount: i128, bps: u32) -> Option<i128> {
    if amount < 0 || bps > MAX_FEE_BPS {
        return None;
    }
    mul_div(amount, i128::from(bps), BPS_DENOMINATOR)
}

pub fn set_config(env: &Env, config: &FeeConfig) {
    env.storage().instance().set(&FEE_CONFIG, config);
}

pub fn get_config(env: &Env) -> Option<FeeConfig> {
    env.storage().instance().get(&FEE_CONFIG)
}
