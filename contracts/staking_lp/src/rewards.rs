//! Rewards-per-token accumulator.
//!
//! All reward-per-token values and the emission rate are scaled by
//! [`PRECISION`] so fractional per-second rates survive integer math:
//!
//! ```text
//! Δrpt   = elapsed × reward_rate / total_staked
//! earned = balance × (rpt − rpt_paid) / PRECISION + rewards
//! ```
//!
//! Time only advances up to `period_finish`; anything after it accrues
//! nothing until the next reward notification.

use common::math::{mul_div, seconds, PRECISION};
use soroban_sdk::contracttype;

use crate::ContractError;

/// Global reward state of a pool.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardAccumulator {
    /// Reward units emitted per second across all stakers, scaled by `PRECISION`.
    pub reward_rate: i128,
    /// Cumulative reward per staked unit since inception, scaled by `PRECISION`.
    pub reward_per_token_stored: i128,
    pub last_update_time: u64,
    pub period_finish: u64,
}

/// Per-account snapshot kept next to the staked balance.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountRewards {
    pub balance: i128,
    /// Value of `reward_per_token_stored` at the account's last settlement.
    pub reward_per_token_paid: i128,
    /// Rewards settled but not yet paid out.
    pub rewards: i128,
}

impl RewardAccumulator {
    pub fn last_time_reward_applicable(&self, now: u64) -> u64 {
        now.min(self.period_finish)
    }

    /// Reward per token as of `now`, without mutating state.
    ///
    /// With nothing staked the stored value is returned unchanged; rewards
    /// emitted while the pool is empty are not distributed to anyone.
    pub fn reward_per_token(&self, now: u64, total_staked: i128) -> Result<i128, ContractError> {
        let effective = self.last_time_reward_applicable(now);
        if total_staked <= 0 || effective <= self.last_update_time {
            return Ok(self.reward_per_token_stored);
        }

        let elapsed = seconds(effective - self.last_update_time);
        let delta = mul_div(elapsed, self.reward_rate, total_staked)
            .ok_or(ContractError::ArithmeticOverflow)?;

        self.reward_per_token_stored
            .checked_add(delta)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Folds elapsed time into `reward_per_token_stored`.
    ///
    /// `last_update_time` only moves forward, to `min(now, period_finish)`.
    pub fn refresh(&mut self, now: u64, total_staked: i128) -> Result<(), ContractError> {
        self.reward_per_token_stored = self.reward_per_token(now, total_staked)?;
        self.last_update_time = self
            .last_update_time
            .max(self.last_time_reward_applicable(now));
        Ok(())
    }

    /// Everything `account` is owed against the given reward-per-token value.
    pub fn earned(
        &self,
        account: &AccountRewards,
        reward_per_token: i128,
    ) -> Result<i128, ContractError> {
        let delta = reward_per_token
            .checked_sub(account.reward_per_token_paid)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let accrued =
            mul_div(account.balance, delta, PRECISION).ok_or(ContractError::ArithmeticOverflow)?;

        account
            .rewards
            .checked_add(accrued)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Moves accrued rewards into `account.rewards` and snapshots the
    /// accumulator. Must follow a `refresh` at the same timestamp.
    pub fn settle(&self, account: &mut AccountRewards) -> Result<(), ContractError> {
        account.rewards = self.earned(account, self.reward_per_token_stored)?;
        account.reward_per_token_paid = self.reward_per_token_stored;
        Ok(())
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure math, no Soroban environment.
