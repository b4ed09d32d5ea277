//! Fixed-term position accounting.
//!
//! A position earns `apr_bps` from its start until `end_time` and the plan's
//! `default_apr_bps` from then on, on a 360-day year:
//!
//! ```text
//! window(from, to, bps) = amount × bps × (to − from) / (360 × 86 400 × 10 000)
//! accrued = reward
//!         + window(last_withdrawal, min(now, end_time), apr_bps)
//!         + window(max(last_withdrawal, end_time), now, default_apr_bps)
//! ```
//!
//! `reward` is the cumulative reward frozen at `last_withdrawal_time`, so the
//! windows only ever cover time not yet folded in.

use common::math::{mul_div, seconds, BPS_DENOMINATOR, SECONDS_PER_DAY};
use soroban_sdk::contracttype;

use crate::plans::Plan;
use crate::ContractError;

const DAYS_PER_YEAR: i128 = 360;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub plan_id: u32,
    /// Principal; fixed at creation.
    pub amount: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub last_withdrawal_time: u64,
    /// Cumulative reward as of `last_withdrawal_time`.
    pub reward: i128,
    /// Everything paid out so far, principal and reward alike.
    pub paid_amount: i128,
    /// Set once fully settled or rolled over. Archived positions are kept.
    pub archived: bool,
}

fn window(amount: i128, bps: u32, from: u64, to: u64) -> Result<i128, ContractError> {
    if to <= from || bps == 0 {
        return Ok(0);
    }
    let year_bps = DAYS_PER_YEAR * seconds(SECONDS_PER_DAY) * BPS_DENOMINATOR;
    let rate_time = i128::from(bps)
        .checked_mul(seconds(to - from))
        .ok_or(ContractError::ArithmeticOverflow)?;
    mul_div(amount, rate_time, year_bps).ok_or(ContractError::ArithmeticOverflow)
}

impl Position {
    pub fn open(plan: &Plan, amount: i128, now: u64) -> Result<Self, ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let end_time = now
            .checked_add(plan.duration)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(Self {
            plan_id: plan.id,
            amount,
            start_time: now,
            end_time,
            last_withdrawal_time: now,
            reward: 0,
            paid_amount: 0,
            archived: false,
        })
    }

    pub fn is_matured(&self, now: u64) -> bool {
        now >= self.end_time
    }

    /// Cumulative reward as of `now`. Frozen once archived.
    pub fn accrued_reward(&self, plan: &Plan, now: u64) -> Result<i128, ContractError> {
        if self.archived {
            return Ok(self.reward);
        }
        let in_term = window(
            self.amount,
            plan.apr_bps,
            self.last_withdrawal_time,
            now.min(self.end_time),
        )?;
        let after_term = window(
            self.amount,
            plan.default_apr_bps,
            self.last_withdrawal_time.max(self.end_time),
            now,
        )?;

        self.reward
            .checked_add(in_term)
            .and_then(|r| r.checked_add(after_term))
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Principal plus accrued reward not yet paid.
    pub fn available(&self, plan: &Plan, now: u64) -> Result<i128, ContractError> {
        let accrued = self.accrued_reward(plan, now)?;
        self.amount
            .checked_add(accrued)
            .and_then(|v| v.checked_sub(self.paid_amount))
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Pays out of the position and returns the payout.
    ///
    /// Before maturity only unpaid interest can be taken. `use_max` pays
    /// everything available and archives; a partial withdrawal that leaves
    /// nothing available archives as well.
    pub fn withdraw(
        &mut self,
        plan: &Plan,
        amount: i128,
        use_max: bool,
        now: u64,
    ) -> Result<i128, ContractError> {
        if self.archived {
            return Err(ContractError::Archived);
        }
        if !use_max {
            if amount == 0 {
                return Err(ContractError::ZeroAmount);
            }
            if amount < 0 {
                return Err(ContractError::InvalidAmount);
            }
        }

        let accrued = self.accrued_reward(plan, now)?;
        let available = self
            .amount
            .checked_add(accrued)
            .and_then(|v| v.checked_sub(self.paid_amount))
            .ok_or(ContractError::ArithmeticOverflow)?;

        if !self.is_matured(now) {
            let unpaid_interest = accrued.saturating_sub(self.paid_amount);
            if use_max || amount > unpaid_interest {
                return Err(ContractError::NotYetMatured);
            }
        }

        let payout = if use_max { available } else { amount };
        if payout > available {
            return Err(ContractError::ExceedsAvailable);
        }

        self.paid_amount = self
            .paid_amount
            .checked_add(payout)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.reward = accrued;
        self.last_withdrawal_time = now;
        if payout == available {
            self.archived = true;
        }
        Ok(payout)
    }

    /// Closes a matured position and returns its successor on the same plan,
    /// seeded with everything still owed.
    pub fn roll_over(&mut self, plan: &Plan, now: u64) -> Result<Position, ContractError> {
        if self.archived {
            return Err(ContractError::Archived);
        }
        if !self.is_matured(now) {
            return Err(ContractError::NotYetMatured);
        }
        if !plan.active {
            return Err(ContractError::PlanInactive);
        }

        let accrued = self.accrued_reward(plan, now)?;
        let carried = self
            .amount
            .checked_add(accrued)
            .and_then(|v| v.checked_sub(self.paid_amount))
            .ok_or(ContractError::ArithmeticOverflow)?;
        let successor = Position::open(plan, carried, now)?;

        self.reward = accrued;
        self.last_withdrawal_time = now;
        self.archived = true;
        Ok(successor)
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
