//! Continuous reward pool accounting.
//!
//! Every mutator validates against the current state first, then works on a
//! copy (refresh, settle, apply) and commits the copy only once every step
//! has succeeded. A rejected call leaves both the pool and the account
//! exactly as they were.

use common::math::{mul_div, seconds, PRECISION};
use soroban_sdk::contracttype;

use crate::rewards::{AccountRewards, RewardAccumulator};
use crate::ContractError;

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    pub accumulator: RewardAccumulator,
    /// Sum of every account balance.
    pub total_staked: i128,
    /// Length of a reward period in seconds.
    pub rewards_duration: u64,
    /// When the current reward period was opened by a notification.
    pub period_start: u64,
    /// Public start; before it only eligible accounts may stake.
    pub start_time: u64,
}

/// Tokens owed to the caller once a withdrawal has been recorded.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    /// Staking tokens returned.
    pub principal: i128,
    /// Reward tokens paid alongside.
    pub reward: i128,
}

fn check_amount(amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

impl PoolState {
    pub fn new(rewards_duration: u64, start_time: u64) -> Self {
        Self {
            rewards_duration,
            start_time,
            ..Self::default()
        }
    }

    pub fn has_started(&self, now: u64) -> bool {
        now >= self.start_time
    }

    // ── Views ───────────────────────────────────────────────────────────

    pub fn reward_per_token(&self, now: u64) -> Result<i128, ContractError> {
        self.accumulator.reward_per_token(now, self.total_staked)
    }

    pub fn earned(&self, account: &AccountRewards, now: u64) -> Result<i128, ContractError> {
        let rpt = self.reward_per_token(now)?;
        self.accumulator.earned(account, rpt)
    }

    /// Total reward emitted over one full period at the current rate.
    pub fn reward_for_duration(&self) -> Result<i128, ContractError> {
        mul_div(
            self.accumulator.reward_rate,
            seconds(self.rewards_duration),
            PRECISION,
        )
        .ok_or(ContractError::ArithmeticOverflow)
    }

    // ── Admin ───────────────────────────────────────────────────────────

    /// Starts a new reward period of `rewards_duration` at `now`, rolling any
    /// undistributed reward of a running period into it.
    ///
    /// `reward_balance` is what the host holds to pay rewards with; the new
    /// rate may not promise more than that over the period.
    ///
    /// Returns the new reward rate.
    pub fn notify_reward_amount(
        &mut self,
        amount: i128,
        now: u64,
        reward_balance: i128,
    ) -> Result<i128, ContractError> {
        check_amount(amount)?;
        if self.rewards_duration == 0 {
            return Err(ContractError::InvalidDuration);
        }

        let mut next = self.clone();
        next.accumulator.refresh(now, next.total_staked)?;

        let duration = seconds(next.rewards_duration);
        let scaled = amount
            .checked_mul(PRECISION)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let acc = &mut next.accumulator;
        let reward_rate = if now >= acc.period_finish {
            scaled / duration
        } else {
            let leftover = seconds(acc.period_finish - now)
                .checked_mul(acc.reward_rate)
                .ok_or(ContractError::ArithmeticOverflow)?;
            scaled
                .checked_add(leftover)
                .ok_or(ContractError::ArithmeticOverflow)?
                / duration
        };

        let promised =
            mul_div(reward_rate, duration, PRECISION).ok_or(ContractError::ArithmeticOverflow)?;
        if promised > reward_balance {
            return Err(ContractError::InsufficientBalanceForReward);
        }

        acc.reward_rate = reward_rate;
        acc.last_update_time = now;
        acc.period_finish = now
            .checked_add(next.rewards_duration)
            .ok_or(ContractError::ArithmeticOverflow)?;
        next.period_start = now;

        *self = next;
        Ok(reward_rate)
    }

    /// Changes the period length, re-deriving the rate of a running period so
    /// the reward still owed is spread over what remains of the new window.
    ///
    /// - No running period: only the stored duration changes.
    /// - Running, pool not started yet: the remaining reward is rescaled over
    ///   the full new duration starting `now`.
    /// - Running and started: the new duration must exceed the time already
    ///   elapsed in the period; the period keeps its start and ends at
    ///   `period_start + new_duration`.
    ///
    /// Returns the previous duration.
    pub fn set_rewards_duration(
        &mut self,
        new_duration: u64,
        now: u64,
    ) -> Result<u64, ContractError> {
        if new_duration == 0 {
            return Err(ContractError::DurationTooShort);
        }
        let started = self.has_started(now);
        let running = now < self.accumulator.period_finish;
        let elapsed = now.saturating_sub(self.period_start);
        if running && started && new_duration <= elapsed {
            return Err(ContractError::DurationTooShort);
        }

        let mut next = self.clone();
        next.accumulator.refresh(now, next.total_staked)?;

        if running {
            let acc = &mut next.accumulator;
            let remaining = seconds(acc.period_finish - now)
                .checked_mul(acc.reward_rate)
                .ok_or(ContractError::ArithmeticOverflow)?;

            if started {
                acc.reward_rate = remaining / seconds(new_duration - elapsed);
                acc.period_finish = next
                    .period_start
                    .checked_add(new_duration)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            } else {
                acc.reward_rate = remaining / seconds(new_duration);
                acc.period_finish = now
                    .checked_add(new_duration)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                next.period_start = now;
            }
        }

        let previous = next.rewards_duration;
        next.rewards_duration = new_duration;

        *self = next;
        Ok(previous)
    }

    /// Moves the public start to a later time. Only possible while the
    /// current start is still in the future. Returns the previous start.
    pub fn set_start_time(&mut self, new_start: u64, now: u64) -> Result<u64, ContractError> {
        if new_start <= now {
            return Err(ContractError::StartTimeInPast);
        }
        if self.start_time <= now {
            return Err(ContractError::StartTimeAlreadyPassed);
        }
        let previous = self.start_time;
        self.start_time = new_start;
        Ok(previous)
    }

    // ── Stakers ─────────────────────────────────────────────────────────

    pub fn stake(
        &mut self,
        account: &mut AccountRewards,
        amount: i128,
        eligible: bool,
        now: u64,
    ) -> Result<(), ContractError> {
        check_amount(amount)?;
        if !self.has_started(now) && !eligible {
            return Err(ContractError::NotEligible);
        }

        let mut next = self.clone();
        let mut acct = account.clone();
        next.update_reward(&mut acct, now)?;

        acct.balance = acct
            .balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        next.total_staked = next
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        *self = next;
        *account = acct;
        Ok(())
    }

    /// Removes `amount` of principal and pays every settled reward with it.
    pub fn withdraw(
        &mut self,
        account: &mut AccountRewards,
        amount: i128,
        now: u64,
    ) -> Result<Settlement, ContractError> {
        check_amount(amount)?;
        if amount > account.balance {
            return Err(ContractError::InsufficientBalance);
        }

        let mut next = self.clone();
        let mut acct = account.clone();
        next.update_reward(&mut acct, now)?;

        acct.balance -= amount;
        next.total_staked = next
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let reward = acct.rewards;
        acct.rewards = 0;

        *self = next;
        *account = acct;
        Ok(Settlement {
            principal: amount,
            reward,
        })
    }

    /// Pays `amount` out of the account's rewards, leaving principal staked.
    pub fn withdraw_rewards(
        &mut self,
        account: &mut AccountRewards,
        amount: i128,
        now: u64,
    ) -> Result<(), ContractError> {
        check_amount(amount)?;
        if amount > self.earned(account, now)? {
            return Err(ContractError::InsufficientRewardBalance);
        }

        let mut next = self.clone();
        let mut acct = account.clone();
        next.update_reward(&mut acct, now)?;
        acct.rewards -= amount;

        *self = next;
        *account = acct;
        Ok(())
    }

    /// Pays out everything the account has earned. Returns the amount, which
    /// may be zero.
    pub fn claim_rewards(
        &mut self,
        account: &mut AccountRewards,
        now: u64,
    ) -> Result<i128, ContractError> {
        let mut next = self.clone();
        let mut acct = account.clone();
        next.update_reward(&mut acct, now)?;

        let claimed = acct.rewards;
        acct.rewards = 0;

        *self = next;
        *account = acct;
        Ok(claimed)
    }

    fn update_reward(
        &mut self,
        account: &mut AccountRewards,
        now: u64,
    ) -> Result<(), ContractError> {
        self.accumulator.refresh(now, self.total_staked)?;
        self.accumulator.settle(account)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use common::math::SECONDS_PER_DAY;

    const DAY: u64 = SECONDS_PER_DAY;
    const T0: u64 = 1_000_000;

    fn funded_pool(duration: u64, amount: i128) -> PoolState {
        let mut pool = PoolState::new(duration, T0);
        pool.notify_reward_amount(amount, T0, amount).unwrap();
        pool
    }

    #[test]
    fn scenario_two_hundred_day_emission() {
        let mut pool = funded_pool(200 * DAY, 80_000_000);
        // 80M / 17.28M s ≈ 4.6296296 units per second.
        assert_eq!(pool.accumulator.reward_rate, 4_629_629_629_629_629_629);

        let mut alice = AccountRewards::default();
        pool.stake(&mut alice, 5, false, T0).unwrap();

        let earned = pool.earned(&alice, T0 + 10 * DAY).unwrap();
        assert!((earned - 4_000_000).abs() <= 1, "earned = {earned}");
    }

    #[test]
    fn notify_mid_period_rolls_leftover_forward() {
        let mut pool = funded_pool(100, 1_000);
        // Half the period elapsed: 500 left over, plus 1_000 new over 100 s.
        let rate = pool.notify_reward_amount(1_000, T0 + 50, 1_500).unwrap();
        assert_eq!(rate, 15 * PRECISION);
        assert_eq!(pool.accumulator.period_finish, T0 + 150);
        assert_eq!(pool.period_start, T0 + 50);
    }

    #[test]
    fn notify_rejects_unbacked_rate() {
        let mut pool = PoolState::new(100, T0);
        let before = pool.clone();
        assert_eq!(
            pool.notify_reward_amount(1_000, T0, 999),
            Err(ContractError::InsufficientBalanceForReward)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn shortening_below_elapsed_fails() {
        let mut pool = funded_pool(100 * DAY, 100_000_000);
        let before = pool.clone();
        assert_eq!(
            pool.set_rewards_duration(20 * DAY, T0 + 30 * DAY),
            Err(ContractError::DurationTooShort)
        );
        assert_eq!(
            pool.set_rewards_duration(30 * DAY, T0 + 30 * DAY),
            Err(ContractError::DurationTooShort)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn lengthening_pro_rates_remaining_reward() {
        let mut pool = funded_pool(100 * DAY, 100_000_000);
        let now = T0 + 30 * DAY;
        let remaining =
            seconds(pool.accumulator.period_finish - now) * pool.accumulator.reward_rate;

        let previous = pool.set_rewards_duration(200 * DAY, now).unwrap();
        assert_eq!(previous, 100 * DAY);
        assert_eq!(pool.accumulator.period_finish, T0 + 200 * DAY);

        let redistributed = pool.accumulator.reward_rate * seconds(170 * DAY);
        // Only integer-division dust may be lost.
        assert!(remaining - redistributed >= 0);
        assert!(remaining - redistributed < seconds(170 * DAY));
    }

    #[test]
    fn duration_change_before_start_rescales_full_window() {
        let start = T0 + 10 * DAY;
        let mut pool = PoolState::new(100 * DAY, start);
        pool.notify_reward_amount(100_000_000, T0, 100_000_000).unwrap();
        let old_rate = pool.accumulator.reward_rate;

        pool.set_rewards_duration(200 * DAY, T0).unwrap();
        assert_eq!(pool.accumulator.reward_rate, old_rate / 2);
        assert_eq!(pool.accumulator.period_finish, T0 + 200 * DAY);
    }

    #[test]
    fn duration_change_without_period_keeps_rate() {
        let mut pool = PoolState::new(100, T0);
        assert_eq!(pool.set_rewards_duration(7, T0 + 1_000).unwrap(), 100);
        assert_eq!(pool.rewards_duration, 7);
        assert_eq!(pool.accumulator.reward_rate, 0);
    }

    #[test]
    fn start_time_rules() {
        let mut pool = PoolState::new(100, T0 + 100);
        assert_eq!(
            pool.set_start_time(T0, T0),
            Err(ContractError::StartTimeInPast)
        );
        assert_eq!(pool.set_start_time(T0 + 500, T0).unwrap(), T0 + 100);
        assert_eq!(pool.start_time, T0 + 500);

        // Once the start has passed it is frozen.
        assert_eq!(
            pool.set_start_time(T0 + 9_000, T0 + 500),
            Err(ContractError::StartTimeAlreadyPassed)
        );
    }

    #[test]
    fn stake_before_start_requires_eligibility() {
        let mut pool = PoolState::new(100, T0);
        let mut account = AccountRewards::default();

        assert_eq!(
            pool.stake(&mut account, 10, false, T0 - 1),
            Err(ContractError::NotEligible)
        );
        pool.stake(&mut account, 10, true, T0 - 1).unwrap();
        pool.stake(&mut account, 10, false, T0).unwrap();
        assert_eq!(account.balance, 20);
        assert_eq!(pool.total_staked, 20);
    }

    #[test]
    fn withdraw_pays_principal_and_rewards() {
        let mut pool = funded_pool(100, 1_000);
        let mut account = AccountRewards::default();
        pool.stake(&mut account, 50, false, T0).unwrap();

        let settlement = pool.withdraw(&mut account, 20, T0 + 10).unwrap();
        assert_eq!(
            settlement,
            Settlement {
                principal: 20,
                reward: 100
            }
        );
        assert_eq!(account.balance, 30);
        assert_eq!(account.rewards, 0);
        assert_eq!(pool.total_staked, 30);
    }

    #[test]
    fn withdraw_more_than_balance_leaves_state_untouched() {
        let mut pool = funded_pool(100, 1_000);
        let mut account = AccountRewards::default();
        pool.stake(&mut account, 50, false, T0).unwrap();

        let (pool_before, account_before) = (pool.clone(), account.clone());
        assert_eq!(
            pool.withdraw(&mut account, 51, T0 + 10),
            Err(ContractError::InsufficientBalance)
        );
        assert_eq!(pool, pool_before);
        assert_eq!(account, account_before);
    }

    #[test]
    fn withdraw_rewards_is_bounded_by_earned() {
        let mut pool = funded_pool(100, 1_000);
        let mut account = AccountRewards::default();
        pool.stake(&mut account, 50, false, T0).unwrap();

        assert_eq!(
            pool.withdraw_rewards(&mut account, 101, T0 + 10),
            Err(ContractError::InsufficientRewardBalance)
        );
        pool.withdraw_rewards(&mut account, 60, T0 + 10).unwrap();
        assert_eq!(account.rewards, 40);
        assert_eq!(pool.earned(&account, T0 + 10).unwrap(), 40);
    }

    #[test]
    fn amounts_must_be_positive() {
        let mut pool = PoolState::new(100, T0);
        let mut account = AccountRewards::default();
        assert_eq!(
            pool.stake(&mut account, 0, true, T0),
            Err(ContractError::ZeroAmount)
        );
        assert_eq!(
            pool.stake(&mut account, -5, true, T0),
            Err(ContractError::InvalidAmount)
        );
        assert_eq!(
            pool.withdraw_rewards(&mut account, 0, T0),
            Err(ContractError::ZeroAmount)
        );
    }

    #[test]
    fn claim_rewards_drains_settled_amount() {
        let mut pool = funded_pool(100, 1_000);
        let mut account = AccountRewards::default();
        pool.stake(&mut account, 10, false, T0).unwrap();

        assert_eq!(pool.claim_rewards(&mut account, T0 + 100).unwrap(), 1_000);
        assert_eq!(pool.claim_rewards(&mut account, T0 + 100).unwrap(), 0);
    }
}
