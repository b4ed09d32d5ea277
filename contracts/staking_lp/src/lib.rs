#![no_std]

pub mod eligibility;
pub mod events;
pub mod pool;
pub mod rewards;

use common::{fees, ownership, pausable, storage, Clock, FeeConfig};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use pool::{PoolState, Settlement};
use rewards::AccountRewards;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// Per-account persistent storage uses tuple keys: (prefix, account)
const ACCOUNT: Symbol = symbol_short!("ACCT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    Unauthorized = 10,
    ContractPaused = 11,

    ZeroAmount = 20,
    InvalidAmount = 21,
    InvalidDuration = 22,
    InvalidFee = 23,

    NotEligible = 40,
    StartTimeInPast = 41,
    StartTimeAlreadyPassed = 42,
    DurationTooShort = 43,

    InsufficientBalance = 60,
    InsufficientRewardBalance = 61,
    InsufficientBalanceForReward = 62,
    ArithmeticOverflow = 63,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Token pair fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub staking_token: Address,
    pub reward_token: Address,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingLpContract;

#[contractimpl]
impl StakingLpContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `staking_token`    – SAC address of the LP token users stake.
    /// * `reward_token`     – SAC address of the token paid as rewards. May
    ///   equal `staking_token`.
    /// * `rewards_duration` – length in seconds of each funded reward period.
    /// * `start_time`       – public start; before it only eligible users stake.
    pub fn initialize(
        env: Env,
        owner: Address,
        staking_token: Address,
        reward_token: Address,
        rewards_duration: u64,
        start_time: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if rewards_duration == 0 {
            return Err(ContractError::InvalidDuration);
        }
        owner.require_auth();

        let config = PoolConfig {
            staking_token: staking_token.clone(),
            reward_token: reward_token.clone(),
        };
        env.storage().instance().set(&CONFIG, &config);
        env.storage()
            .instance()
            .set(&POOL, &PoolState::new(rewards_duration, start_time));
        env.storage().instance().set(&INITIALIZED, &true);
        ownership::set_owner(&env, &owner);
        storage::extend_instance(&env);

        events::publish_initialized(
            &env,
            owner,
            staking_token,
            reward_token,
            rewards_duration,
            start_time,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` LP tokens for `account`, pulled from `caller`.
    ///
    /// `caller` is either `account` itself or an approved operator.
    pub fn stake_lp(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_not_paused(&env)?;
        Self::require_self_or_operator(&env, &caller, &account)?;

        let now = env.now();
        let mut pool = Self::load_pool(&env)?;
        let mut acct = Self::load_account(&env, &account);
        let eligible = eligibility::is_eligible(&env, &account);

        pool.stake(&mut acct, amount, eligible, now)?;

        Self::save_pool(&env, &pool);
        Self::save_account(&env, &account, &acct);
        events::publish_lp_staked(&env, account, amount, pool.total_staked);

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.staking_token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        Ok(())
    }

    /// Withdraw `amount` of principal together with every settled reward.
    /// Tokens go to `caller`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<Settlement, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_not_paused(&env)?;
        Self::require_self_or_operator(&env, &caller, &account)?;

        let mut pool = Self::load_pool(&env)?;
        let mut acct = Self::load_account(&env, &account);
        let settlement = pool.withdraw(&mut acct, amount, env.now())?;

        Self::save_pool(&env, &pool);
        Self::save_account(&env, &account, &acct);
        events::publish_withdrawn(&env, account, settlement.principal, settlement.reward);

        Self::pay_out(&env, &caller, &settlement)?;
        Ok(settlement)
    }

    /// Withdraw the full balance and every reward.
    pub fn exit(env: Env, caller: Address, account: Address) -> Result<Settlement, ContractError> {
        let balance = Self::load_account(&env, &account).balance;
        Self::withdraw(env, caller, account, balance)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay `amount` of the account's rewards while leaving principal staked.
    pub fn withdraw_rewards(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_not_paused(&env)?;
        Self::require_self_or_operator(&env, &caller, &account)?;

        let mut pool = Self::load_pool(&env)?;
        let mut acct = Self::load_account(&env, &account);
        pool.withdraw_rewards(&mut acct, amount, env.now())?;

        Self::save_pool(&env, &pool);
        Self::save_account(&env, &account, &acct);
        events::publish_withdrawn_rewards(&env, account, amount);

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        Ok(())
    }

    /// Pay out everything `account` has earned. Returns `0` without
    /// transferring when nothing is owed.
    pub fn claim_rewards(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_not_paused(&env)?;
        Self::require_self_or_operator(&env, &caller, &account)?;

        let mut pool = Self::load_pool(&env)?;
        let mut acct = Self::load_account(&env, &account);
        let claimed = pool.claim_rewards(&mut acct, env.now())?;

        Self::save_pool(&env, &pool);
        Self::save_account(&env, &account, &acct);
        if claimed == 0 {
            return Ok(0);
        }
        events::publish_withdrawn_rewards(&env, account, claimed);

        let config = Self::load_config(&env)?;
        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &caller,
            &claimed,
        );

        Ok(claimed)
    }

    // ── Reward administration ───────────────────────────────────────────────

    /// Open a new reward period distributing `amount` over `rewards_duration`.
    ///
    /// The reward tokens must already sit in the contract: the resulting
    /// rate may not promise more than the contract's reward balance
    /// (excluding staked principal when both tokens are the same).
    pub fn notify_reward_amount(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let config = Self::load_config(&env)?;
        let mut pool = Self::load_pool(&env)?;

        let held = token::Client::new(&env, &config.reward_token)
            .balance(&env.current_contract_address());
        let reward_balance = if config.reward_token == config.staking_token {
            held.saturating_sub(pool.total_staked)
        } else {
            held
        };

        let rate = pool.notify_reward_amount(amount, env.now(), reward_balance)?;
        Self::save_pool(&env, &pool);

        soroban_sdk::log!(
            &env,
            "reward period opened",
            rate,
            pool.accumulator.period_finish
        );
        events::publish_reward_added(&env, amount, rate, pool.accumulator.period_finish);

        Ok(rate)
    }

    pub fn set_rewards_duration(
        env: Env,
        caller: Address,
        new_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut pool = Self::load_pool(&env)?;
        let old_duration = pool.set_rewards_duration(new_duration, env.now())?;
        Self::save_pool(&env, &pool);

        soroban_sdk::log!(
            &env,
            "rewards duration changed",
            pool.accumulator.reward_rate,
            pool.accumulator.period_finish
        );
        events::publish_rewards_duration_updated(&env, old_duration, new_duration);

        Ok(())
    }

    pub fn set_start_time(env: Env, caller: Address, new_start: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut pool = Self::load_pool(&env)?;
        let old_start = pool.set_start_time(new_start, env.now())?;
        Self::save_pool(&env, &pool);

        events::publish_start_time(&env, old_start, new_start);

        Ok(())
    }

    // ── Eligibility & operators ─────────────────────────────────────────────

    pub fn add_to_eligible_users(
        env: Env,
        caller: Address,
        users: Vec<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        eligibility::add_all(&env, &users);
        events::publish_eligible_added(&env, users);

        Ok(())
    }

    pub fn remove_from_eligible_users(
        env: Env,
        caller: Address,
        users: Vec<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        eligibility::remove_all(&env, &users);
        events::publish_eligible_removed(&env, users);

        Ok(())
    }

    pub fn is_eligible(env: Env, account: Address) -> bool {
        eligibility::is_eligible(&env, &account)
    }

    /// Approve or revoke a proxy that may stake and withdraw for any account.
    pub fn set_operator(
        env: Env,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        eligibility::set_operator(&env, &operator, approved);
        events::publish_operator_set(&env, operator, approved);

        Ok(())
    }

    pub fn is_operator(env: Env, operator: Address) -> bool {
        eligibility::is_operator(&env, &operator)
    }

    // ── Pause ───────────────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if pausable::set_paused(&env, true) {
            events::publish_paused(&env, caller);
        }
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if pausable::set_paused(&env, false) {
            events::publish_unpaused(&env, caller);
        }
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        ownership::propose(&env, &new_owner);
        events::publish_owner_proposed(&env, caller, new_owner);

        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let previous = ownership::accept(&env, &new_owner)
            .ok_or(ContractError::Unauthorized)?;
        events::publish_owner_transferred(&env, previous, new_owner);

        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if let Some(pending) = ownership::cancel(&env) {
            events::publish_owner_transfer_cancelled(&env, caller, pending);
        }
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending(&env)
    }

    // ── Fees ────────────────────────────────────────────────────────────────

    pub fn set_fees(env: Env, caller: Address, config: FeeConfig) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !config.is_valid() {
            return Err(ContractError::InvalidFee);
        }
        fees::set_config(&env, &config);
        events::publish_fees_updated(
            &env,
            config.deposit_fee_bps,
            config.withdrawal_fee_bps,
            config.recipient,
        );

        Ok(())
    }

    pub fn get_fees(env: Env) -> Option<FeeConfig> {
        fees::get_config(&env)
    }

    /// Split `amount` into `(fee, net)` at `bps`, fee rounded down.
    pub fn quote_fee(_env: Env, amount: i128, bps: u32) -> Result<(i128, i128), ContractError> {
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        let fee = fees::fee_amount(amount, bps).ok_or(ContractError::InvalidFee)?;
        Ok((fee, amount - fee))
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn earned(env: Env, account: Address) -> Result<i128, ContractError> {
        let pool = Self::load_pool(&env)?;
        pool.earned(&Self::load_account(&env, &account), env.now())
    }

    pub fn get_balance(env: Env, account: Address) -> i128 {
        Self::load_account(&env, &account).balance
    }

    pub fn get_account(env: Env, account: Address) -> AccountRewards {
        Self::load_account(&env, &account)
    }

    pub fn get_total_staked(env: Env) -> Result<i128, ContractError> {
        Ok(Self::load_pool(&env)?.total_staked)
    }

    pub fn get_reward_per_token(env: Env) -> Result<i128, ContractError> {
        Self::load_pool(&env)?.reward_per_token(env.now())
    }

    pub fn get_last_time_reward_applicable(env: Env) -> Result<u64, ContractError> {
        let pool = Self::load_pool(&env)?;
        Ok(pool.accumulator.last_time_reward_applicable(env.now()))
    }

    pub fn get_reward_for_duration(env: Env) -> Result<i128, ContractError> {
        Self::load_pool(&env)?.reward_for_duration()
    }

    pub fn get_pool_state(env: Env) -> Result<PoolState, ContractError> {
        Self::load_pool(&env)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownership::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), ContractError> {
        if pausable::is_paused(env) {
            return Err(ContractError::ContractPaused);
        }
        Ok(())
    }

    fn require_self_or_operator(
        env: &Env,
        caller: &Address,
        account: &Address,
    ) -> Result<(), ContractError> {
        if caller == account || eligibility::is_operator(env, caller) {
            return Ok(());
        }
        Err(ContractError::Unauthorized)
    }

    fn load_config(env: &Env) -> Result<PoolConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_pool(env: &Env) -> Result<PoolState, ContractError> {
        env.storage()
            .instance()
            .get(&POOL)
            .ok_or(ContractError::NotInitialized)
    }

    fn save_pool(env: &Env, pool: &PoolState) {
        env.storage().instance().set(&POOL, pool);
        storage::extend_instance(env);
    }

    fn load_account(env: &Env, account: &Address) -> AccountRewards {
        env.storage()
            .persistent()
            .get(&(ACCOUNT, account.clone()))
            .unwrap_or_default()
    }

    fn save_account(env: &Env, account: &Address, rewards: &AccountRewards) {
        let key = (ACCOUNT, account.clone());
        env.storage().persistent().set(&key, rewards);
        storage::extend_persistent(env, &key);
    }

    fn pay_out(env: &Env, to: &Address, settlement: &Settlement) -> Result<(), ContractError> {
        let config = Self::load_config(env)?;
        let this = env.current_contract_address();
        token::Client::new(env, &config.staking_token).transfer(&this, to, &settlement.principal);
        if settlement.reward > 0 {
            token::Client::new(env, &config.reward_token).transfer(&this, to, &settlement.reward);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_admin;
