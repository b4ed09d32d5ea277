#![no_std]

pub mod events;
pub mod ledger;
pub mod plans;
pub mod positions;

use common::{fees, ownership, pausable, storage, Clock, FeeConfig};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use plans::Plan;
use positions::Position;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");

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
    InvalidPlanId = 24,
    InvalidStakeId = 25,
    InvalidApr = 26,

    NotYetMatured = 44,
    Archived = 45,
    PlanInactive = 46,

    ArithmeticOverflow = 63,
    ExceedsAvailable = 64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LockableStakingContract;

#[contractimpl]
impl LockableStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// `token` is both staked and paid as reward; the owner keeps the
    /// contract funded with enough of it to cover accrued rewards.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&INITIALIZED, &true);
        ownership::set_owner(&env, &owner);
        storage::extend_instance(&env);

        events::publish_initialized(&env, owner, token);

        Ok(())
    }

    // ── Plans ───────────────────────────────────────────────────────────────

    /// Append a plan. Returns its id.
    pub fn create_plan(
        env: Env,
        caller: Address,
        duration: u64,
        apr_bps: u32,
        default_apr_bps: u32,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let plan = plans::create(&env, duration, apr_bps, default_apr_bps)?;
        storage::extend_instance(&env);

        events::publish_plan_created(&env, plan.id, duration, apr_bps, default_apr_bps);

        Ok(plan.id)
    }

    pub fn change_plan_active_status(
        env: Env,
        caller: Address,
        plan_id: u32,
        active: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut plan = plans::get(&env, plan_id)?;
        plan.active = active;
        plans::store(&env, &plan);

        events::publish_plan_status_changed(&env, plan_id, active);

        Ok(())
    }

    pub fn get_plan(env: Env, plan_id: u32) -> Result<Plan, ContractError> {
        plans::get(&env, plan_id)
    }

    pub fn get_plans(env: Env) -> Vec<Plan> {
        plans::all(&env)
    }

    pub fn get_plan_count(env: Env) -> u32 {
        plans::count(&env)
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Lock `amount` tokens under `plan_id`. Returns the new stake index.
    pub fn stake(
        env: Env,
        account: Address,
        plan_id: u32,
        amount: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        Self::require_not_paused(&env)?;

        let plan = plans::get(&env, plan_id)?;
        if !plan.active {
            return Err(ContractError::PlanInactive);
        }
        let position = Position::open(&plan, amount, env.now())?;
        let stake_id = ledger::push(&env, &account, &position)?;
        storage::extend_instance(&env);

        events::publish_staked(&env, account.clone(), stake_id, plan_id, amount);

        let token = Self::load_token(&env)?;
        token::Client::new(&env, &token).transfer(
            &account,
            &env.current_contract_address(),
            &amount,
        );

        Ok(stake_id)
    }

    /// Withdraw from position `index`. Returns the amount paid.
    ///
    /// With `use_max` everything available is paid and `amount` is ignored.
    /// Before maturity only accrued, unpaid interest can be withdrawn.
    pub fn withdraw(
        env: Env,
        account: Address,
        index: u32,
        amount: i128,
        use_max: bool,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        Self::require_not_paused(&env)?;

        let mut position = ledger::get(&env, &account, index)?;
        let plan = plans::get(&env, position.plan_id)?;
        let payout = position.withdraw(&plan, amount, use_max, env.now())?;
        ledger::update(&env, &account, index, &position);

        events::publish_withdrawn(&env, account.clone(), index, payout, position.archived);

        if payout > 0 {
            let token = Self::load_token(&env)?;
            token::Client::new(&env, &token).transfer(
                &env.current_contract_address(),
                &account,
                &payout,
            );
        }

        Ok(payout)
    }

    /// Roll a matured position into a fresh one on the same plan. Returns
    /// the index of the new position.
    pub fn extend(env: Env, account: Address, index: u32) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        Self::require_not_paused(&env)?;

        let mut position = ledger::get(&env, &account, index)?;
        let plan = plans::get(&env, position.plan_id)?;
        let successor = position.roll_over(&plan, env.now())?;

        ledger::update(&env, &account, index, &position);
        let new_index = ledger::push(&env, &account, &successor)?;

        soroban_sdk::log!(
            &env,
            "position rolled over",
            index,
            new_index,
            successor.amount
        );
        events::publish_staked(
            &env,
            account.clone(),
            new_index,
            successor.plan_id,
            successor.amount,
        );
        events::publish_extended(&env, account, index, new_index, successor.amount);

        Ok(new_index)
    }

    // ── Position views ──────────────────────────────────────────────────────

    /// Cumulative reward of position `index` as of now.
    pub fn get_user_reward(env: Env, account: Address, index: u32) -> Result<i128, ContractError> {
        let position = ledger::get(&env, &account, index)?;
        let plan = plans::get(&env, position.plan_id)?;
        position.accrued_reward(&plan, env.now())
    }

    pub fn get_user_stake(
        env: Env,
        account: Address,
        index: u32,
    ) -> Result<Position, ContractError> {
        ledger::get(&env, &account, index)
    }

    pub fn get_user_staking_records(env: Env, account: Address) -> Vec<Position> {
        ledger::all(&env, &account)
    }

    /// Principal across the account's open positions.
    pub fn get_user_total_staked_amount(
        env: Env,
        account: Address,
    ) -> Result<i128, ContractError> {
        ledger::total_staked(&env, &account)
    }

    pub fn get_staked_address_count(env: Env) -> u32 {
        ledger::address_count(&env)
    }

    pub fn get_staked_address(env: Env, index: u32) -> Option<Address> {
        ledger::address_at(&env, index)
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

    // ── Misc views ──────────────────────────────────────────────────────────

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::load_token(&env)
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

    fn load_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }
}
