#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lockable_staking::{LockableStakingContract, LockableStakingContractClient};
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};

const USERS: usize = 3;
const DAY: u64 = 86_400;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    CreatePlan { days: u8, apr_bps: u32, default_apr_bps: u32 },
    TogglePlan { plan_id: u8, active: bool },
    Stake { user: u8, plan_id: u8, amount: u32 },
    Withdraw { user: u8, index: u8, amount: u32, use_max: bool },
    Extend { user: u8, index: u8 },
    AdvanceDays { days: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(LockableStakingContract, ());
    let client = LockableStakingContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &token);

    // Deep reward reserve so payouts never fail on custody.
    StellarAssetClient::new(&env, &token).mint(&contract_id, &i128::from(u64::MAX));

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &token).mint(user, &i128::from(u64::MAX));
    }
    let mut now = 1_000u64;

    for action in actions {
        match action {
            FuzzAction::CreatePlan { days, apr_bps, default_apr_bps } => {
                let _ = client.try_create_plan(
                    &owner,
                    &(u64::from(days) * DAY),
                    &apr_bps,
                    &default_apr_bps,
                );
            }
            FuzzAction::TogglePlan { plan_id, active } => {
                let _ = client.try_change_plan_active_status(&owner, &u32::from(plan_id), &active);
            }
            FuzzAction::Stake { user, plan_id, amount } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_stake(u, &u32::from(plan_id), &i128::from(amount));
            }
            FuzzAction::Withdraw { user, index, amount, use_max } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_withdraw(u, &u32::from(index), &i128::from(amount), &use_max);
            }
            FuzzAction::Extend { user, index } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_extend(u, &u32::from(index));
            }
            FuzzAction::AdvanceDays { days } => {
                now += u64::from(days) * DAY;
                env.ledger().set_timestamp(now);
            }
        }
    }

    for user in &users {
        for position in client.get_user_staking_records(user).iter() {
            assert!(position.paid_amount <= position.amount + position.reward);
        }
    }
});
