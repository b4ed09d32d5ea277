#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking_lp::{StakingLpContract, StakingLpContractClient};

const USERS: usize = 4;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u32 },
    Withdraw { user: u8, amount: u32 },
    WithdrawRewards { user: u8, amount: u32 },
    Claim { user: u8 },
    Exit { user: u8 },
    Notify { amount: u32 },
    SetDuration { seconds: u16 },
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingLpContract, ());
    let client = StakingLpContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &staking_token, &reward_token, &3_600, &1_000);

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &staking_token).mint(user, &i128::from(u32::MAX));
    }
    let lp = TokenClient::new(&env, &staking_token);
    let mut now = 1_000u64;

    // Every rejected call must be a contract error, never a host panic.
    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_stake_lp(u, u, &i128::from(amount));
            }
            FuzzAction::Withdraw { user, amount } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_withdraw(u, u, &i128::from(amount));
            }
            FuzzAction::WithdrawRewards { user, amount } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_withdraw_rewards(u, u, &i128::from(amount));
            }
            FuzzAction::Claim { user } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_claim_rewards(u, u);
            }
            FuzzAction::Exit { user } => {
                let u = &users[user as usize % USERS];
                let _ = client.try_exit(u, u);
            }
            FuzzAction::Notify { amount } => {
                StellarAssetClient::new(&env, &reward_token)
                    .mint(&contract_id, &i128::from(amount));
                let _ = client.try_notify_reward_amount(&owner, &i128::from(amount));
            }
            FuzzAction::SetDuration { seconds } => {
                let _ = client.try_set_rewards_duration(&owner, &u64::from(seconds));
            }
            FuzzAction::Advance { seconds } => {
                now += u64::from(seconds);
                env.ledger().set_timestamp(now);
            }
        }

        let total = client.get_total_staked();
        let sum: i128 = users.iter().map(|u| client.get_balance(u)).sum();
        assert_eq!(total, sum);
        assert_eq!(lp.balance(&contract_id), total);
    }
});
