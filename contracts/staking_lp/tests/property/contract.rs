//! Property tests driving the deployed contract.
//!
//! Invariants tested:
//! - The contract's LP token balance always equals `get_total_staked`
//! - `get_total_staked` equals the sum of `get_balance` over all stakers

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking_lp::{StakingLpContract, StakingLpContractClient};

const T0: u64 = 1_700_000_000;

fn setup() -> (Env, StakingLpContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingLpContract, ());
    let client = StakingLpContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &staking_token, &reward_token, &1_000, &T0);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000_000);
    client.notify_reward_amount(&owner, &1_000_000);

    (env, client, staking_token, reward_token)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_custody_matches_ledger(
        moves in proptest::collection::vec(
            (0usize..3, 1..1_000i128, any::<bool>(), 0..100u64),
            1..20,
        )
    ) {
        let (env, client, staking_token, _reward_token) = setup();
        let stakers: Vec<Address> = (0..3).map(|_| Address::generate(&env)).collect();
        for staker in &stakers {
            StellarAssetClient::new(&env, &staking_token).mint(staker, &1_000_000);
        }
        let lp = TokenClient::new(&env, &staking_token);
        let mut now = T0;

        for (who, amount, deposit, advance) in moves {
            now += advance;
            env.ledger().set_timestamp(now);
            let staker = &stakers[who];

            if deposit {
                client.stake_lp(staker, staker, &amount);
            } else {
                let balance = client.get_balance(staker);
                if balance > 0 {
                    client.withdraw(staker, staker, &amount.min(balance));
                }
            }

            let total = client.get_total_staked();
            prop_assert_eq!(lp.balance(&client.address), total);
            let sum: i128 = stakers.iter().map(|s| client.get_balance(s)).sum();
            prop_assert_eq!(total, sum);
        }
    }
}
