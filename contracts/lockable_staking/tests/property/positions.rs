//! Property tests over fixed-term positions.
//!
//! Invariants tested:
//! - `paid_amount <= amount + reward` after every withdrawal
//! - A position is archived exactly when nothing is left available
//! - Accrued reward never decreases as time passes
//! - A rollover carries exactly what was still owed

use lockable_staking::plans::Plan;
use lockable_staking::positions::Position;
use lockable_staking::ContractError;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

const DAY: u64 = 86_400;
const T0: u64 = 1_000_000;

#[derive(Arbitrary, Clone, Debug)]
enum Action {
    Advance(#[proptest(strategy = "0..20u64")] u64),
    Withdraw(#[proptest(strategy = "1..5_000i128")] i128),
    WithdrawMax,
}

fn plan() -> impl Strategy<Value = Plan> {
    (1..120u64, 0..=20_000u32, 0..=20_000u32)
        .prop_map(|(days, apr, default_apr)| Plan::new(0, days * DAY, apr, default_apr).unwrap())
}

proptest! {
    #[test]
    fn prop_withdrawals_never_overpay(
        plan in plan(),
        amount in 1..1_000_000_000i128,
        actions in proptest::collection::vec(any::<Action>(), 1..40),
    ) {
        let mut position = Position::open(&plan, amount, T0).unwrap();
        let mut now = T0;
        let mut total_paid: i128 = 0;

        for action in actions {
            if position.archived {
                break;
            }
            let result = match action {
                Action::Advance(days) => {
                    now += days * DAY;
                    continue;
                }
                Action::Withdraw(requested) => position.withdraw(&plan, requested, false, now),
                Action::WithdrawMax => position.withdraw(&plan, 0, true, now),
            };

            match result {
                Ok(payout) => {
                    total_paid += payout;
                    prop_assert_eq!(position.paid_amount, total_paid);
                    prop_assert!(position.paid_amount <= position.amount + position.reward);
                    let left = position.amount + position.reward - position.paid_amount;
                    prop_assert_eq!(position.archived, left == 0);
                }
                Err(e) => prop_assert!(
                    matches!(e, ContractError::NotYetMatured | ContractError::ExceedsAvailable),
                    "unexpected error {:?}", e
                ),
            }
        }
    }

    #[test]
    fn prop_accrued_reward_is_monotonic(
        plan in plan(),
        amount in 1..1_000_000_000_000i128,
        a in 0..400u64,
        b in 0..400u64,
    ) {
        let position = Position::open(&plan, amount, T0).unwrap();
        let (early, late) = (T0 + a.min(b) * DAY, T0 + a.max(b) * DAY);
        prop_assert!(
            position.accrued_reward(&plan, early).unwrap()
                <= position.accrued_reward(&plan, late).unwrap()
        );
    }

    #[test]
    fn prop_rollover_carries_everything_owed(
        plan in plan(),
        amount in 1..1_000_000_000i128,
        taken in 0..1_000i128,
        extra_days in 0..30u64,
    ) {
        let mut position = Position::open(&plan, amount, T0).unwrap();
        let matured = position.end_time + extra_days * DAY;
        let taken = taken.min(amount - 1);
        if taken > 0 {
            position.withdraw(&plan, taken, false, matured).unwrap();
        }
        let owed = position.available(&plan, matured).unwrap();

        let successor = position.roll_over(&plan, matured).unwrap();
        prop_assert!(position.archived);
        prop_assert_eq!(successor.amount, owed);
        prop_assert_eq!(successor.start_time, matured);
        prop_assert_eq!(successor.end_time, matured + plan.duration);
    }
}
