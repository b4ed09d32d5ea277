use common::storage::extend_persistent;
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

// Persistent flags keyed by (prefix, address). Absence means `false`.
const ELIGIBLE: Symbol = symbol_short!("ELIG");
const OPERATOR: Symbol = symbol_short!("OPER");

// ── Pre-start eligibility ────────────────────────────────────────────────────

pub fn is_eligible(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(ELIGIBLE, account.clone()))
        .unwrap_or(false)
}

/// Marks every address in `users` as eligible. Addresses already on the
/// list are left as they are.
pub fn add_all(env: &Env, users: &Vec<Address>) {
    for user in users.iter() {
        let key = (ELIGIBLE, user);
        env.storage().persistent().set(&key, &true);
        extend_persistent(env, &key);
    }
}

pub fn remove_all(env: &Env, users: &Vec<Address>) {
    for user in users.iter() {
        env.storage().persistent().remove(&(ELIGIBLE, user));
    }
}

// ── Operators ────────────────────────────────────────────────────────────────

/// Operators are proxies allowed to stake and withdraw on behalf of any
/// account.
pub fn is_operator(env: &Env, operator: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(OPERATOR, operator.clone()))
        .unwrap_or(false)
}

pub fn set_operator(env: &Env, operator: &Address, approved: bool) {
    let key = (OPERATOR, operator.clone());
    if approved {
        env.storage().persistent().set(&key, &true);
        extend_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}
