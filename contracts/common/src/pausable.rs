use soroban_sdk::{symbol_short, Env, Symbol};

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Whether user-facing mutations are currently halted.
///
/// Admin setters are never gated on this flag so an owner can always
/// reconfigure a paused contract.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Flips the pause flag. Returns `false` when the flag already had the
/// requested value.
pub fn set_paused(env: &Env, paused: bool) -> bool {
    if is_paused(env) == paused {
        return false;
    }
    env.storage().instance().set(&PAUSED, &paused);
    true
}
