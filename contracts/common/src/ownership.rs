use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Owner ────────────────────────────────────────────────────────────────────

/// Records `owner` as the sole admin of the calling contract.
/// Callers must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Guard used by every admin-only setter.
///
/// Returns `false` when no owner is recorded or `caller` is not the owner.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

// ── Two-step transfer ────────────────────────────────────────────────────────

/// Stores `candidate` as the proposed next owner, replacing any earlier
/// proposal.
pub fn propose(env: &Env, candidate: &Address) {
    env.storage().instance().set(&PENDING_OWNER, candidate);
}

pub fn get_pending(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Drops the pending proposal. Returns the address that was pending, if any.
pub fn cancel(env: &Env) -> Option<Address> {
    let pending = get_pending(env);
    if pending.is_some() {
        env.storage().instance().remove(&PENDING_OWNER);
    }
    pending
}

/// Completes the transfer when `candidate` is the pending owner.
///
/// Returns the previous owner on success and `None` when `candidate` was not
/// proposed (state is left untouched in that case).
pub fn accept(env: &Env, candidate: &Address) -> Option<Address> {
    let pending = get_pending(env)?;
    if pending != *candidate {
        return None;
    }
    let previous = get_owner(env)?;
    set_owner(env, candidate);
    env.storage().instance().remove(&PENDING_OWNER);
    Some(previous)
}
