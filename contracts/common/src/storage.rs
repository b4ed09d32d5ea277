use soroban_sdk::{Env, IntoVal, Val};

// ── TTL policy ───────────────────────────────────────────────────────────────

/// Ledgers closed per day at a ~5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Entries are bumped to live for 30 days after each write.
pub const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

/// Bumps happen once the remaining TTL drops below 29 days.
pub const TTL_THRESHOLD: u32 = TTL_EXTEND_TO - DAY_IN_LEDGERS;

/// Extends the TTL of the instance storage (shared by every instance key).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a persistent entry. The entry must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
