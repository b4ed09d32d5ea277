use soroban_sdk::Env;

/// Source of the current timestamp for accounting calls.
///
/// The reward engines never read time themselves; every core function takes
/// `now` as an argument and the host resolves it once per invocation through
/// this trait.
pub trait Clock {
    fn now(&self) -> u64;
}

impl Clock for Env {
    fn now(&self) -> u64 {
        self.ledger().timestamp()
    }
}
