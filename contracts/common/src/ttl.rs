use soroban_sdk::{Env, IntoVal, Val};

/// Entries are bumped once their remaining TTL drops below this many ledgers.
pub const TTL_THRESHOLD: u32 = 5184000;
/// Target TTL (in ledgers) after a bump.
pub const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) of a persistent storage key.
/// The key must exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance (covers every instance key).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
