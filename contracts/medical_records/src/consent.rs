use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

/// Current state of a (patient, doctor) consent edge.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentEntry {
    pub granted: bool,
    pub updated_at: u64,
}

fn consent_key(patient_id: &String, doctor: &Address) -> (Symbol, String, Address) {
    (symbol_short!("CONSENT"), patient_id.clone(), doctor.clone())
}

pub fn get_consent(env: &Env, patient_id: &String, doctor: &Address) -> Option<ConsentEntry> {
    env.storage()
        .persistent()
        .get(&consent_key(patient_id, doctor))
}

/// Default-deny: an absent edge is not granted.
pub fn has_consent(env: &Env, patient_id: &String, doctor: &Address) -> bool {
    get_consent(env, patient_id, doctor)
        .map(|entry| entry.granted)
        .unwrap_or(false)
}

/// Writes the edge. Returns `false` when the stored value already matched,
/// in which case storage is left untouched.
pub fn set_consent(env: &Env, patient_id: &String, doctor: &Address, granted: bool) -> bool {
    if has_consent(env, patient_id, doctor) == granted {
        return false;
    }

    let key = consent_key(patient_id, doctor);
    let entry = ConsentEntry {
        granted,
        updated_at: env.ledger().timestamp(),
    };
    env.storage().persistent().set(&key, &entry);
    records_common::extend_persistent(env, &key);
    true
}
