use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::{consent, ledger, ContractError};

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Caller roles relative to a patient. Resolved once per call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Owner = 0,
    Doctor = 1,
    PatientSelf = 2,
    Other = 3,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Doctor, Role::PatientSelf, Role::Other];

    fn bit(self) -> u8 {
        1 << (self as u32)
    }
}

/// Operations gated by the permission table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    AddRecord,
    AddFiles,
    ReadRecords,
    ManageConsent,
}

/// Outcome of a single table lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Grant {
    Allow,
    WithConsent,
    Deny,
}

/// Static permission table. Owner may not manage consent on a patient's
/// behalf; doctors need a live consent edge for everything they touch.
pub fn grant_for(role: Role, action: Action) -> Grant {
    use Action::*;
    use Grant::*;

    match (role, action) {
        (Role::Owner, AddRecord | AddFiles | ReadRecords) => Allow,
        (Role::Owner, ManageConsent) => Deny,
        (Role::Doctor, AddRecord | AddFiles | ReadRecords) => WithConsent,
        (Role::Doctor, ManageConsent) => Deny,
        (Role::PatientSelf, ReadRecords | ManageConsent) => Allow,
        (Role::PatientSelf, AddRecord | AddFiles) => Deny,
        (Role::Other, _) => Deny,
    }
}

/// The set of roles a caller holds for one patient.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RoleSet(u8);

impl RoleSet {
    pub fn with(self, role: Role) -> Self {
        RoleSet(self.0 | role.bit())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Resolves every role `caller` holds with respect to `patient_id`.
/// A caller holding none of the privileged roles is `Other`.
pub fn resolve_roles(env: &Env, caller: &Address, patient_id: &String) -> RoleSet {
    let mut roles = RoleSet::default();

    if get_owner(env).as_ref() == Some(caller) {
        roles = roles.with(Role::Owner);
    }
    if is_doctor(env, caller) {
        roles = roles.with(Role::Doctor);
    }
    if let Some(patient) = ledger::get_patient(env, patient_id) {
        if patient.controller == *caller {
            roles = roles.with(Role::PatientSelf);
        }
    }

    if roles.is_empty() {
        roles = roles.with(Role::Other);
    }
    roles
}

/// Evaluates the permission table for every held role. Consent is only
/// looked up when some role needs it.
pub fn authorize(
    env: &Env,
    caller: &Address,
    patient_id: &String,
    action: Action,
) -> Result<(), ContractError> {
    let roles = resolve_roles(env, caller, patient_id);
    let mut needs_consent = false;

    for role in Role::ALL {
        if !roles.contains(role) {
            continue;
        }
        match grant_for(role, action) {
            Grant::Allow => return Ok(()),
            Grant::WithConsent => needs_consent = true,
            Grant::Deny => {}
        }
    }

    if needs_consent && consent::has_consent(env, patient_id, caller) {
        return Ok(());
    }
    Err(ContractError::Unauthorized)
}

// ======================== Owner & doctor set ========================

fn doctor_key(identity: &Address) -> (Symbol, Address) {
    (symbol_short!("DOCTOR"), identity.clone())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if is_initialized(env) {
        Ok(())
    } else {
        Err(ContractError::NotInitialized)
    }
}

/// Sets the single owner. Fails if an owner already exists.
pub fn set_owner(env: &Env, owner: &Address) -> Result<(), ContractError> {
    if is_initialized(env) {
        return Err(ContractError::AlreadyInitialized);
    }
    env.storage().instance().set(&OWNER, owner);
    env.storage().instance().set(&INITIALIZED, &true);
    records_common::extend_instance(env);
    Ok(())
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    match get_owner(env) {
        Some(owner) if owner == *caller => Ok(()),
        Some(_) => Err(ContractError::Unauthorized),
        None => Err(ContractError::NotInitialized),
    }
}

pub fn is_doctor(env: &Env, identity: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<_, bool>(&doctor_key(identity))
        .unwrap_or(false)
}

/// Adds `identity` to the doctor set. Returns `false` if it was already there.
pub fn add_doctor(env: &Env, identity: &Address) -> bool {
    if is_doctor(env, identity) {
        return false;
    }
    let key = doctor_key(identity);
    env.storage().persistent().set(&key, &true);
    records_common::extend_persistent(env, &key);
    true
}

/// Removes `identity` from the doctor set. Returns `false` if it was not a doctor.
pub fn remove_doctor(env: &Env, identity: &Address) -> bool {
    if !is_doctor(env, identity) {
        return false;
    }
    env.storage().persistent().remove(&doctor_key(identity));
    true
}
