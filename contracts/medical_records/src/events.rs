use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

/// Event published when a doctor is authorized or revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorEvent {
    pub doctor: Address,
    pub by: Address,
    pub timestamp: u64,
}

/// Event published when a patient is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientRegisteredEvent {
    pub patient_id: String,
    pub controller: Address,
    pub timestamp: u64,
}

/// Event published when a consent edge flips.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentChangedEvent {
    pub patient_id: String,
    pub doctor: Address,
    pub granted: bool,
    pub timestamp: u64,
}

/// Event published when a record is added.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub patient_id: String,
    pub author: Address,
    pub timestamp: u64,
}

/// Event published when attachments are linked to a record.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilesAddedEvent {
    pub record_id: u64,
    pub patient_id: String,
    pub added: u32,
    pub total: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, owner: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_authorized(env: &Env, doctor: Address, by: Address) {
    let topics = (symbol_short!("DOC_AUTH"), doctor.clone());
    let data = DoctorEvent {
        doctor,
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_revoked(env: &Env, doctor: Address, by: Address) {
    let topics = (symbol_short!("DOC_REV"), doctor.clone());
    let data = DoctorEvent {
        doctor,
        by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_registered(env: &Env, patient_id: String, controller: Address) {
    let topics = (symbol_short!("PAT_REG"), controller.clone());
    let data = PatientRegisteredEvent {
        patient_id,
        controller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes `CON_GRT` or `CON_REV` depending on the new edge value.
pub fn publish_consent_changed(env: &Env, patient_id: String, doctor: Address, granted: bool) {
    let name = if granted {
        symbol_short!("CON_GRT")
    } else {
        symbol_short!("CON_REV")
    };
    let topics = (name, doctor.clone());
    let data = ConsentChangedEvent {
        patient_id,
        doctor,
        granted,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new record is added.
/// `author` is the identity that submitted it, which makes owner overrides visible.
pub fn publish_record_added(env: &Env, record_id: u64, patient_id: String, author: Address) {
    let topics = (symbol_short!("REC_ADD"), author.clone());
    let data = RecordAddedEvent {
        record_id,
        patient_id,
        author,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_files_added(
    env: &Env,
    record_id: u64,
    patient_id: String,
    added: u32,
    total: u32,
) {
    let topics = (symbol_short!("FILE_ADD"), record_id);
    let data = FilesAddedEvent {
        record_id,
        patient_id,
        added,
        total,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
