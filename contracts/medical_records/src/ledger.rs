use records_common::limits::MAX_ATTACHMENTS_PER_RECORD;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::{
    Attachment, AttachmentInput, ClinicalFields, ContractError, MedicalRecord, PatientEntry,
};

pub(crate) const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

/// Immutable part of a record. Attachments are kept under their own key so
/// appending never rewrites the clinical data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredRecord {
    pub record_id: u64,
    pub patient_id: String,
    pub author: Address,
    pub fields: ClinicalFields,
    pub created_at: u64,
}

/// Internal store schema helpers
fn patient_key(patient_id: &String) -> (Symbol, String) {
    (symbol_short!("PATIENT"), patient_id.clone())
}

fn patient_record_count_key(patient_id: &String) -> (Symbol, String) {
    (symbol_short!("PAT_CNT"), patient_id.clone())
}

/// One key per (patient, position) so a patient's history never grows a
/// single entry.
fn patient_record_index_key(patient_id: &String, index: u32) -> (Symbol, String, u32) {
    (symbol_short!("PAT_REC"), patient_id.clone(), index)
}

fn record_key(record_id: u64) -> (Symbol, u64) {
    (symbol_short!("RECORD"), record_id)
}

fn attachments_key(record_id: u64) -> (Symbol, u64) {
    (symbol_short!("ATTACH"), record_id)
}

// ======================== Patients ========================

pub fn get_patient(env: &Env, patient_id: &String) -> Option<PatientEntry> {
    env.storage().persistent().get(&patient_key(patient_id))
}

pub fn patient_exists(env: &Env, patient_id: &String) -> bool {
    env.storage().persistent().has(&patient_key(patient_id))
}

/// Stores a new patient with an empty record index. The caller has already
/// checked that the id is free.
pub fn insert_patient(env: &Env, patient_id: &String, controller: &Address) -> PatientEntry {
    let entry = PatientEntry {
        patient_id: patient_id.clone(),
        controller: controller.clone(),
        registered_at: env.ledger().timestamp(),
    };

    let key = patient_key(patient_id);
    env.storage().persistent().set(&key, &entry);
    records_common::extend_persistent(env, &key);

    let count_key = patient_record_count_key(patient_id);
    env.storage().persistent().set(&count_key, &0u32);
    records_common::extend_persistent(env, &count_key);

    entry
}

// ======================== Records ========================

/// Last assigned record id; 0 before the first record.
pub fn record_count(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
}

/// Ids are never handed out twice, so an exhausted counter is an error
/// rather than a wrap or a repeat.
fn next_record_id(env: &Env) -> Result<u64, ContractError> {
    let record_id = record_count(env)
        .checked_add(1)
        .ok_or(ContractError::CounterOverflow)?;
    env.storage().instance().set(&RECORD_COUNTER, &record_id);
    records_common::extend_instance(env);
    Ok(record_id)
}

pub fn patient_record_count(env: &Env, patient_id: &String) -> u32 {
    env.storage()
        .persistent()
        .get(&patient_record_count_key(patient_id))
        .unwrap_or(0)
}

pub fn get_stored_record(env: &Env, record_id: u64) -> Option<StoredRecord> {
    env.storage().persistent().get(&record_key(record_id))
}

pub fn get_attachments(env: &Env, record_id: u64) -> Vec<Attachment> {
    env.storage()
        .persistent()
        .get(&attachments_key(record_id))
        .unwrap_or(Vec::new(env))
}

/// Assigns the next id, stamps ledger time and appends the record to the
/// patient's index.
pub fn append_record(
    env: &Env,
    patient_id: &String,
    author: &Address,
    fields: ClinicalFields,
) -> Result<u64, ContractError> {
    let position = patient_record_count(env, patient_id);
    let next_position = position
        .checked_add(1)
        .ok_or(ContractError::CounterOverflow)?;
    let record_id = next_record_id(env)?;

    let record = StoredRecord {
        record_id,
        patient_id: patient_id.clone(),
        author: author.clone(),
        fields,
        created_at: env.ledger().timestamp(),
    };
    let key = record_key(record_id);
    env.storage().persistent().set(&key, &record);
    records_common::extend_persistent(env, &key);

    let index_key = patient_record_index_key(patient_id, position);
    env.storage().persistent().set(&index_key, &record_id);
    records_common::extend_persistent(env, &index_key);

    let count_key = patient_record_count_key(patient_id);
    env.storage().persistent().set(&count_key, &next_position);
    records_common::extend_persistent(env, &count_key);

    Ok(record_id)
}

/// Appends attachments in input order. Existing entries are never touched.
/// Fails with `Invalid` when the record would exceed
/// `MAX_ATTACHMENTS_PER_RECORD`. Returns the number of attachments on the
/// record afterwards.
pub fn append_attachments(
    env: &Env,
    record_id: u64,
    added_by: &Address,
    inputs: &Vec<AttachmentInput>,
) -> Result<u32, ContractError> {
    let mut attachments = get_attachments(env, record_id);
    let total = attachments
        .len()
        .checked_add(inputs.len())
        .ok_or(ContractError::Invalid)?;
    if total > MAX_ATTACHMENTS_PER_RECORD {
        return Err(ContractError::Invalid);
    }

    let now = env.ledger().timestamp();
    for input in inputs.iter() {
        attachments.push_back(Attachment {
            content_hash: input.content_hash,
            file_name: input.file_name,
            file_type: input.file_type,
            added_by: added_by.clone(),
            added_at: now,
        });
    }

    let key = attachments_key(record_id);
    env.storage().persistent().set(&key, &attachments);
    records_common::extend_persistent(env, &key);

    Ok(attachments.len())
}

/// Up to `limit` records for a patient starting at position `offset`, in
/// append order. An offset past the end yields an empty list.
pub fn patient_records_page(
    env: &Env,
    patient_id: &String,
    offset: u32,
    limit: u32,
) -> Vec<MedicalRecord> {
    let end = offset
        .saturating_add(limit)
        .min(patient_record_count(env, patient_id));

    let mut records = Vec::new(env);
    for position in offset..end {
        let record_id: Option<u64> = env
            .storage()
            .persistent()
            .get(&patient_record_index_key(patient_id, position));
        let Some(record_id) = record_id else {
            continue;
        };
        if let Some(stored) = get_stored_record(env, record_id) {
            records.push_back(MedicalRecord {
                record_id,
                patient_id: stored.patient_id,
                author: stored.author,
                patient_name: stored.fields.patient_name,
                gender: stored.fields.gender,
                age: stored.fields.age,
                blood_group: stored.fields.blood_group,
                diagnosis: stored.fields.diagnosis,
                treatment: stored.fields.treatment,
                doctor_name: stored.fields.doctor_name,
                created_at: stored.created_at,
                attachments: get_attachments(env, record_id),
            });
        }
    }
    records
}
