#![no_std]
//! Medical records contract: owner/doctor/patient authorization, per-patient
//! consent, append-only clinical records and content-addressed attachments.
//!
//! `MedicalRecordsContract` is the only entry point. Every call resolves the
//! caller's roles once (see [`rbac`]), checks the permission table, and only
//! then touches the ledger or the consent registry.

pub mod consent;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod rbac;
pub mod validation;

use records_common::limits::MAX_RECORDS_PER_PAGE;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use consent::ConsentEntry;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use rbac::{Action, Grant, Role, RoleSet};

/// Clinical payload of a record. All fields are required.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClinicalFields {
    pub patient_name: String,
    pub gender: String,
    pub age: u32,
    pub blood_group: String,
    pub diagnosis: String,
    pub treatment: String,
    pub doctor_name: String,
}

/// Attachment triple as submitted by a caller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachmentInput {
    pub content_hash: String,
    pub file_name: String,
    pub file_type: String,
}

/// Stored attachment, stamped with who linked it and when.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attachment {
    pub content_hash: String,
    pub file_name: String,
    pub file_type: String,
    pub added_by: Address,
    pub added_at: u64,
}

/// A record as returned to readers, with its attachments in link order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    pub record_id: u64,
    pub patient_id: String,
    pub author: Address,
    pub patient_name: String,
    pub gender: String,
    pub age: u32,
    pub blood_group: String,
    pub diagnosis: String,
    pub treatment: String,
    pub doctor_name: String,
    pub created_at: u64,
    pub attachments: Vec<Attachment>,
}

/// A registered patient and the identity that controls its consent.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientEntry {
    pub patient_id: String,
    pub controller: Address,
    pub registered_at: u64,
}

/// Emits a debug log line for a rejected call and hands the error back.
fn reject(env: &Env, op: Symbol, caller: &Address, err: ContractError) -> ContractError {
    log!(
        env,
        "rejected",
        op,
        caller.clone(),
        err as u32,
        err.category() as u32,
        err.severity() as u32
    );
    err
}

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    // ======================== Authorization Registry ========================

    /// Initialize the contract with its single owner
    pub fn initialize(env: Env, owner: Address) -> Result<(), ContractError> {
        owner.require_auth();

        rbac::set_owner(&env, &owner)
            .map_err(|e| reject(&env, symbol_short!("init"), &owner, e))?;

        events::publish_initialized(&env, owner);
        Ok(())
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        rbac::is_initialized(&env)
    }

    /// Get the owner address
    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        rbac::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    /// Add `doctor` to the doctor set. Owner only; re-authorizing is a no-op.
    pub fn authorize_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        rbac::require_owner(&env, &caller)
            .map_err(|e| reject(&env, symbol_short!("auth_doc"), &caller, e))?;

        if rbac::add_doctor(&env, &doctor) {
            events::publish_doctor_authorized(&env, doctor, caller);
        }
        Ok(())
    }

    /// Remove `doctor` from the doctor set. Owner only; consent edges are kept.
    pub fn revoke_doctor(env: Env, caller: Address, doctor: Address) -> Result<(), ContractError> {
        caller.require_auth();
        rbac::require_owner(&env, &caller)
            .map_err(|e| reject(&env, symbol_short!("rev_doc"), &caller, e))?;

        if rbac::remove_doctor(&env, &doctor) {
            events::publish_doctor_revoked(&env, doctor, caller);
        }
        Ok(())
    }

    pub fn is_doctor(env: Env, identity: Address) -> bool {
        rbac::is_doctor(&env, &identity)
    }

    // ======================== Consent Registry ========================

    /// Grant `doctor` access to `patient_id`. Only the patient's controlling
    /// identity may call this.
    pub fn grant_consent(
        env: Env,
        caller: Address,
        patient_id: String,
        doctor: Address,
    ) -> Result<(), ContractError> {
        Self::set_consent(&env, caller, patient_id, doctor, true)
    }

    /// Revoke `doctor`'s access to `patient_id`. Revoking an absent edge succeeds.
    pub fn revoke_consent(
        env: Env,
        caller: Address,
        patient_id: String,
        doctor: Address,
    ) -> Result<(), ContractError> {
        Self::set_consent(&env, caller, patient_id, doctor, false)
    }

    pub fn has_consent(env: Env, patient_id: String, doctor: Address) -> bool {
        consent::has_consent(&env, &patient_id, &doctor)
    }

    pub fn get_consent(env: Env, patient_id: String, doctor: Address) -> Option<ConsentEntry> {
        consent::get_consent(&env, &patient_id, &doctor)
    }

    // ======================== Record Ledger ========================

    /// Register `patient_id` with the caller as its controlling identity
    pub fn register_patient(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let op = symbol_short!("reg_pat");

        rbac::require_initialized(&env).map_err(|e| reject(&env, op.clone(), &caller, e))?;
        validation::validate_patient_id(&patient_id)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;

        if ledger::patient_exists(&env, &patient_id) {
            return Err(reject(&env, op, &caller, ContractError::AlreadyExists));
        }

        ledger::insert_patient(&env, &patient_id, &caller);
        events::publish_patient_registered(&env, patient_id, caller);
        Ok(())
    }

    pub fn get_patient(env: Env, patient_id: String) -> Result<PatientEntry, ContractError> {
        ledger::get_patient(&env, &patient_id).ok_or(ContractError::NotFound)
    }

    /// Add a clinical record for `patient_id` and return its id
    pub fn add_record(
        env: Env,
        caller: Address,
        patient_id: String,
        fields: ClinicalFields,
    ) -> Result<u64, ContractError> {
        caller.require_auth();
        let op = symbol_short!("add_rec");

        Self::check_patient_access(&env, &caller, &patient_id, Action::AddRecord)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;
        validation::validate_clinical_fields(&fields)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;

        let record_id = ledger::append_record(&env, &patient_id, &caller, fields)
            .map_err(|e| reject(&env, op, &caller, e))?;
        events::publish_record_added(&env, record_id, patient_id, caller);

        Ok(record_id)
    }

    /// Append attachment triples to an existing record. Returns how many
    /// attachments the record carries afterwards; a record holds at most
    /// `MAX_ATTACHMENTS_PER_RECORD`.
    pub fn add_files_to_record(
        env: Env,
        caller: Address,
        patient_id: String,
        record_id: u64,
        attachments: Vec<AttachmentInput>,
    ) -> Result<u32, ContractError> {
        caller.require_auth();
        let op = symbol_short!("add_file");

        rbac::require_initialized(&env).map_err(|e| reject(&env, op.clone(), &caller, e))?;
        if !ledger::patient_exists(&env, &patient_id) {
            return Err(reject(&env, op, &caller, ContractError::NotFound));
        }
        match ledger::get_stored_record(&env, record_id) {
            Some(record) if record.patient_id == patient_id => {}
            _ => return Err(reject(&env, op, &caller, ContractError::NotFound)),
        }
        rbac::authorize(&env, &caller, &patient_id, Action::AddFiles)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;
        validation::validate_attachments(&attachments)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;

        let total = ledger::append_attachments(&env, record_id, &caller, &attachments)
            .map_err(|e| reject(&env, op, &caller, e))?;
        events::publish_files_added(&env, record_id, patient_id, attachments.len(), total);

        Ok(total)
    }

    /// Get all records for a patient, in creation order. Patients with more
    /// than `MAX_RECORDS_PER_PAGE` records must be read with
    /// `get_patient_records_page`; this call rejects them with `Invalid`.
    pub fn get_patient_records(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<Vec<MedicalRecord>, ContractError> {
        caller.require_auth();
        let op = symbol_short!("get_recs");

        Self::check_patient_access(&env, &caller, &patient_id, Action::ReadRecords)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;

        let count = ledger::patient_record_count(&env, &patient_id);
        if count > MAX_RECORDS_PER_PAGE {
            return Err(reject(&env, op, &caller, ContractError::Invalid));
        }
        Ok(ledger::patient_records_page(&env, &patient_id, 0, count))
    }

    /// Get up to `limit` records for a patient starting at position `offset`.
    /// `limit` must be in `1..=MAX_RECORDS_PER_PAGE`.
    pub fn get_patient_records_page(
        env: Env,
        caller: Address,
        patient_id: String,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<MedicalRecord>, ContractError> {
        caller.require_auth();
        let op = symbol_short!("get_page");

        Self::check_patient_access(&env, &caller, &patient_id, Action::ReadRecords)
            .map_err(|e| reject(&env, op.clone(), &caller, e))?;
        if limit == 0 || limit > MAX_RECORDS_PER_PAGE {
            return Err(reject(&env, op, &caller, ContractError::Invalid));
        }

        Ok(ledger::patient_records_page(&env, &patient_id, offset, limit))
    }

    /// Number of records a patient has, for paging. Same access rule as reads.
    pub fn get_patient_record_count(
        env: Env,
        caller: Address,
        patient_id: String,
    ) -> Result<u32, ContractError> {
        caller.require_auth();

        Self::check_patient_access(&env, &caller, &patient_id, Action::ReadRecords)
            .map_err(|e| reject(&env, symbol_short!("rec_cnt"), &caller, e))?;

        Ok(ledger::patient_record_count(&env, &patient_id))
    }

    /// Get the total number of records
    pub fn get_record_count(env: Env) -> u64 {
        ledger::record_count(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}

impl MedicalRecordsContract {
    /// initialized -> patient exists -> permission table
    fn check_patient_access(
        env: &Env,
        caller: &Address,
        patient_id: &String,
        action: Action,
    ) -> Result<(), ContractError> {
        rbac::require_initialized(env)?;
        if !ledger::patient_exists(env, patient_id) {
            return Err(ContractError::NotFound);
        }
        rbac::authorize(env, caller, patient_id, action)
    }

    fn set_consent(
        env: &Env,
        caller: Address,
        patient_id: String,
        doctor: Address,
        granted: bool,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let op = if granted {
            symbol_short!("grant")
        } else {
            symbol_short!("revoke")
        };

        Self::check_patient_access(env, &caller, &patient_id, Action::ManageConsent)
            .map_err(|e| reject(env, op, &caller, e))?;

        if consent::set_consent(env, &patient_id, &doctor, granted) {
            events::publish_consent_changed(env, patient_id, doctor, granted);
        }
        Ok(())
    }
}
