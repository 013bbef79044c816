//! Payload validation for patient ids, clinical fields and attachments.
//!
//! Byte-level rules live in `records_common::limits` so the off-chain SDK can apply
//! them before uploading anything.

use records_common::limits::{
    is_valid_content_hash, is_valid_file_name, is_valid_file_type, is_valid_patient_id,
    MAX_AGE_YEARS, MAX_ATTACHMENTS_PER_CALL, MAX_CONTENT_HASH_LEN, MAX_FILE_NAME_LEN,
    MAX_FILE_TYPE_LEN, MAX_LONG_FIELD_LEN, MAX_PATIENT_ID_LEN, MAX_SHORT_FIELD_LEN,
};
use soroban_sdk::{String, Vec};

use crate::{AttachmentInput, ClinicalFields, ContractError};

/// Copies `value` into a stack buffer of `N` bytes and runs `check` on it.
/// Empty strings and strings longer than `N` fail without calling `check`.
fn check_bytes<const N: usize>(value: &String, check: impl Fn(&[u8]) -> bool) -> bool {
    let len = value.len() as usize;
    if len == 0 || len > N {
        return false;
    }
    let mut buf = [0u8; N];
    value.copy_into_slice(&mut buf[..len]);
    check(&buf[..len])
}

fn has_visible_char(bytes: &[u8]) -> bool {
    bytes.iter().any(|b| !b.is_ascii_whitespace())
}

fn validate_short(value: &String) -> Result<(), ContractError> {
    if check_bytes::<{ MAX_SHORT_FIELD_LEN as usize }>(value, has_visible_char) {
        Ok(())
    } else {
        Err(ContractError::Invalid)
    }
}

fn validate_long(value: &String) -> Result<(), ContractError> {
    if check_bytes::<{ MAX_LONG_FIELD_LEN as usize }>(value, has_visible_char) {
        Ok(())
    } else {
        Err(ContractError::Invalid)
    }
}

pub fn validate_patient_id(patient_id: &String) -> Result<(), ContractError> {
    if check_bytes::<{ MAX_PATIENT_ID_LEN as usize }>(patient_id, is_valid_patient_id) {
        Ok(())
    } else {
        Err(ContractError::Invalid)
    }
}

/// Every clinical field is mandatory.
pub fn validate_clinical_fields(fields: &ClinicalFields) -> Result<(), ContractError> {
    validate_short(&fields.patient_name)?;
    validate_short(&fields.gender)?;
    validate_short(&fields.blood_group)?;
    validate_short(&fields.doctor_name)?;
    validate_long(&fields.diagnosis)?;
    validate_long(&fields.treatment)?;

    if fields.age > MAX_AGE_YEARS {
        return Err(ContractError::Invalid);
    }
    Ok(())
}

pub fn validate_attachment(input: &AttachmentInput) -> Result<(), ContractError> {
    let ok = check_bytes::<{ MAX_CONTENT_HASH_LEN as usize }>(
        &input.content_hash,
        is_valid_content_hash,
    ) && check_bytes::<{ MAX_FILE_NAME_LEN as usize }>(&input.file_name, is_valid_file_name)
        && check_bytes::<{ MAX_FILE_TYPE_LEN as usize }>(&input.file_type, is_valid_file_type);

    if ok {
        Ok(())
    } else {
        Err(ContractError::Invalid)
    }
}

/// A batch must be non-empty, bounded, and valid as a whole; one bad
/// triple rejects the batch.
pub fn validate_attachments(inputs: &Vec<AttachmentInput>) -> Result<(), ContractError> {
    if inputs.is_empty() || inputs.len() > MAX_ATTACHMENTS_PER_CALL {
        return Err(ContractError::Invalid);
    }
    for input in inputs.iter() {
        validate_attachment(&input)?;
    }
    Ok(())
}
