//! Field bounds for patient identifiers, clinical text and attachments.
//!
//! The checks operate on raw bytes so they work the same for a
//! `soroban_sdk::String` copied into a buffer and for a host `&str`.

/// Maximum length of a patient identifier in bytes.
pub const MAX_PATIENT_ID_LEN: u32 = 64;

/// Maximum length of short clinical fields (name, gender, blood group, doctor).
pub const MAX_SHORT_FIELD_LEN: u32 = 128;

/// Maximum length of free-text clinical fields (diagnosis, treatment).
pub const MAX_LONG_FIELD_LEN: u32 = 1024;

/// Upper bound for a patient's age in years.
pub const MAX_AGE_YEARS: u32 = 150;

/// Maximum length of a content address (CIDv0/CIDv1 fit comfortably).
pub const MAX_CONTENT_HASH_LEN: u32 = 128;

/// Maximum length of an attachment file name.
pub const MAX_FILE_NAME_LEN: u32 = 255;

/// Maximum length of an attachment MIME type.
pub const MAX_FILE_TYPE_LEN: u32 = 127;

/// Maximum number of attachments linked by a single call.
pub const MAX_ATTACHMENTS_PER_CALL: u32 = 16;

/// Maximum number of attachments a record can carry. At the field bounds
/// above a full list stays well under the 64 KiB ledger entry limit.
pub const MAX_ATTACHMENTS_PER_RECORD: u32 = 32;

/// Maximum number of records returned by one read. Each record costs three
/// ledger entries (index, record, attachments).
pub const MAX_RECORDS_PER_PAGE: u32 = 10;

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn within(bytes: &[u8], max: u32) -> bool {
    !bytes.is_empty() && bytes.len() <= max as usize
}

/// Patient ids are 1..=64 bytes of `[A-Za-z0-9_-]`.
pub fn is_valid_patient_id(bytes: &[u8]) -> bool {
    within(bytes, MAX_PATIENT_ID_LEN) && bytes.iter().all(|b| is_key_byte(*b))
}

/// Content hashes share the patient-id alphabet (base58/base32 CIDs, hex digests
/// with an algorithm prefix such as `sha256-`).
pub fn is_valid_content_hash(bytes: &[u8]) -> bool {
    within(bytes, MAX_CONTENT_HASH_LEN) && bytes.iter().all(|b| is_key_byte(*b))
}

/// File names must be non-empty, bounded, and free of path separators and
/// control characters.
pub fn is_valid_file_name(bytes: &[u8]) -> bool {
    within(bytes, MAX_FILE_NAME_LEN)
        && bytes
            .iter()
            .all(|b| *b != b'/' && *b != b'\\' && !b.is_ascii_control())
}

/// MIME types look like `type/subtype` with no whitespace.
pub fn is_valid_file_type(bytes: &[u8]) -> bool {
    if !within(bytes, MAX_FILE_TYPE_LEN) {
        return false;
    }
    let slashes = bytes.iter().filter(|b| **b == b'/').count();
    slashes == 1
        && bytes[0] != b'/'
        && bytes[bytes.len() - 1] != b'/'
        && bytes.iter().all(|b| b.is_ascii_graphic())
}
