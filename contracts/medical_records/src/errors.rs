use soroban_sdk::contracttype;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract lifecycle errors: initialization order
    Lifecycle = 1,
    /// Authorization errors: role and consent failures
    Authorization = 2,
    /// Not found errors: unknown patient or record
    NotFound = 3,
    /// State conflict errors: duplicate registrations
    StateConflict = 4,
    /// Validation errors: malformed or missing payload fields
    Validation = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Caller mistake, nothing to investigate
    Low = 1,
    /// Rejected access attempt, worth auditing
    Medium = 2,
    /// Deployment problem
    High = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotFound = 4,
    AlreadyExists = 5,
    Invalid = 6,
    CounterOverflow = 7,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::AlreadyExists | ContractError::CounterOverflow => {
                ErrorCategory::StateConflict
            }
            ContractError::Invalid => ErrorCategory::Validation,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotFound | ContractError::AlreadyExists | ContractError::Invalid => {
                ErrorSeverity::Low
            }
            ContractError::Unauthorized | ContractError::AlreadyInitialized => {
                ErrorSeverity::Medium
            }
            ContractError::NotInitialized | ContractError::CounterOverflow => ErrorSeverity::High,
        }
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller lacks the required role or consent",
            ContractError::NotFound => "Patient or record not found",
            ContractError::AlreadyExists => "Patient ID is already registered",
            ContractError::Invalid => "Malformed or missing field in payload",
            ContractError::CounterOverflow => "Record id space is exhausted",
        }
    }
}
