use thiserror::Error;

#[derive(Error, Debug)]
pub enum LendingError {
    #[error("Invalid value for {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Client '{client_id}' does not exist")]
    NotFoundError { client_id: String },

    #[error("Client '{client_id}' already has a stored record")]
    AlreadyExistsError { client_id: String },

    #[error("Loan '{loan_id}' not found for client '{client_id}'")]
    LoanNotFoundError { client_id: String, loan_id: String },

    #[error(
        "Insufficient balance on loan '{loan_id}': payment {requested:.2} exceeds balance {balance:.2}"
    )]
    InsufficientBalanceError {
        loan_id: String,
        requested: f64,
        balance: f64,
    },

    #[error("Malformed record at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Ledger,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LendingError {
    pub fn validation(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        LendingError::ValidationError {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        LendingError::ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LendingError::ValidationError { .. } => ErrorCategory::Input,
            LendingError::NotFoundError { .. }
            | LendingError::AlreadyExistsError { .. }
            | LendingError::LoanNotFoundError { .. } => ErrorCategory::Lookup,
            LendingError::InsufficientBalanceError { .. } => ErrorCategory::Ledger,
            LendingError::ParseError { .. }
            | LendingError::IoError(_)
            | LendingError::SerializationError(_) => ErrorCategory::Storage,
            LendingError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LendingError::ValidationError { .. }
            | LendingError::NotFoundError { .. }
            | LendingError::AlreadyExistsError { .. }
            | LendingError::LoanNotFoundError { .. }
            | LendingError::InsufficientBalanceError { .. } => ErrorSeverity::Medium,
            LendingError::ParseError { .. } | LendingError::SerializationError(_) => {
                ErrorSeverity::High
            }
            LendingError::IoError(_) | LendingError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Every failure except broken storage or configuration can be retried
    /// by the caller with different input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LendingError::IoError(_) | LendingError::ConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LendingError::ValidationError { .. } => "Correct the highlighted field and try again",
            LendingError::NotFoundError { .. } => {
                "Check the client identifier or register the client first"
            }
            LendingError::AlreadyExistsError { .. } => {
                "Use a different identifier or load the existing client"
            }
            LendingError::LoanNotFoundError { .. } => {
                "Run `show` to list the loan numbers recorded for this client"
            }
            LendingError::InsufficientBalanceError { .. } => {
                "Pay an amount no larger than the remaining balance"
            }
            LendingError::ParseError { .. } => {
                "Inspect the client record file; it was edited or truncated outside this tool"
            }
            LendingError::IoError(_) => "Check that the records directory exists and is writable",
            LendingError::SerializationError(_) => "Retry without --json",
            LendingError::ConfigError { .. } => "Review the configuration file and CLI overrides",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LendingError::ValidationError { field, reason, .. } => {
                format!("The {} is not valid: {}", field, reason)
            }
            LendingError::NotFoundError { client_id } => {
                format!("Client '{}' was not found", client_id)
            }
            LendingError::InsufficientBalanceError { balance, .. } => format!(
                "The payment could not be applied, the remaining balance is only {:.2}",
                balance
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
