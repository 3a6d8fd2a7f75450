use thiserror::Error;

/// Rule violations raised by the pure status engine.
///
/// Every variant carries enough context to render one human-readable
/// message; none of them is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("folio is {status}; items and payments can only be added while it is OPEN")]
    FolioClosed { status: String },

    #[error("idempotency key {key} was already used for a different payment")]
    DuplicatePayment { key: String },

    #[error("folio is already {status}")]
    AlreadyClosed { status: String },

    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
