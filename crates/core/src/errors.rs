use rust_decimal::Decimal;
use thiserror::Error;

/// Invariant violations on caller-supplied request data. These are rejected
/// at construction, before any payload exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("required field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("premium must not be negative (got {0})")]
    NegativePremium(Decimal),
}

/// Terminal failure kinds for one quote submission. There are exactly two:
/// either the remote exchange itself cannot be trusted, or the service
/// understood the request and rejected it on business grounds. No retry
/// state exists; one invocation, one outcome.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Network/protocol error, missing quote number, or premium
    /// disagreement. `message` is a short phrase fit for an end customer;
    /// `diagnostics` is raw exchange material reserved for operator logs.
    #[error("{message}")]
    Communication { message: String, diagnostics: Vec<String> },
    /// The service's own business-rule explanations, in the order the
    /// service reported them. Safe to display as-is.
    #[error("the quoting service rejected the request")]
    QuoteGeneration { errors: Vec<String> },
}

impl SubmitError {
    /// Lines that are safe to show to an end customer. Diagnostics never
    /// appear here.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Self::Communication { message, .. } => vec![message.clone()],
            Self::QuoteGeneration { errors } => errors.clone(),
        }
    }
}
