pub mod config;
pub mod defaults;
pub mod domain;
pub mod errors;
pub mod payload;
pub mod service;
pub mod submit;
pub mod validate;

pub use defaults::DefaultsCatalog;
pub use domain::request::QuoteRequest;
pub use domain::response::{
    normalize_errors, ExchangeTrace, QuoteAcknowledgement, QuoteServiceResponse,
};
pub use errors::{DomainError, SubmitError};
pub use payload::{build_payload, escape_xml, QuotePayload};
pub use service::{InvokeFailure, QuoteImportService, ServiceExchange};
pub use submit::{submit_quote, COMMUNICATION_FAILURE_MESSAGE};
pub use validate::{validate_response, MISSING_QUOTE_NUMBER_MESSAGE, PREMIUM_MISMATCH_MESSAGE};
