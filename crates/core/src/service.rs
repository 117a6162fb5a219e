use async_trait::async_trait;
use thiserror::Error;

use crate::domain::response::{ExchangeTrace, QuoteServiceResponse};
use crate::payload::QuotePayload;

/// One completed `ImportQuote` round trip: the decoded response plus the raw
/// exchange captures used for failure diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceExchange {
    pub response: QuoteServiceResponse,
    pub trace: ExchangeTrace,
}

/// A transport, protocol, or decode failure raised by the invoker. Carries
/// whatever raw exchange material was captured before the failure, plus a
/// description of the underlying error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("ImportQuote invocation failed: {detail}")]
pub struct InvokeFailure {
    pub trace: ExchangeTrace,
    pub detail: String,
}

/// Capability contract for the remote quoting service: send one composed
/// payload through the `ImportQuote` operation and return the structured
/// result. The implementation owns connection handling, the 10-second
/// connection timeout, compression, and exchange tracing; the core only
/// configures them.
#[async_trait]
pub trait QuoteImportService: Send + Sync {
    async fn import_quote(&self, payload: &QuotePayload) -> Result<ServiceExchange, InvokeFailure>;
}
