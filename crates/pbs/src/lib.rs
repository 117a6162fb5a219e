//! PBS quoting service integration - the `ImportQuote` SOAP adapter
//!
//! This crate owns the wire exchange with the PBS-style quoting service:
//! - **Envelope** (`envelope`) - SOAP 1.1 request construction for `ImportQuote`
//! - **Decode** (`decode`) - response envelope extraction into core types
//! - **Client** (`client`) - `reqwest`-backed implementation of the core's
//!   `QuoteImportService` capability
//!
//! # Failure contract
//!
//! Every transport, protocol, or decode failure surfaces as an
//! `InvokeFailure` carrying whatever raw exchange material was captured
//! before things went wrong, so operators always get the last request and
//! response alongside the underlying error description.

pub mod client;
pub mod decode;
pub mod envelope;

pub use client::{ClientBuildError, PbsQuoteClient};
