use rust_decimal::Decimal;
use serde_json::Value;

/// Raw captures of the most recent wire exchange, kept so transport and
/// validation failures can hand operators the full story. Captures that were
/// never taken (tracing disabled, or the failure happened before a response
/// arrived) stay `None` and are omitted from diagnostics rather than
/// rendered as placeholders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeTrace {
    pub request: Option<String>,
    pub response_headers: Option<String>,
    pub response_body: Option<String>,
}

impl ExchangeTrace {
    /// Diagnostics lines in wire order: request, response headers, response
    /// body.
    pub fn to_lines(&self) -> Vec<String> {
        [&self.request, &self.response_headers, &self.response_body]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

/// Structured result of one `ImportQuote` call, decoded by the transport but
/// deliberately loose where the service itself is loose: the error field
/// arrives as null, a bare scalar, a list of scalars, or a single-key
/// container wrapping either shape. [`normalize_errors`] is the only place
/// that ambiguity is resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteServiceResponse {
    pub errors: Value,
    pub quote: Option<QuoteAcknowledgement>,
}

/// The quote information block of a response, when the service returned one.
/// `total_premium` keeps the service's own representation (string or number)
/// until the premium-agreement check parses it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteAcknowledgement {
    pub quote_number: Option<i64>,
    pub total_premium: Option<Value>,
}

/// Collapse the service's loosely shaped error field into an ordered list of
/// non-empty messages.
pub fn normalize_errors(field: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    collect_error_messages(field, &mut messages);
    messages
}

fn collect_error_messages(value: &Value, into: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                into.push(trimmed.to_string());
            }
        }
        Value::Number(number) => into.push(number.to_string()),
        Value::Bool(flag) => into.push(flag.to_string()),
        Value::Array(items) => {
            for item in items {
                collect_error_messages(item, into);
            }
        }
        Value::Object(fields) => {
            for nested in fields.values() {
                collect_error_messages(nested, into);
            }
        }
    }
}

/// Parse a premium acknowledgement, which the service returns as either a
/// numeric or a string value, into a decimal for exact comparison.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(text) => text.trim().parse::<Decimal>().ok(),
        Value::Number(number) => number.to_string().parse::<Decimal>().ok(),
        _ => None,
    }
}
