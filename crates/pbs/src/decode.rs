use serde_json::Value;
use thiserror::Error;

use quotewire_core::{QuoteAcknowledgement, QuoteServiceResponse};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("service returned a SOAP fault: {0}")]
    Fault(String),
    #[error("response has no ImportQuoteResult element")]
    MissingResult,
}

/// Extract the `ImportQuoteResult` structure from a SOAP response body.
///
/// The extraction is namespace-agnostic and scoped to exactly the elements
/// the service is known to send; the error field keeps the service's own
/// shape (a `string` member holding one message or a list) so the core's
/// normalization remains the single place that ambiguity is resolved.
pub fn decode_import_quote_response(body: &str) -> Result<QuoteServiceResponse, DecodeError> {
    if let Some(fault) = element_text(body, "faultstring") {
        return Err(DecodeError::Fault(fault));
    }

    let result = element_block(body, "ImportQuoteResult").ok_or(DecodeError::MissingResult)?;

    let errors = decode_errors(result);
    let quote = element_block(result, "QuoteInformation").map(|block| QuoteAcknowledgement {
        quote_number: element_text(block, "QuoteNumber").and_then(|text| text.parse::<i64>().ok()),
        total_premium: element_text(block, "TotalPremium")
            .filter(|text| !text.is_empty())
            .map(Value::String),
    });

    Ok(QuoteServiceResponse { errors, quote })
}

fn decode_errors(result: &str) -> Value {
    let Some(block) = element_block(result, "Errors") else {
        return Value::Null;
    };

    let mut strings = element_texts(block, "string");
    if !strings.is_empty() {
        let member = if strings.len() == 1 {
            Value::String(strings.remove(0))
        } else {
            Value::Array(strings.into_iter().map(Value::String).collect())
        };
        let mut container = serde_json::Map::new();
        container.insert("string".to_string(), member);
        return Value::Object(container);
    }

    let bare = unescape_xml(block.trim());
    if bare.is_empty() {
        Value::Null
    } else {
        Value::String(bare)
    }
}

struct OpenTag {
    /// Byte offset just past the `>` of the opening tag.
    content_start: usize,
    self_closing: bool,
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

fn scan_open_tag(xml: &str, local: &str, from: usize) -> Option<OpenTag> {
    let bytes = xml.as_bytes();
    let mut cursor = from;

    while cursor < bytes.len() {
        let lt = xml[cursor..].find('<')? + cursor;
        let name_start = lt + 1;
        if matches!(bytes.get(name_start).copied(), Some(b'/') | Some(b'?') | Some(b'!')) {
            cursor = name_start + 1;
            continue;
        }

        let name_end = xml[name_start..]
            .find(|ch: char| ch.is_ascii_whitespace() || ch == '>' || ch == '/')
            .map(|offset| name_start + offset)?;
        let gt = xml[name_end..].find('>')? + name_end;

        if local_name(&xml[name_start..name_end]) == local {
            let self_closing = xml[..gt].ends_with('/');
            return Some(OpenTag { content_start: gt + 1, self_closing });
        }

        cursor = gt + 1;
    }

    None
}

fn scan_close_tag(xml: &str, local: &str, from: usize) -> Option<usize> {
    let mut cursor = from;

    while cursor < xml.len() {
        let lt = xml[cursor..].find("</")? + cursor;
        let name_start = lt + 2;
        let name_end = xml[name_start..]
            .find(|ch: char| ch.is_ascii_whitespace() || ch == '>')
            .map(|offset| name_start + offset)?;

        if local_name(&xml[name_start..name_end]) == local {
            return Some(lt);
        }

        cursor = name_end;
    }

    None
}

/// Inner content of the first element with the given local name, under any
/// namespace prefix. Self-closing elements yield an empty block.
fn element_block<'a>(xml: &'a str, local: &str) -> Option<&'a str> {
    let open = scan_open_tag(xml, local, 0)?;
    if open.self_closing {
        return Some("");
    }

    let close = scan_close_tag(xml, local, open.content_start)?;
    Some(&xml[open.content_start..close])
}

/// Unescaped trimmed text of the first matching element.
fn element_text(xml: &str, local: &str) -> Option<String> {
    element_block(xml, local).map(|block| unescape_xml(block.trim()))
}

/// Unescaped trimmed texts of every matching element, in document order.
fn element_texts(xml: &str, local: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut cursor = 0;

    while let Some(open) = scan_open_tag(xml, local, cursor) {
        if open.self_closing {
            texts.push(String::new());
            cursor = open.content_start;
            continue;
        }

        let Some(close) = scan_close_tag(xml, local, open.content_start) else {
            break;
        };
        texts.push(unescape_xml(xml[open.content_start..close].trim()));
        cursor = close + 1;
    }

    texts
}

fn unescape_xml(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        unescaped.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            unescaped.push_str(tail);
            return unescaped;
        };
        match &tail[..=semi] {
            "&amp;" => unescaped.push('&'),
            "&lt;" => unescaped.push('<'),
            "&gt;" => unescaped.push('>'),
            "&quot;" => unescaped.push('"'),
            "&apos;" => unescaped.push('\''),
            other => unescaped.push_str(other),
        }
        rest = &tail[semi + 1..];
    }

    unescaped.push_str(rest);
    unescaped
}
