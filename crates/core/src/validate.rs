use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::response::{decimal_from_value, normalize_errors};
use crate::errors::SubmitError;
use crate::service::ServiceExchange;

/// Operator-facing message when the response carries no usable quote number.
pub const MISSING_QUOTE_NUMBER_MESSAGE: &str = "Odd! The generated quote has no quote number!";

/// Operator-facing message when the acknowledged premium disagrees with the
/// requested one.
pub const PREMIUM_MISMATCH_MESSAGE: &str =
    "Very Odd! The generated quote does not agree with the price we asked!";

/// Inspect a service response against the originally requested premium.
/// Three sequential checks; the first failing check decides the outcome:
///
/// 1. a non-empty (normalized) error list is a business rejection;
/// 2. a missing, zero, or negative quote number means the exchange cannot be
///    trusted;
/// 3. an acknowledged premium that does not equal the requested one, under
///    decimal equality, likewise.
pub fn validate_response(
    exchange: &ServiceExchange,
    requested_premium: Decimal,
) -> Result<u64, SubmitError> {
    let errors = normalize_errors(&exchange.response.errors);
    if !errors.is_empty() {
        return Err(SubmitError::QuoteGeneration { errors });
    }

    let quote = exchange.response.quote.as_ref();
    let quote_number = quote.and_then(|info| info.quote_number).filter(|number| *number >= 1);
    let Some(quote_number) = quote_number else {
        return Err(SubmitError::Communication {
            message: MISSING_QUOTE_NUMBER_MESSAGE.to_string(),
            diagnostics: exchange.trace.to_lines(),
        });
    };

    let acknowledged_raw = quote.and_then(|info| info.total_premium.as_ref());
    let acknowledged = acknowledged_raw.and_then(decimal_from_value);
    if acknowledged != Some(requested_premium) {
        let mut diagnostics = vec![
            format!("What we asked for: {requested_premium}"),
            format!("What we got back: {}", premium_display(acknowledged_raw)),
        ];
        diagnostics.extend(exchange.trace.to_lines());
        return Err(SubmitError::Communication {
            message: PREMIUM_MISMATCH_MESSAGE.to_string(),
            diagnostics,
        });
    }

    Ok(quote_number as u64)
}

/// The acknowledged premium exactly as the service sent it, for diagnostics.
fn premium_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use crate::domain::response::{ExchangeTrace, QuoteAcknowledgement, QuoteServiceResponse};
    use crate::errors::SubmitError;
    use crate::service::ServiceExchange;

    use super::{validate_response, MISSING_QUOTE_NUMBER_MESSAGE, PREMIUM_MISMATCH_MESSAGE};

    fn exchange(errors: Value, quote: Option<QuoteAcknowledgement>) -> ServiceExchange {
        ServiceExchange {
            response: QuoteServiceResponse { errors, quote },
            trace: ExchangeTrace {
                request: Some("<request/>".to_string()),
                response_headers: Some("HTTP/1.1 200 OK".to_string()),
                response_body: Some("<response/>".to_string()),
            },
        }
    }

    fn acknowledgement(number: i64, premium: Value) -> QuoteAcknowledgement {
        QuoteAcknowledgement { quote_number: Some(number), total_premium: Some(premium) }
    }

    #[test]
    fn clean_response_yields_the_quote_number() {
        let exchange = exchange(Value::Null, Some(acknowledgement(42, json!("1275"))));

        let quote_number = validate_response(&exchange, Decimal::from(1275))
            .expect("clean response should validate");
        assert_eq!(quote_number, 42);
    }

    #[test]
    fn bare_string_error_becomes_single_element_rejection() {
        let exchange = exchange(json!("Invalid ZIP"), Some(acknowledgement(42, json!("1275"))));

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("error list should short-circuit");
        assert_eq!(
            error,
            SubmitError::QuoteGeneration { errors: vec!["Invalid ZIP".to_string()] }
        );
    }

    #[test]
    fn error_list_is_preserved_in_order() {
        let exchange =
            exchange(json!({ "string": ["A", "B"] }), Some(acknowledgement(42, json!("1275"))));

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("error list should short-circuit");
        assert_eq!(
            error,
            SubmitError::QuoteGeneration { errors: vec!["A".to_string(), "B".to_string()] }
        );
    }

    #[test]
    fn zero_quote_number_is_a_communication_failure() {
        let exchange = exchange(Value::Null, Some(acknowledgement(0, json!("1275"))));

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("zero quote number should fail");
        let SubmitError::Communication { message, diagnostics } = error else {
            panic!("expected a communication failure");
        };
        assert_eq!(message, MISSING_QUOTE_NUMBER_MESSAGE);
        assert_eq!(diagnostics, vec!["<request/>", "HTTP/1.1 200 OK", "<response/>"]);
    }

    #[test]
    fn absent_quote_information_is_a_communication_failure() {
        let exchange = exchange(Value::Null, None);

        let error =
            validate_response(&exchange, Decimal::from(1275)).expect_err("no quote info block");
        assert!(matches!(
            error,
            SubmitError::Communication { ref message, .. } if message == MISSING_QUOTE_NUMBER_MESSAGE
        ));
    }

    #[test]
    fn premium_mismatch_reports_both_values() {
        let exchange = exchange(Value::Null, Some(acknowledgement(42, json!("1275.01"))));

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("premium mismatch should fail");
        let SubmitError::Communication { message, diagnostics } = error else {
            panic!("expected a communication failure");
        };
        assert_eq!(message, PREMIUM_MISMATCH_MESSAGE);
        assert_eq!(diagnostics[0], "What we asked for: 1275");
        assert_eq!(diagnostics[1], "What we got back: 1275.01");
        assert_eq!(&diagnostics[2..], ["<request/>", "HTTP/1.1 200 OK", "<response/>"]);
    }

    #[test]
    fn trailing_zeroes_do_not_break_premium_agreement() {
        let exchange = exchange(Value::Null, Some(acknowledgement(42, json!("1275.00"))));

        let quote_number = validate_response(&exchange, Decimal::from(1275))
            .expect("1275.00 should equal 1275");
        assert_eq!(quote_number, 42);
    }

    #[test]
    fn numeric_premium_acknowledgement_is_accepted() {
        let exchange = exchange(Value::Null, Some(acknowledgement(42, json!(1275))));

        validate_response(&exchange, Decimal::from(1275))
            .expect("number-typed premium should compare equal");
    }

    #[test]
    fn missing_premium_acknowledgement_is_a_mismatch() {
        let exchange = exchange(
            Value::Null,
            Some(QuoteAcknowledgement { quote_number: Some(42), total_premium: None }),
        );

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("absent premium acknowledgement cannot agree");
        assert!(matches!(
            error,
            SubmitError::Communication { ref message, .. } if message == PREMIUM_MISMATCH_MESSAGE
        ));
    }

    #[test]
    fn error_check_wins_over_missing_quote_number() {
        let exchange = exchange(json!("Invalid ZIP"), None);

        let error = validate_response(&exchange, Decimal::from(1275))
            .expect_err("business rejection should win");
        assert!(matches!(error, SubmitError::QuoteGeneration { .. }));
    }
}
