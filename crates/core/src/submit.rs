use tracing::{info, warn};

use crate::defaults::DefaultsCatalog;
use crate::domain::request::QuoteRequest;
use crate::errors::SubmitError;
use crate::payload::build_payload;
use crate::service::QuoteImportService;
use crate::validate::validate_response;

/// User-facing phrase for transport-level failures. The diagnostics bundle
/// carries the real story for operators.
pub const COMMUNICATION_FAILURE_MESSAGE: &str =
    "A communication issue happened while generating the quote";

/// Submit one quote request: compose the payload, invoke `ImportQuote`, and
/// validate the acknowledgement against what was asked for. One invocation,
/// one outcome; no retries. Each call builds its own payload, so concurrent
/// submissions share nothing but the read-only defaults catalog.
pub async fn submit_quote(
    service: &dyn QuoteImportService,
    defaults: &DefaultsCatalog,
    request: &QuoteRequest,
) -> Result<u64, SubmitError> {
    let payload = build_payload(request, defaults);
    info!(
        event_name = "quote.submit.payload_built",
        payload_bytes = payload.as_xml().len(),
        effective_date = %request.effective_date(),
        "quote payload composed"
    );

    let exchange = match service.import_quote(&payload).await {
        Ok(exchange) => exchange,
        Err(failure) => {
            warn!(
                event_name = "quote.submit.transport_failed",
                error = %failure,
                "ImportQuote invocation failed"
            );
            let mut diagnostics = failure.trace.to_lines();
            diagnostics.push(failure.detail);
            return Err(SubmitError::Communication {
                message: COMMUNICATION_FAILURE_MESSAGE.to_string(),
                diagnostics,
            });
        }
    };

    match validate_response(&exchange, request.premium()) {
        Ok(quote_number) => {
            info!(event_name = "quote.submit.accepted", quote_number, "quote accepted by service");
            Ok(quote_number)
        }
        Err(error) => {
            warn!(
                event_name = "quote.submit.rejected",
                error = %error,
                "quote submission did not validate"
            );
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;
    use tokio::sync::Mutex;

    use crate::defaults::DefaultsCatalog;
    use crate::domain::request::QuoteRequest;
    use crate::domain::response::{ExchangeTrace, QuoteAcknowledgement, QuoteServiceResponse};
    use crate::errors::SubmitError;
    use crate::payload::QuotePayload;
    use crate::service::{InvokeFailure, QuoteImportService, ServiceExchange};

    use super::{submit_quote, COMMUNICATION_FAILURE_MESSAGE};

    struct ScriptedService {
        result: Mutex<Option<Result<ServiceExchange, InvokeFailure>>>,
        seen_payloads: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn replying(result: Result<ServiceExchange, InvokeFailure>) -> Self {
            Self { result: Mutex::new(Some(result)), seen_payloads: Mutex::new(Vec::new()) }
        }

        async fn seen_payloads(&self) -> Vec<String> {
            self.seen_payloads.lock().await.clone()
        }
    }

    #[async_trait]
    impl QuoteImportService for ScriptedService {
        async fn import_quote(
            &self,
            payload: &QuotePayload,
        ) -> Result<ServiceExchange, InvokeFailure> {
            self.seen_payloads.lock().await.push(payload.as_xml().to_string());
            self.result.lock().await.take().expect("service invoked more than once")
        }
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new(
            "Molly Terrier",
            "foo@bar.com",
            "888.555.1212",
            "123 Main St.",
            "Apt. D-22",
            "Foo",
            "TX",
            "01234",
            NaiveDate::from_ymd_opt(2019, 3, 5).expect("valid calendar date"),
            Decimal::from(1275),
        )
        .expect("request fixture should be valid")
    }

    fn clean_exchange() -> ServiceExchange {
        ServiceExchange {
            response: QuoteServiceResponse {
                errors: serde_json::Value::Null,
                quote: Some(QuoteAcknowledgement {
                    quote_number: Some(981),
                    total_premium: Some(json!("1275")),
                }),
            },
            trace: ExchangeTrace::default(),
        }
    }

    #[tokio::test]
    async fn happy_path_returns_the_quote_number() {
        let service = ScriptedService::replying(Ok(clean_exchange()));
        let defaults = DefaultsCatalog::standard();

        let quote_number = submit_quote(&service, &defaults, &request())
            .await
            .expect("submission should succeed");

        assert_eq!(quote_number, 981);
        let payloads = service.seen_payloads().await;
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].contains("Name_1=\"Molly Terrier\""));
    }

    #[tokio::test]
    async fn transport_failure_puts_the_error_description_last() {
        let service = ScriptedService::replying(Err(InvokeFailure {
            trace: ExchangeTrace {
                request: Some("<soap request>".to_string()),
                response_headers: None,
                response_body: None,
            },
            detail: "connection refused".to_string(),
        }));
        let defaults = DefaultsCatalog::standard();

        let error = submit_quote(&service, &defaults, &request())
            .await
            .expect_err("transport failure should surface");

        let SubmitError::Communication { message, diagnostics } = error else {
            panic!("expected a communication failure");
        };
        assert_eq!(message, COMMUNICATION_FAILURE_MESSAGE);
        assert_eq!(diagnostics, vec!["<soap request>", "connection refused"]);
    }

    #[tokio::test]
    async fn business_rejection_carries_the_service_messages() {
        let mut exchange = clean_exchange();
        exchange.response.errors = json!({ "string": ["Invalid ZIP", "No such agent"] });
        let service = ScriptedService::replying(Ok(exchange));
        let defaults = DefaultsCatalog::standard();

        let error = submit_quote(&service, &defaults, &request())
            .await
            .expect_err("business rejection should surface");

        assert_eq!(
            error,
            SubmitError::QuoteGeneration {
                errors: vec!["Invalid ZIP".to_string(), "No such agent".to_string()]
            }
        );
    }
}
