use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::debug;

use quotewire_core::config::{HttpConfig, ServiceConfig};
use quotewire_core::{
    ExchangeTrace, InvokeFailure, QuoteImportService, QuotePayload, ServiceExchange,
};

use crate::decode::decode_import_quote_response;
use crate::envelope::{import_quote_envelope, IMPORT_QUOTE_ACTION};

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("failed to construct HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

/// `reqwest`-backed invoker for the PBS `ImportQuote` operation. One client
/// can serve any number of submissions; each call builds its own envelope
/// and trace.
pub struct PbsQuoteClient {
    http: reqwest::Client,
    endpoint_url: String,
    username: SecretString,
    password: SecretString,
    trace_exchanges: bool,
}

impl PbsQuoteClient {
    /// Build the client from process configuration: the connection timeout
    /// and compression flags are enforced here, on the transport, not in the
    /// submission workflow.
    pub fn from_config(
        service: &ServiceConfig,
        http: &HttpConfig,
    ) -> Result<Self, ClientBuildError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .gzip(http.compression)
            .build()
            .map_err(ClientBuildError::Http)?;

        Ok(Self {
            http: client,
            endpoint_url: service.endpoint_url.clone(),
            username: service.username.clone(),
            password: service.password.clone(),
            trace_exchanges: http.trace,
        })
    }
}

#[async_trait]
impl QuoteImportService for PbsQuoteClient {
    async fn import_quote(&self, payload: &QuotePayload) -> Result<ServiceExchange, InvokeFailure> {
        let envelope = import_quote_envelope(
            self.username.expose_secret(),
            self.password.expose_secret(),
            payload.as_xml(),
        );

        let mut trace = ExchangeTrace::default();
        if self.trace_exchanges {
            trace.request = Some(envelope.clone());
        }

        debug!(
            event_name = "pbs.import_quote.request_sent",
            endpoint = %self.endpoint_url,
            body_bytes = envelope.len(),
            "sending ImportQuote request"
        );

        let response = self
            .http
            .post(&self.endpoint_url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", IMPORT_QUOTE_ACTION)
            .body(envelope)
            .send()
            .await
            .map_err(|error| InvokeFailure { trace: trace.clone(), detail: error.to_string() })?;

        let status = response.status();
        if self.trace_exchanges {
            trace.response_headers = Some(render_headers(status, response.headers()));
        }

        let body = response
            .text()
            .await
            .map_err(|error| InvokeFailure { trace: trace.clone(), detail: error.to_string() })?;
        if self.trace_exchanges {
            trace.response_body = Some(body.clone());
        }

        if !status.is_success() {
            return Err(InvokeFailure {
                trace,
                detail: format!("service answered with HTTP status {status}"),
            });
        }

        debug!(
            event_name = "pbs.import_quote.response_received",
            status = %status,
            body_bytes = body.len(),
            "received ImportQuote response"
        );

        let decoded = decode_import_quote_response(&body)
            .map_err(|error| InvokeFailure { trace: trace.clone(), detail: error.to_string() })?;

        Ok(ServiceExchange { response: decoded, trace })
    }
}

fn render_headers(status: reqwest::StatusCode, headers: &HeaderMap) -> String {
    let mut rendered = format!("HTTP/1.1 {status}");
    for (name, value) in headers {
        rendered.push('\n');
        rendered.push_str(name.as_str());
        rendered.push_str(": ");
        rendered.push_str(value.to_str().unwrap_or("<non-ascii header value>"));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use reqwest::StatusCode;

    use quotewire_core::config::{HttpConfig, ServiceConfig};

    use super::{render_headers, PbsQuoteClient};

    #[test]
    fn renders_status_line_and_headers_in_order() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml; charset=utf-8"));
        headers.insert("content-encoding", HeaderValue::from_static("gzip"));

        let rendered = render_headers(StatusCode::OK, &headers);

        assert!(rendered.starts_with("HTTP/1.1 200 OK"));
        assert!(rendered.contains("content-type: text/xml; charset=utf-8"));
        assert!(rendered.contains("content-encoding: gzip"));
    }

    #[test]
    fn builds_from_configuration() {
        let service = ServiceConfig {
            endpoint_url: "https://demo.pbs.first-quotes.com/ExternalServices/PBSWebService.asmx"
                .to_string(),
            username: String::from("user").into(),
            password: String::from("pass").into(),
        };
        let http = HttpConfig { connect_timeout_secs: 10, compression: true, trace: true };

        PbsQuoteClient::from_config(&service, &http).expect("client should build");
    }
}
