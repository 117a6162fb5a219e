use quotewire_core::escape_xml;

/// SOAPAction header value for the `ImportQuote` operation.
pub const IMPORT_QUOTE_ACTION: &str = "http://tempuri.org/ImportQuote";

/// The service only accepts entity users under portfolio 900.
pub const USER_TYPE: &str = "Entity";
pub const PORTFOLIO_CODE: &str = "900";

/// Render the SOAP 1.1 request envelope for one `ImportQuote` call: the
/// authentication/context block plus the quote-import request block with the
/// payload document embedded as an escaped string field.
pub fn import_quote_envelope(username: &str, password: &str, payload_xml: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"",
            " xmlns=\"http://tempuri.org/\">\n",
            "  <soap:Body>\n",
            "    <ImportQuote>\n",
            "      <authInfo>\n",
            "        <UserName>{username}</UserName>\n",
            "        <UserPassword>{password}</UserPassword>\n",
            "        <UserType>{user_type}</UserType>\n",
            "        <PortfolioCode>{portfolio_code}</PortfolioCode>\n",
            "      </authInfo>\n",
            "      <qiRequest>\n",
            "        <XmlQuoteImport>{payload}</XmlQuoteImport>\n",
            "        <Options>\n",
            "          <ReturnQuoteInfo>true</ReturnQuoteInfo>\n",
            "          <ReturnPFA>false</ReturnPFA>\n",
            "        </Options>\n",
            "      </qiRequest>\n",
            "    </ImportQuote>\n",
            "  </soap:Body>\n",
            "</soap:Envelope>\n",
        ),
        username = escape_xml(username),
        password = escape_xml(password),
        user_type = USER_TYPE,
        portfolio_code = PORTFOLIO_CODE,
        payload = escape_xml(payload_xml),
    )
}
