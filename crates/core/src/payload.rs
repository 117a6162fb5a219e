use crate::defaults::DefaultsCatalog;
use crate::domain::request::QuoteRequest;

/// Attribute names moved from the defaults catalog into the customer block.
/// Together with [`POLICY_DEFAULT_ATTRIBUTES`] this list must partition the
/// catalog exactly; the builder panics otherwise.
pub const CUSTOMER_DEFAULT_ATTRIBUTES: [&str; 5] =
    ["Quoting_For", "Agent_Code", "Quote_Profile", "Country", "Agent_Name"];

/// Attribute names moved from the defaults catalog into the policy block.
pub const POLICY_DEFAULT_ATTRIBUTES: [&str; 8] = [
    "Policy_Number",
    "Policy_Term",
    "Coverage_Code",
    "Earned_Taxes_Fees",
    "Financed_Taxes_Fees",
    "Carrier_Code",
    "Carrier_Name",
    "GA_code",
];

/// The composed XML document sent to the quoting service. Attribute names
/// and element structure are a wire contract with the service and must be
/// reproduced verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuotePayload {
    xml: String,
}

impl QuotePayload {
    pub fn as_xml(&self) -> &str {
        &self.xml
    }

    pub fn into_xml(self) -> String {
        self.xml
    }
}

/// Compose the quote document from caller data and the defaults catalog.
/// Pure transformation; a fresh document per call, no shared state.
///
/// # Panics
///
/// Panics when the catalog and the consumption lists above have drifted out
/// of sync (an attribute is missing, or entries are left unconsumed).
pub fn build_payload(request: &QuoteRequest, defaults: &DefaultsCatalog) -> QuotePayload {
    let mut draw = defaults.draw();

    let mut customer: Vec<(&str, String)> = vec![
        ("Name_1", request.name().to_string()),
        ("Main_Phone", request.phone().to_string()),
        ("E-Mail", request.email().to_string()),
        ("Address_Line_1", request.address_one().to_string()),
    ];
    if !request.address_two().is_empty() {
        customer.push(("Address_Line_2", request.address_two().to_string()));
    }
    customer.push(("City", request.city().to_string()));
    customer.push(("Region", request.state().to_string()));
    customer.push(("Postal_Code", request.zip().to_string()));
    for name in CUSTOMER_DEFAULT_ATTRIBUTES {
        customer.push((name, draw.take(name)));
    }

    let mut policy: Vec<(&str, String)> = vec![
        ("Effective_Date", request.effective_date().format("%Y-%m-%d").to_string()),
        ("Premium", request.premium().to_string()),
    ];
    for name in POLICY_DEFAULT_ATTRIBUTES {
        policy.push((name, draw.take(name)));
    }

    draw.finish();

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<tq:QuoteInfo xmlns:tq=\"TemporaryQuote\">\n");
    xml.push_str("  <tq:CustomerInfo");
    for (name, value) in &customer {
        push_attribute(&mut xml, name, value);
    }
    xml.push_str("/>\n");
    xml.push_str("  <tq:PolicyInfo>\n");
    xml.push_str("    <tq:Policy_Count>1</tq:Policy_Count>\n");
    xml.push_str("    <tq:Policy");
    for (name, value) in &policy {
        push_attribute(&mut xml, name, value);
    }
    xml.push_str("/>\n");
    xml.push_str("  </tq:PolicyInfo>\n");
    xml.push_str("</tq:QuoteInfo>\n");

    QuotePayload { xml }
}

fn push_attribute(xml: &mut String, name: &str, value: &str) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(&escape_xml(value));
    xml.push('"');
}

/// Escape a value for use in XML attribute or element content.
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
