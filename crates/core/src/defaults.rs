use std::collections::BTreeMap;

/// Fixed policy/agent/carrier attributes the quoting service requires but
/// the caller never supplies. Immutable once constructed and shared freely;
/// the payload builder consumes every entry exactly once per build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultsCatalog {
    entries: BTreeMap<String, String>,
}

impl DefaultsCatalog {
    /// The attribute set for the PBS demo portfolio.
    pub fn standard() -> Self {
        // TODO: replace the placeholder agent name, carrier name, and policy
        // number once the carrier assigns real values.
        Self::from_entries([
            ("Quoting_For", "G00119"),
            ("Carrier_Code", "C00006"),
            ("GA_code", "G00119"),
            ("Agent_Code", "A00191"),
            ("Coverage_Code", "LIAB CYBER"),
            ("Quote_Profile", "Commercial"),
            ("Country", "USA"),
            ("Earned_Taxes_Fees", "0"),
            ("Financed_Taxes_Fees", "0"),
            ("Policy_Term", "12"),
            ("Agent_Name", "Anonymous Agent"),
            ("Carrier_Name", "Carrier Name Here"),
            ("Policy_Number", "999999"),
        ])
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Entries in attribute-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) fn draw(&self) -> CatalogDraw {
        CatalogDraw { remaining: self.entries.clone() }
    }
}

/// One-shot consuming view over the catalog. Taking an attribute that is not
/// present, or finishing with attributes left over, means the catalog and
/// the builder's consumption lists have drifted apart. That is a programming
/// error, never a caller-facing outcome, so both paths panic.
pub(crate) struct CatalogDraw {
    remaining: BTreeMap<String, String>,
}

impl CatalogDraw {
    pub(crate) fn take(&mut self, name: &str) -> String {
        match self.remaining.remove(name) {
            Some(value) => value,
            None => panic!("defaults catalog has no attribute `{name}`"),
        }
    }

    pub(crate) fn finish(self) {
        if !self.remaining.is_empty() {
            let leftover: Vec<&str> = self.remaining.keys().map(String::as_str).collect();
            panic!("defaults catalog attributes were never consumed: {}", leftover.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DefaultsCatalog;

    #[test]
    fn standard_catalog_carries_thirteen_attributes() {
        let catalog = DefaultsCatalog::standard();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.get("Coverage_Code"), Some("LIAB CYBER"));
        assert_eq!(catalog.get("Policy_Term"), Some("12"));
    }

    #[test]
    fn draw_consumes_to_exhaustion() {
        let catalog = DefaultsCatalog::from_entries([("A", "1"), ("B", "2")]);
        let mut draw = catalog.draw();
        assert_eq!(draw.take("A"), "1");
        assert_eq!(draw.take("B"), "2");
        draw.finish();
    }

    #[test]
    #[should_panic(expected = "never consumed")]
    fn finishing_with_leftovers_panics() {
        let catalog = DefaultsCatalog::from_entries([("A", "1"), ("B", "2")]);
        let mut draw = catalog.draw();
        let _ = draw.take("A");
        draw.finish();
    }

    #[test]
    #[should_panic(expected = "no attribute")]
    fn taking_an_unknown_attribute_panics() {
        let catalog = DefaultsCatalog::from_entries([("A", "1")]);
        let mut draw = catalog.draw();
        let _ = draw.take("Missing");
    }
}
