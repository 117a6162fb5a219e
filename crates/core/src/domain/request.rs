use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::DomainError;

/// Caller-supplied data for one quote submission. Constructed through
/// [`QuoteRequest::new`] so the field invariants hold for the lifetime of
/// the value: required fields are non-empty, the effective date is a real
/// calendar date, and the premium is non-negative. The second address line
/// is the only optional field; an empty string means "none".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteRequest {
    name: String,
    email: String,
    phone: String,
    address_one: String,
    address_two: String,
    city: String,
    state: String,
    zip: String,
    effective_date: NaiveDate,
    premium: Decimal,
}

impl QuoteRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address_one: impl Into<String>,
        address_two: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        effective_date: NaiveDate,
        premium: Decimal,
    ) -> Result<Self, DomainError> {
        let request = Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address_one: address_one.into(),
            address_two: address_two.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
            effective_date,
            premium,
        };

        require_non_empty("name", &request.name)?;
        require_non_empty("email", &request.email)?;
        require_non_empty("phone", &request.phone)?;
        require_non_empty("address_one", &request.address_one)?;
        require_non_empty("city", &request.city)?;
        require_non_empty("state", &request.state)?;
        require_non_empty("zip", &request.zip)?;
        if request.premium.is_sign_negative() && !request.premium.is_zero() {
            return Err(DomainError::NegativePremium(request.premium));
        }

        Ok(request)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address_one(&self) -> &str {
        &self.address_one
    }

    /// Empty when the caller has no second address line.
    pub fn address_two(&self) -> &str {
        &self.address_two
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn premium(&self) -> Decimal {
        self.premium
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(())
}
