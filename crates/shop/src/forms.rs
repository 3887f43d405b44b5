//! Checkout form draft and validation.
//!
//! The form layer populates a [`CheckoutForm`] with raw field values as
//! typed; [`CheckoutForm::validate`] turns it into a typed
//! [`CustomerDetails`] record or a list of per-field errors. The
//! submission pipeline only ever sees the typed record, decoupling the
//! core from any particular input surface.

use morelufs_core::{Email, Phone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::{DeliveryMethod, PaymentMethod};

/// Country pre-selected on the checkout form.
const DEFAULT_COUNTRY: &str = "Россия";

/// A checkout form field, for scoping validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Phone,
    Email,
    City,
    PostalCode,
    Address,
}

impl FormField {
    /// Stable field identifier matching the form markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::City => "city",
            Self::PostalCode => "postalCode",
            Self::Address => "address",
        }
    }
}

impl core::fmt::Display for FormField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-correctable, field-scoped validation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw checkout form state, persisted as the draft record between
/// sessions and cleared only after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub address: String,
    pub comments: String,
    pub delivery: DeliveryMethod,
    pub payment: PaymentMethod,
}

/// Validated customer record handed to the submission pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: Phone,
    pub email: Email,
    pub address: ShippingAddress,
    pub comments: String,
}

/// Structured shipping address.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingAddress {
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub street: String,
}

impl CheckoutForm {
    /// Validate every required field and build the typed customer
    /// record.
    ///
    /// All failing fields are reported at once so the form can show
    /// inline errors in a single pass. Values are trimmed before any
    /// check; the country falls back to the form's default when left
    /// blank (the country selector always carries a value in the UI).
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per invalid field.
    pub fn validate(&self) -> Result<CustomerDetails, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.full_name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(
                FormField::FullName,
                "Это поле обязательно для заполнения",
            ));
        }

        let phone = match Phone::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(_) => {
                errors.push(FieldError::new(
                    FormField::Phone,
                    "Введите корректный номер телефона",
                ));
                None
            }
        };

        let email = match Email::parse(self.email.trim()) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push(FieldError::new(FormField::Email, "Введите корректный email"));
                None
            }
        };

        let city = self.city.trim();
        if city.is_empty() {
            errors.push(FieldError::new(
                FormField::City,
                "Это поле обязательно для заполнения",
            ));
        }

        let postal_code = self.postal_code.trim();
        if postal_code.is_empty() {
            errors.push(FieldError::new(
                FormField::PostalCode,
                "Это поле обязательно для заполнения",
            ));
        }

        let street = self.address.trim();
        if street.is_empty() {
            errors.push(FieldError::new(
                FormField::Address,
                "Это поле обязательно для заполнения",
            ));
        }

        let (Some(phone), Some(email)) = (phone, email) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let country = match self.country.trim() {
            "" => DEFAULT_COUNTRY,
            other => other,
        };

        Ok(CustomerDetails {
            name: name.to_owned(),
            phone,
            email,
            address: ShippingAddress {
                country: country.to_owned(),
                city: city.to_owned(),
                postal_code: postal_code.to_owned(),
                street: street.to_owned(),
            },
            comments: self.comments.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Иван Петров".to_owned(),
            phone: "+7 (912) 345-67-89".to_owned(),
            email: "ivan@example.com".to_owned(),
            country: String::new(),
            city: "Москва".to_owned(),
            postal_code: "101000".to_owned(),
            address: "ул. Тверская, д. 1".to_owned(),
            comments: "  позвоните перед доставкой  ".to_owned(),
            delivery: DeliveryMethod::RussianPost,
            payment: PaymentMethod::Yookassa,
        }
    }

    #[test]
    fn test_valid_form_builds_details() {
        let details = filled_form().validate().unwrap();
        assert_eq!(details.name, "Иван Петров");
        assert_eq!(details.phone.as_str(), "+79123456789");
        assert_eq!(details.email.as_str(), "ivan@example.com");
        assert_eq!(details.address.country, "Россия");
        assert_eq!(details.comments, "позвоните перед доставкой");
    }

    #[test]
    fn test_whitespace_only_fields_rejected() {
        let mut form = filled_form();
        form.city = "   ".to_owned();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::City);
    }

    #[test]
    fn test_all_failing_fields_reported() {
        let form = CheckoutForm::default();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                FormField::FullName,
                FormField::Phone,
                FormField::Email,
                FormField::City,
                FormField::PostalCode,
                FormField::Address,
            ]
        );
    }

    #[test]
    fn test_bad_email_and_phone() {
        let mut form = filled_form();
        form.email = "not-an-email".to_owned();
        form.phone = "12345".to_owned();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, [FormField::Phone, FormField::Email]);
    }

    #[test]
    fn test_explicit_country_kept() {
        let mut form = filled_form();
        form.country = "Беларусь".to_owned();
        let details = form.validate().unwrap();
        assert_eq!(details.address.country, "Беларусь");
    }

    #[test]
    fn test_draft_serde_roundtrip() {
        let form = filled_form();
        let json = serde_json::to_string(&form).unwrap();
        let parsed: CheckoutForm = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, form);
    }
}
