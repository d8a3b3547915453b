// Standalone sales-capture form with synchronous field validation
//
// Unlike the chat-embedded guided flow, this form validates before submit.

use crate::error::ChatError;
use regex::Regex;
use serde::Serialize;

/// Validated contact details produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesLead {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Field-level validation errors, one slot per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Sales contact form. Inputs are held as raw drafts; `validate` fills the
/// per-field error slots and `submit` only succeeds when all of them clear.
#[derive(Debug, Clone, Default)]
pub struct SalesForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    errors: FieldErrors,
}

impl SalesForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn email_is_valid(email: &str) -> bool {
        let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
        re.is_match(email)
    }

    fn phone_is_valid(phone: &str) -> bool {
        // UK formats: +44 7XXX XXX XXX, 07XXX XXX XXX, 07XXX-XXX-XXX
        let re = Regex::new(r"^(\+44\s?7|07)[0-9]{3}(\s|-)?[0-9]{3}(\s|-)?[0-9]{3}$").unwrap();
        re.is_match(phone.trim())
    }

    /// Re-run all field checks, updating the error slots. Returns true when
    /// every field passes.
    pub fn validate(&mut self) -> bool {
        self.errors.name = if self.name.trim().is_empty() {
            Some("Name is required")
        } else {
            None
        };

        self.errors.email = if self.email.trim().is_empty() {
            Some("Email is required")
        } else if !Self::email_is_valid(&self.email) {
            Some("Please enter a valid email address")
        } else {
            None
        };

        self.errors.phone = if self.phone.trim().is_empty() {
            Some("Phone number is required")
        } else if !Self::phone_is_valid(&self.phone) {
            Some("Please enter a valid UK mobile number")
        } else {
            None
        };

        self.errors.is_empty()
    }

    /// Validate and produce the lead. Submission is blocked while any field
    /// error remains.
    pub fn submit(&mut self) -> Result<SalesLead, ChatError> {
        if !self.validate() {
            let first = self
                .errors
                .name
                .or(self.errors.email)
                .or(self.errors.phone)
                .unwrap_or("invalid form");
            return Err(ChatError::Validation(first.to_string()));
        }
        Ok(SalesLead {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        })
    }
}
