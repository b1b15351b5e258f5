use email_address::EmailAddress;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending request field
    #[schema(example = "email")]
    pub field: String,

    /// Human-readable reason
    #[schema(example = "Invalid email format")]
    pub message: String,
}

/// Every field-level problem found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Validation failed: {}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

pub const EMAIL_MAX_CHARS: usize = 255;

/// Trims and lowercases an email, recording a violation when it is unusable.
pub fn normalize_email(raw: &str, errors: &mut ValidationErrors) -> String {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        errors.add("email", "This field is required");
    } else if email.chars().count() > EMAIL_MAX_CHARS {
        errors.add(
            "email",
            format!("Value is too long (maximum {} characters)", EMAIL_MAX_CHARS),
        );
    } else if !EmailAddress::is_valid(&email) {
        errors.add("email", "Invalid email format");
    }

    email
}
