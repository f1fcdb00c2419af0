//! Form validation for contact create/edit.
//!
//! Pure functions over raw form input; no backend calls. Errors are
//! keyed per field so the UI can render them inline, with at most one
//! message per field.

use std::collections::HashMap;

use chrono::NaiveDate;

/// Fields of the contact form that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Date,
    Image,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Date => "Last contact date",
            FormField::Image => "Image",
        }
    }
}

/// Per-field validation errors; the first error recorded for a field
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: HashMap<FormField, String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn record(&mut self, field: FormField, message: String) {
        self.errors.entry(field).or_insert(message);
    }
}

/// Parse a date in the form's wire format (`YYYY-MM-DD`, as produced
/// by `<input type="date">`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Builder collecting field errors
struct Validator {
    errors: FieldErrors,
}

impl Validator {
    fn new() -> Self {
        Self {
            errors: FieldErrors::default(),
        }
    }

    /// Add error if condition is true
    fn error_if(mut self, condition: bool, field: FormField, message: &str) -> Self {
        if condition {
            self.errors.record(field, message.to_string());
        }
        self
    }

    /// Validate required non-empty string
    fn required_string(mut self, value: &str, field: FormField) -> Self {
        if value.trim().is_empty() {
            self.errors
                .record(field, format!("{} is required", field.label()));
        }
        self
    }

    /// Validate required parseable date
    fn required_date(mut self, value: &str, field: FormField) -> Self {
        if value.trim().is_empty() {
            self.errors
                .record(field, format!("{} is required", field.label()));
        } else if parse_date(value).is_none() {
            self.errors
                .record(field, format!("{} must be a valid date", field.label()));
        }
        self
    }

    fn finish(self) -> FieldErrors {
        self.errors
    }
}

/// Validate the create form. An empty result means submission may
/// proceed.
pub fn validate_new_contact(name: &str, date: &str, has_image: bool) -> FieldErrors {
    Validator::new()
        .required_string(name, FormField::Name)
        .required_date(date, FormField::Date)
        .error_if(!has_image, FormField::Image, "An image is required")
        .finish()
}

/// Validate the edit form. The image is optional here; an edited
/// record always retains its existing image URL unless replaced.
pub fn validate_contact_edit(name: &str, date: &str) -> FieldErrors {
    Validator::new()
        .required_string(name, FormField::Name)
        .required_date(date, FormField::Date)
        .finish()
}
