//! Checks applied to a [`MovieDraft`] before it is sent to the store.

use std::fmt;

use crate::movie::MovieDraft;

pub const MIN_YEAR: u16 = 1890;
pub const MAX_YEAR: u16 = 2023;
pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{} is required", capitalize(field)),
        }
    }

    fn out_of_range(
        field: &'static str,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        Self {
            field,
            message: format!(
                "{} must be between from {min} to {max}",
                capitalize(field)
            ),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every problem found in one draft, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> =
            self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl MovieDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        let required = [
            ("title", &self.title),
            ("image", &self.image),
            ("type", &self.kind),
            ("video", &self.video),
            ("description", &self.description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::required(field));
            }
        }

        if self.release == 0 {
            errors.push(ValidationError::required("release"));
        } else if !(MIN_YEAR..=MAX_YEAR).contains(&self.release) {
            errors.push(ValidationError::out_of_range(
                "release", MIN_YEAR, MAX_YEAR,
            ));
        }

        if !self.rating.is_finite()
            || !(MIN_RATING..=MAX_RATING).contains(&self.rating)
        {
            errors.push(ValidationError::out_of_range(
                "rating", MIN_RATING, MAX_RATING,
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
