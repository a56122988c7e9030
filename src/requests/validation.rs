// Field rules for the request payload
//
// The rules themselves are declared on `TrainingDetails` with `validator`;
// this module maps the results onto per-field errors and picks which fields a
// given check cares about.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;
use validator::Validate;

use super::types::TrainingDetails;

pub const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TrainingDate,
    Location,
    Specialization,
    TraineeCount,
    Description,
    SupervisorId,
    ProgramManagerId,
    TrainerId,
}

impl Field {
    /// Fields of the training payload itself
    pub const PAYLOAD: [Field; 5] = [
        Field::TrainingDate,
        Field::Location,
        Field::Specialization,
        Field::TraineeCount,
        Field::Description,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::TrainingDate => "training_date",
            Field::Location => "location",
            Field::Specialization => "specialization",
            Field::TraineeCount => "trainee_count",
            Field::Description => "description",
            Field::SupervisorId => "supervisor_id",
            Field::ProgramManagerId => "program_manager_id",
            Field::TrainerId => "trainer_id",
        }
    }

    fn from_name(name: &str) -> Option<Field> {
        Field::PAYLOAD.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_messages(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn has_error_for(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A blank description counts as absent; otherwise it needs some substance
pub fn validate_description(description: &str) -> Result<(), validator::ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() || trimmed.chars().count() >= MIN_DESCRIPTION_LEN {
        return Ok(());
    }
    Err(validator::ValidationError::new("description_length")
        .with_message(Cow::Borrowed("Description must be at least 10 characters")))
}

/// Run every rule and flatten the failures, in field order
fn field_errors(details: &TrainingDetails) -> Vec<FieldError> {
    let Err(report) = details.validate() else {
        return Vec::new();
    };

    let mut errors: Vec<FieldError> = report
        .field_errors()
        .into_iter()
        .filter_map(|(name, failures)| {
            let field = Field::from_name(&name)?;
            // One message per field is enough
            let failure = failures.first()?;
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));
            Some(FieldError { field, message })
        })
        .collect();
    errors.sort_by_key(|e| e.field);
    errors
}

/// Validate only the listed fields
pub fn validate_fields(details: &TrainingDetails, fields: &[Field]) -> Result<(), ValidationError> {
    let errors: Vec<FieldError> = field_errors(details)
        .into_iter()
        .filter(|e| fields.contains(&e.field))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Validate the complete payload, as required before submitting
pub fn validate_details(details: &TrainingDetails) -> Result<(), ValidationError> {
    validate_fields(details, &Field::PAYLOAD)
}

/// Validate only the fields that have been filled in, for saving drafts
pub fn validate_partial(details: &TrainingDetails) -> Result<(), ValidationError> {
    let mut present = vec![Field::Description];
    if !details.location.trim().is_empty() {
        present.push(Field::Location);
    }
    if details.trainee_count.is_some() {
        present.push(Field::TraineeCount);
    }
    validate_fields(details, &present)
}
