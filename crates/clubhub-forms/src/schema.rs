//! Field schema and the validation pipeline

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FieldErrors, FieldInput, FieldKind, FieldSpec, FieldValue};

/// Field names used by the school registration form
pub mod fields {
    pub const CLUBS: &str = "value";
    pub const NO_OF_STUDENTS: &str = "no_of_students";
    pub const TOTAL_CLASSES: &str = "total_classes";
    pub const LIST_OF_CLASSES: &str = "list_of_classes";
    pub const COORDINATOR: &str = "your_coordinator";
    pub const PHONE_NUMBER: &str = "phoneNUmber";
    pub const REFERRAL_NAME: &str = "referral_name";
}

/// Ordered set of named fields
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. A field with the same name is replaced in place.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Run every field's rule. Either all pass or every failure is reported.
    pub fn validate(&self, input: &FormInput) -> Result<ValidatedForm, FieldErrors> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut errors = FieldErrors::default();

        for spec in &self.fields {
            match spec.kind.validate(input.get(&spec.name)) {
                Ok(value) => values.push((spec.name.clone(), value)),
                Err(message) => errors.push(spec.name.clone(), message),
            }
        }

        if errors.is_empty() {
            Ok(ValidatedForm { values })
        } else {
            Err(errors)
        }
    }
}

/// The school registration form as the registration page presents it
pub fn school_registration_schema() -> FormSchema {
    let bounded_text = |min, max| FieldKind::Text {
        min_len: Some(min),
        max_len: max,
    };
    let any_integer = FieldKind::Integer {
        min: None,
        max: None,
    };

    FormSchema::new()
        .field(FieldSpec::new(
            fields::CLUBS,
            "List of clubs in your school",
            FieldKind::Choices {
                empty_message: "Please select at least one club".to_string(),
            },
        ))
        .field(FieldSpec::new(
            fields::NO_OF_STUDENTS,
            "Number of students this year",
            any_integer.clone(),
        ))
        .field(FieldSpec::new(
            fields::TOTAL_CLASSES,
            "Total number of classes",
            FieldKind::Integer {
                min: Some(1),
                max: Some(999),
            },
        ))
        .field(FieldSpec::new(
            fields::LIST_OF_CLASSES,
            "List of classes",
            bounded_text(3, Some(255)),
        ))
        .field(FieldSpec::new(
            fields::COORDINATOR,
            "Your coordinator",
            bounded_text(3, Some(255)),
        ))
        .field(FieldSpec::new(fields::PHONE_NUMBER, "Phone Number", any_integer))
        .field(FieldSpec::new(
            fields::REFERRAL_NAME,
            "Referral name",
            bounded_text(3, None),
        ))
}

/// Bound input state, keyed by field name
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormInput {
    values: HashMap<String, FieldInput>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values
            .insert(field.into(), FieldInput::Text(value.into()));
        self
    }

    pub fn set_choices<I, S>(&mut self, field: impl Into<String>, selected: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.insert(
            field.into(),
            FieldInput::Choices(selected.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldInput> {
        self.values.get(field)
    }
}

/// Values that passed the schema, in schema order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedForm {
    values: Vec<(String, FieldValue)>,
}

impl ValidatedForm {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.get(field) {
            Some(FieldValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn choices(&self, field: &str) -> Option<&[String]> {
        match self.get(field) {
            Some(FieldValue::Choices(selected)) => Some(selected),
            _ => None,
        }
    }
}
