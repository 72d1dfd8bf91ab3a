//! Turning validated values into the registration payload

use clubhub_client::SchoolRegistration;
use tracing::warn;
use url::Url;

use crate::options::OptionSet;
use crate::schema::{fields, ValidatedForm};
use crate::{FormsError, Result};

/// Ambient state taken from where the user navigated from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationContext {
    group_id: Option<String>,
}

impl NavigationContext {
    pub fn new(group_id: Option<String>) -> Self {
        Self { group_id }
    }

    /// Read `group_id` from the page URL's query string
    pub fn from_url(url: &Url) -> Self {
        let group_id = url
            .query_pairs()
            .find(|(key, _)| key == "group_id")
            .map(|(_, value)| value.into_owned());
        Self { group_id }
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits.
/// Trailing junk is ignored, so `"42abc"` gives 42. No digits gives `None`.
pub fn parse_group_id(raw: Option<&str>) -> Option<i64> {
    let text = raw?.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Build the request body for one submit attempt.
///
/// A missing or unparsable group id does not stop the build; the payload
/// carries `null` for it.
pub fn build_registration(
    form: &ValidatedForm,
    options: &OptionSet,
    context: &NavigationContext,
) -> Result<SchoolRegistration> {
    let selected = form
        .choices(fields::CLUBS)
        .ok_or_else(|| FormsError::MissingField(fields::CLUBS.to_string()))?;
    let clubs = options
        .resolve(selected)
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let group_id = parse_group_id(context.group_id());
    if group_id.is_none() {
        warn!(raw = ?context.group_id(), "group id missing or not numeric, sending null");
    }

    Ok(SchoolRegistration {
        group_id,
        clubs,
        list_of_classes: required_text(form, fields::LIST_OF_CLASSES)?.to_string(),
        no_of_students: required_integer(form, fields::NO_OF_STUDENTS)?,
        phone_number: required_integer(form, fields::PHONE_NUMBER)?,
    })
}

fn required_text<'a>(form: &'a ValidatedForm, field: &str) -> Result<&'a str> {
    form.text(field)
        .ok_or_else(|| FormsError::MissingField(field.to_string()))
}

fn required_integer(form: &ValidatedForm, field: &str) -> Result<i64> {
    form.integer(field)
        .ok_or_else(|| FormsError::MissingField(field.to_string()))
}
