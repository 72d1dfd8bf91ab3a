//! ClubHub registration forms
//!
//! Client-side form workflow for school registration:
//!
//! - Declarative field schema with a pure validation function per field kind
//! - Option set (clubs) fetched once on mount
//! - Payload transformation from validated values plus navigation context
//! - Submit state machine with stale-response protection
//!
//! The UI is reached only through the [`Presenter`] trait, and the network
//! only through [`RegistrationApi`].

use thiserror::Error;

pub mod api;
pub mod domain;
pub mod options;
pub mod payload;
pub mod schema;

pub use api::RegistrationApi;
pub use domain::aggregates::{FormPhase, RegistrationForm, SubmitOutcome, SubmitTicket};
pub use domain::events::{FormEvent, Notification, NotificationVariant, Presenter, LOGIN_ROUTE};
pub use domain::value_objects::{FieldError, FieldErrors, FieldInput, FieldKind, FieldSpec, FieldValue};
pub use options::OptionSet;
pub use payload::{build_registration, parse_group_id, NavigationContext};
pub use schema::{school_registration_schema, FormInput, FormSchema, ValidatedForm};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("form is not ready to submit (currently {0:?})")]
    NotReady(FormPhase),

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("field `{0}` missing from validated input")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, FormsError>;
