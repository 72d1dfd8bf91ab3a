//! Form events and the presenter seam
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FieldErrors;

/// Where a successful registration sends the user
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// A toast shown to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn account_created() -> Self {
        Self {
            variant: NotificationVariant::Default,
            title: "Account created.".to_string(),
            description: "We've created your account for you.".to_string(),
        }
    }

    pub fn submit_failed() -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            title: "Oops,Something went wrong !".to_string(),
            description: "Please try again...".to_string(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// UI side effects of the workflow
pub trait Presenter {
    fn notify(&mut self, notification: Notification);
    fn navigate(&mut self, route: &str);
    fn show_field_errors(&mut self, errors: &FieldErrors);
}

/// Recorded transitions, drained with `take_events`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    OptionsLoaded { count: usize },
    OptionsDegraded { reason: String },
    SubmitBlocked { failures: usize },
    SubmitStarted { generation: u64 },
    Registered { generation: u64 },
    Declined { generation: u64 },
    SubmitFailed { generation: u64, reason: String },
    StaleResponseDiscarded { generation: u64 },
}
