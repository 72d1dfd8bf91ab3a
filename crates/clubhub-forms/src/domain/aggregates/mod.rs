//! Registration form aggregate
//!
//! Lifecycle: `Idle → Loading → Ready → Submitting → {Succeeded | Ready}`.
//! A failed or declined submit drops back to `Ready` so the user can retry.
use clubhub_client::{is_truthy, SchoolRegistration};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::api::RegistrationApi;
use crate::domain::events::{FormEvent, Notification, Presenter, LOGIN_ROUTE};
use crate::options::OptionSet;
use crate::payload::{build_registration, NavigationContext};
use crate::schema::{school_registration_schema, FormInput, FormSchema};
use crate::{FormsError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Submitting,
    Succeeded,
}

/// Proof of a started submit. Consumed by `complete_submit`.
#[derive(Debug)]
pub struct SubmitTicket {
    generation: u64,
    payload: SchoolRegistration,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn payload(&self) -> &SchoolRegistration {
        &self.payload
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Truthy answer; the user was sent to the login page
    Succeeded,
    /// Falsy answer without an error; nothing shown
    Declined,
    /// Transport or status failure; destructive toast shown
    Failed(clubhub_client::Error),
    /// The response belonged to an attempt that is no longer live
    Discarded,
}

pub struct RegistrationForm<A> {
    api: A,
    schema: FormSchema,
    options: OptionSet,
    context: NavigationContext,
    phase: FormPhase,
    generation: u64,
    events: Vec<FormEvent>,
}

impl<A: RegistrationApi> RegistrationForm<A> {
    pub fn new(api: A, context: NavigationContext) -> Self {
        Self::with_schema(api, school_registration_schema(), context)
    }

    pub fn with_schema(api: A, schema: FormSchema, context: NavigationContext) -> Self {
        Self {
            api,
            schema,
            options: OptionSet::empty(),
            context,
            phase: FormPhase::Idle,
            generation: 0,
            events: vec![],
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fetch the option set once. A fetch failure leaves the set empty and
    /// still reaches `Ready`.
    pub async fn mount(&mut self) {
        if self.phase != FormPhase::Idle {
            debug!(phase = ?self.phase, "form already mounted");
            return;
        }
        self.phase = FormPhase::Loading;

        match self.api.fetch_clubs().await {
            Ok(clubs) => {
                self.options = OptionSet::from_clubs(clubs);
                info!(count = self.options.len(), "club options loaded");
                self.events.push(FormEvent::OptionsLoaded {
                    count: self.options.len(),
                });
            }
            Err(e) => {
                warn!(error = %e, "error fetching clubs, continuing without options");
                self.options = OptionSet::empty();
                self.events.push(FormEvent::OptionsDegraded {
                    reason: e.to_string(),
                });
            }
        }

        self.phase = FormPhase::Ready;
    }

    /// Tear the form down. Any response still in flight becomes stale.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.phase = FormPhase::Idle;
        self.options = OptionSet::empty();
    }

    /// Validate, build the payload and enter `Submitting`.
    ///
    /// Invalid input is shown through the presenter and never leaves `Ready`.
    pub fn begin_submit(
        &mut self,
        input: &FormInput,
        presenter: &mut dyn Presenter,
    ) -> Result<SubmitTicket> {
        match self.phase {
            FormPhase::Ready => {}
            FormPhase::Submitting => return Err(FormsError::AlreadySubmitting),
            other => return Err(FormsError::NotReady(other)),
        }

        let form = match self.schema.validate(input) {
            Ok(form) => form,
            Err(errors) => {
                debug!(%errors, "submit blocked by validation");
                self.events.push(FormEvent::SubmitBlocked {
                    failures: errors.len(),
                });
                presenter.show_field_errors(&errors);
                return Err(FormsError::Validation(errors));
            }
        };
        let payload = build_registration(&form, &self.options, &self.context)?;

        self.generation += 1;
        self.phase = FormPhase::Submitting;
        self.events.push(FormEvent::SubmitStarted {
            generation: self.generation,
        });
        info!(generation = self.generation, "submitting school registration");

        Ok(SubmitTicket {
            generation: self.generation,
            payload,
        })
    }

    /// Apply the answer for `ticket`. Stale tickets have no side effects.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: clubhub_client::Result<Value>,
        presenter: &mut dyn Presenter,
    ) -> SubmitOutcome {
        let generation = ticket.generation;
        if generation != self.generation || self.phase != FormPhase::Submitting {
            debug!(generation, live = self.generation, "discarding stale submit response");
            self.events
                .push(FormEvent::StaleResponseDiscarded { generation });
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(answer) if is_truthy(&answer) => {
                self.phase = FormPhase::Succeeded;
                self.events.push(FormEvent::Registered { generation });
                info!(generation, "school registered");
                presenter.notify(Notification::account_created());
                presenter.navigate(LOGIN_ROUTE);
                SubmitOutcome::Succeeded
            }
            Ok(answer) => {
                self.phase = FormPhase::Ready;
                self.events.push(FormEvent::Declined { generation });
                debug!(generation, %answer, "registration answered with a falsy value");
                SubmitOutcome::Declined
            }
            Err(e) => {
                self.phase = FormPhase::Ready;
                error!(generation, error = %e, "school registration failed");
                self.events.push(FormEvent::SubmitFailed {
                    generation,
                    reason: e.to_string(),
                });
                presenter.notify(Notification::submit_failed());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// `begin_submit`, the network call, then `complete_submit`
    pub async fn submit(
        &mut self,
        input: &FormInput,
        presenter: &mut dyn Presenter,
    ) -> Result<SubmitOutcome> {
        let ticket = self.begin_submit(input, presenter)?;
        let result = self.api.register_school(ticket.payload()).await;
        Ok(self.complete_submit(ticket, result, presenter))
    }
}
