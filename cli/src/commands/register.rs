//! Registration commands

use anyhow::{bail, Result};
use clubhub_client::Client;
use clubhub_forms::schema::fields;
use clubhub_forms::{
    FieldErrors, FormInput, FormsError, NavigationContext, Notification, Presenter,
    RegistrationForm, SubmitOutcome,
};
use colored::Colorize;

use crate::{RegisterCommands, SchoolArgs};

/// Prints workflow side effects to the terminal
#[derive(Default)]
pub struct TerminalPresenter {
    pub next_route: Option<String>,
}

impl Presenter for TerminalPresenter {
    fn notify(&mut self, notification: Notification) {
        if notification.is_destructive() {
            eprintln!("{}", notification.title.red().bold());
            eprintln!("{}", notification.description);
        } else {
            println!("{}", notification.title.green().bold());
            println!("{}", notification.description);
        }
    }

    fn navigate(&mut self, route: &str) {
        println!("{} {}", "next:".dimmed(), route);
        self.next_route = Some(route.to_string());
    }

    fn show_field_errors(&mut self, errors: &FieldErrors) {
        for error in errors.iter() {
            eprintln!("  {} {}", format!("{}:", error.field).yellow(), error.message);
        }
    }
}

pub async fn handle(action: RegisterCommands, client: &Client) -> Result<()> {
    match action {
        RegisterCommands::School(args) => register_school(args, client).await,
    }
}

async fn register_school(args: SchoolArgs, client: &Client) -> Result<()> {
    let context = NavigationContext::new(args.group_id.clone());
    let input = school_input(args);

    let mut form = RegistrationForm::new(client.clone(), context);
    form.mount().await;
    if form.options().is_empty() {
        eprintln!("{}", "warning: no clubs available, continuing without club ids".yellow());
    }

    let mut presenter = TerminalPresenter::default();
    match form.submit(&input, &mut presenter).await {
        Ok(SubmitOutcome::Succeeded) => Ok(()),
        Ok(SubmitOutcome::Declined) => bail!("registration was not accepted by the server"),
        Ok(SubmitOutcome::Failed(e)) => Err(e.into()),
        Ok(SubmitOutcome::Discarded) => bail!("registration response was discarded"),
        Err(FormsError::Validation(errors)) => {
            bail!("{} field(s) need attention", errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn school_input(args: SchoolArgs) -> FormInput {
    let mut input = FormInput::new();
    input.set_choices(fields::CLUBS, args.clubs);

    let texts = [
        (fields::NO_OF_STUDENTS, args.students),
        (fields::TOTAL_CLASSES, args.total_classes),
        (fields::LIST_OF_CLASSES, args.classes),
        (fields::COORDINATOR, args.coordinator),
        (fields::PHONE_NUMBER, args.phone),
        (fields::REFERRAL_NAME, args.referral),
    ];
    for (field, value) in texts {
        if let Some(value) = value {
            input.set_text(field, value);
        }
    }
    input
}
