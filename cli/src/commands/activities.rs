//! Activity commands

use std::path::Path;

use anyhow::{Context, Result};
use clubhub_client::{BearerToken, Client};
use reqwest::multipart::{Form, Part};

use super::require_token;
use crate::{output::OutputFormat, ActivityCommands};

pub async fn handle(
    action: ActivityCommands,
    client: &Client,
    token: Option<&BearerToken>,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ActivityCommands::List => {
            let activities = client.activities().all(require_token(token)?).await?;
            format.print(&activities);
        }
        ActivityCommands::New { fields, files } => {
            let token = require_token(token)?;
            let form = build_form(fields, files).await?;
            let created = client.activities().create(form, token).await?;
            format.print(&created);
        }
    }
    Ok(())
}

async fn build_form(fields: Vec<(String, String)>, files: Vec<(String, String)>) -> Result<Form> {
    let mut form = Form::new();
    for (key, value) in fields {
        form = form.text(key, value);
    }
    for (key, path) in files {
        let content = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path))?;
        let mut part = Part::bytes(content);
        if let Some(name) = Path::new(&path).file_name().and_then(|n| n.to_str()) {
            part = part.file_name(name.to_string());
        }
        form = form.part(key, part);
    }
    Ok(form)
}
