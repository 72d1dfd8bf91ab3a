//! User commands

use anyhow::Result;
use clubhub_client::{BearerToken, Client};

use super::require_token;
use crate::{output::OutputFormat, UserCommands};

pub async fn handle(
    action: UserCommands,
    client: &Client,
    token: Option<&BearerToken>,
    format: OutputFormat,
) -> Result<()> {
    match action {
        UserCommands::Get { id } => {
            let user = client.users().get(&id, require_token(token)?).await?;
            format.print(&user);
        }
    }
    Ok(())
}
