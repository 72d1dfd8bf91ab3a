//! Club commands

use anyhow::Result;
use clubhub_client::{Client, Club};
use serde::Serialize;
use tabled::Tabled;

use crate::{output::OutputFormat, ClubCommands};

#[derive(Debug, Serialize, Tabled)]
pub struct ClubRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<Club> for ClubRow {
    fn from(club: Club) -> Self {
        Self {
            id: club.id.to_string(),
            name: club.name,
        }
    }
}

pub async fn handle(action: ClubCommands, client: &Client, format: OutputFormat) -> Result<()> {
    match action {
        ClubCommands::List => {
            let rows: Vec<ClubRow> = client
                .clubs()
                .all()
                .await?
                .into_iter()
                .map(ClubRow::from)
                .collect();
            format.print_rows(&rows);
        }
    }
    Ok(())
}
