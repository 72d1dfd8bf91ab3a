//! CLI Commands

pub mod activities;
pub mod clubs;
pub mod config;
pub mod register;
pub mod users;

use anyhow::{anyhow, Result};
use clubhub_client::BearerToken;

/// Authenticated endpoints refuse to run without a token
pub fn require_token(token: Option<&BearerToken>) -> Result<&BearerToken> {
    token.ok_or_else(|| {
        anyhow!("no token configured; pass --token or run `clubhub config set token <TOKEN>`")
    })
}
