//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ConnectionArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub fn run(_args: WhoamiArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let session = client
        .session()
        .context("No active session. Run 'myplant login' first.")?;

    match client.user() {
        Some(user) => {
            output::field("Name", &user.name);
            output::field("Username", &user.username);
            output::field("Email", &user.email);
            if user.is_admin {
                output::field("Role", "admin");
            }
        }
        None => output::note("No cached profile."),
    }

    let expires = match session.expires_at() {
        Some(at) if session.is_expired() => format!("{} {}", at.to_rfc2822(), "(expired)".red()),
        Some(at) => at.to_rfc2822(),
        None => "end of browser session".to_string(),
    };
    output::field("Session expires", &expires);
    output::field("Stored in", client.store().active_backend());

    Ok(())
}
