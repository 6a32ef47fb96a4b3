//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let had_session = client.session().is_some();

    client.logout();

    if had_session {
        output::success("Logged out");
    } else {
        output::note("No active session.");
    }
    Ok(())
}
