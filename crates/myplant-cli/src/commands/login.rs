//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use myplant::Credentials;

use crate::cli::ConnectionArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long, env = "MYPLANT_USERNAME")]
    pub username: String,

    /// Account password
    #[arg(long, env = "MYPLANT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let response = client
        .login_with(&credentials)
        .await
        .context("Failed to login")?;

    if response.credential.is_none() {
        anyhow::bail!("Server accepted the login but did not send a session cookie");
    }

    output::success("Logged in successfully");
    println!();
    if let Some(user) = response.data.profile() {
        output::field("Name", &user.name);
        output::field("Email", &user.email);
    }
    output::field("API", client.base_url().as_str());
    output::field("Stored in", client.store().active_backend());

    Ok(())
}
