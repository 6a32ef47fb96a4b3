//! Subcommand implementations.

mod activities;
mod login;
mod logout;
mod whoami;
mod wudjes;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::ConnectionArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Display the cached profile and session expiry
    Whoami(whoami::WhoamiArgs),

    /// Browse and register for activities
    Activities(activities::ActivitiesCommand),

    /// Read and post Wudjes
    Wudjes(wudjes::WudjesCommand),
}

pub async fn handle(cmd: Commands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args, connection).await,
        Commands::Logout(args) => logout::run(args, connection),
        Commands::Whoami(args) => whoami::run(args, connection),
        Commands::Activities(cmd) => activities::handle(cmd, connection).await,
        Commands::Wudjes(cmd) => wudjes::handle(cmd, connection).await,
    }
}
