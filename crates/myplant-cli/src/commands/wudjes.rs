//! Wudje command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use myplant::PostWudjeRequest;

use crate::cli::ConnectionArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct WudjesCommand {
    #[command(subcommand)]
    pub command: WudjesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WudjesSubcommand {
    /// List all Wudjes
    List(ListArgs),

    /// Post a new Wudje
    Post(PostArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Message text
    pub message: String,
}

pub async fn handle(cmd: WudjesCommand, connection: &ConnectionArgs) -> Result<()> {
    match cmd.command {
        WudjesSubcommand::List(args) => list(args, connection).await,
        WudjesSubcommand::Post(args) => post(args, connection).await,
    }
}

async fn list(args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let wudjes = client.get_wudjes().await.context("Failed to list Wudjes")?;

    if wudjes.is_empty() {
        output::note("No Wudjes yet.");
        return Ok(());
    }

    for wud in &wudjes {
        if args.json {
            output::json(wud)?;
        } else {
            println!(
                "{} {}: {}",
                wud.created.dimmed(),
                wud.author.name.bold(),
                wud.message
            );
        }
    }

    Ok(())
}

async fn post(args: PostArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    client
        .post_wudje(&PostWudjeRequest::new(args.message))
        .await
        .context("Failed to post Wudje")?;

    output::success("Posted");
    Ok(())
}
