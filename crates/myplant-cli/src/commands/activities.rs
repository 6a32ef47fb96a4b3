//! Activity command implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use myplant::{Activity, ActivitySignup, RemoveRegistration};

use crate::cli::ConnectionArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ActivitiesCommand {
    #[command(subcommand)]
    pub command: ActivitiesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ActivitiesSubcommand {
    /// List all activities
    List(ListArgs),

    /// Show a single activity
    Show(ShowArgs),

    /// Sign up for an activity, or join its waitlist
    Join(JoinArgs),

    /// Cancel a signup or waitlist registration
    Leave(LeaveArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Activity id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Activity id
    pub id: String,

    /// Join the waitlist instead of signing up
    #[arg(long)]
    pub waitlist: bool,

    /// Answer to a signup question, as QUESTION_ID=ANSWER (repeatable)
    #[arg(long = "answer", value_name = "QUESTION_ID=ANSWER")]
    pub answers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LeaveArgs {
    /// Signup or waitlist registration id (see `activities show`)
    pub registration_id: String,
}

pub async fn handle(cmd: ActivitiesCommand, connection: &ConnectionArgs) -> Result<()> {
    match cmd.command {
        ActivitiesSubcommand::List(args) => list(args, connection).await,
        ActivitiesSubcommand::Show(args) => show(args, connection).await,
        ActivitiesSubcommand::Join(args) => join(args, connection).await,
        ActivitiesSubcommand::Leave(args) => leave(args, connection).await,
    }
}

async fn list(args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let activities = client
        .get_activities()
        .await
        .context("Failed to list activities")?;

    if activities.is_empty() {
        output::note("No activities found.");
        return Ok(());
    }

    for activity in &activities {
        if args.json {
            output::json(activity)?;
        } else {
            println!(
                "{}  {}  {}{}",
                activity.id.dimmed(),
                activity.datetime,
                activity.title.bold(),
                status_badge(activity)
            );
        }
    }

    Ok(())
}

async fn show(args: ShowArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    let activity = client
        .get_activity(&args.id)
        .await
        .context("Failed to fetch activity")?;

    if args.pretty {
        return output::json_pretty(&activity);
    }

    output::field("Title", &activity.title);
    output::field("When", &activity.datetime);
    output::field("Committee", &activity.committee);
    output::field("Sign-ups", &activity.total_sign_ups.to_string());
    if let Some(id) = &activity.user_status.signup_id {
        output::field("Signup id", id);
    }
    if let Some(id) = &activity.user_status.waitlist_id {
        output::field("Waitlist id", id);
    }
    println!();
    println!("{}", activity.description);

    Ok(())
}

async fn join(args: JoinArgs, connection: &ConnectionArgs) -> Result<()> {
    let mut signup = if args.waitlist {
        ActivitySignup::waitlist()
    } else {
        ActivitySignup::signup()
    };
    for answer in &args.answers {
        let Some((question, value)) = answer.split_once('=') else {
            bail!("Invalid answer '{}', expected QUESTION_ID=ANSWER", answer);
        };
        signup = signup.with_answer(question, value);
    }

    let client = context::client(connection)?;
    let response = client
        .join_activity(&args.id, &signup)
        .await
        .context("Failed to join activity")?;

    output::success(if args.waitlist {
        "Joined the waitlist"
    } else {
        "Signed up"
    });
    if !response.is_null() {
        output::json(&response)?;
    }

    Ok(())
}

async fn leave(args: LeaveArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = context::client(connection)?;
    client
        .remove_activity(&RemoveRegistration::new(&args.registration_id))
        .await
        .context("Failed to cancel registration")?;

    output::success("Registration cancelled");
    Ok(())
}

fn status_badge(activity: &Activity) -> String {
    let status = &activity.user_status;
    if status.signed_up {
        format!("  {}", "[signed up]".green())
    } else if status.on_waitlist {
        format!("  {}", "[waitlist]".yellow())
    } else {
        String::new()
    }
}
