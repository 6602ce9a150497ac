//! Guest (queue entry) commands
//!
//! Examples:
//!   classqueue guest add --page "Room 101" --name "Al Smith" --email al@example.com
//!   classqueue guest list --page "Room 101"
//!   classqueue guest remove 6f1c...

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use classqueue_core::is_valid_email;

use super::{get_output_format, print_tree, report_failure, FailureNotice, OutputFormat};
use crate::client::{resolve_endpoint, ApiClient, Guest};
use crate::ui;

const ADDED_MESSAGE: &str = "You have been added to the queue.";
const REMOVED_MESSAGE: &str = "Guest removed from the queue.";

#[derive(Parser, Debug)]
pub struct GuestArgs {
    /// classqueue API endpoint (default: http://127.0.0.1:3030)
    #[arg(long, env = "CLASSQUEUE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: GuestCommands,
}

#[derive(Subcommand, Debug)]
pub enum GuestCommands {
    /// Show the queue of a page (or every entry, newest first)
    List(ListGuestsArgs),
    /// Join a page's queue
    Add(AddGuestArgs),
    /// Remove an entry from the queue
    Remove(RemoveGuestArgs),
}

#[derive(Parser, Debug)]
pub struct ListGuestsArgs {
    /// Page to show; omit to list entries across all pages
    #[arg(long, short)]
    pub page: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddGuestArgs {
    /// Page whose queue to join
    #[arg(long, short)]
    pub page: String,

    /// Guest name
    #[arg(long, short, default_value = "")]
    pub name: String,

    /// Guest email
    #[arg(long, short, default_value = "")]
    pub email: String,

    /// Print the created entry as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RemoveGuestArgs {
    /// Entry id (UUID)
    pub id: Uuid,
}

pub async fn run_guest(args: GuestArgs) -> Result<()> {
    // Form checks run before any request is made
    if let GuestCommands::Add(add) = &args.command {
        if let Err(msg) = check_form(&add.name, &add.email) {
            ui::notify_error(msg);
            anyhow::bail!(msg);
        }
    }

    let client = ApiClient::new(resolve_endpoint(args.endpoint)?)?;

    match args.command {
        GuestCommands::List(list) => run_list(&client, list).await,
        GuestCommands::Add(add) => run_add(&client, add).await,
        GuestCommands::Remove(remove) => run_remove(&client, remove).await,
    }
}

/// Same checks as the sign-up form: name, then email presence, then format.
fn check_form(name: &str, email: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if email.trim().is_empty() {
        return Err("Email is required");
    }
    if !is_valid_email(email) {
        return Err("Please enter a valid email address such as: example@example.com");
    }
    Ok(())
}

fn guest_lines(guest: &Guest) -> Vec<String> {
    let entered = guest.entered_at.with_timezone(&Local);
    vec![
        format!("{} <{}>", guest.name, guest.email),
        format!("entered {}", entered.format("%Y-%m-%d %H:%M:%S")),
        format!("id: {}", guest.id),
    ]
}

async fn run_list(client: &ApiClient, args: ListGuestsArgs) -> Result<()> {
    let pb = ui::spinner("Loading queue...");
    let result = client.list_guests(args.page.as_deref()).await;
    ui::clear(pb);

    let guests = result
        .map_err(|e| report_failure(e, "Failed to load guests", FailureNotice::ServerMessage))?;

    match get_output_format(args.output, args.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&guests)?),
        OutputFormat::Quiet => {
            for guest in &guests {
                println!("{}", guest.id);
            }
        }
        OutputFormat::Human => {
            let title = match &args.page {
                Some(page) => format!("{} queue ({})", page, guests.len()),
                None => format!("All guests ({})", guests.len()),
            };
            print_tree(&title, "queue is empty", &guests, guest_lines);
        }
    }

    Ok(())
}

async fn run_add(client: &ApiClient, args: AddGuestArgs) -> Result<()> {
    let pb = ui::spinner("Joining queue...");
    let result = client.add_guest(&args.page, &args.name, &args.email).await;
    ui::clear(pb);

    let guest = result
        .map_err(|e| report_failure(e, "Failed to add guest", FailureNotice::ServerMessage))?;
    tracing::debug!(guest_id = %guest.id, "guest added");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&guest)?);
    } else {
        ui::notify_success(ADDED_MESSAGE);
    }

    Ok(())
}

async fn run_remove(client: &ApiClient, args: RemoveGuestArgs) -> Result<()> {
    let pb = ui::spinner("Removing guest...");
    let result = client.remove_guest(args.id).await;
    ui::clear(pb);

    result
        .map_err(|e| report_failure(e, "Failed to remove guest", FailureNotice::Generic))?;
    ui::notify_success(REMOVED_MESSAGE);

    Ok(())
}
