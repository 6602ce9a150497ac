//! Page (class) commands
//!
//! Examples:
//!   classqueue page create "Room 101"
//!   classqueue page list --json | jq '.[].name'

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{get_output_format, print_tree, report_failure, FailureNotice, OutputFormat};
use crate::client::{resolve_endpoint, ApiClient};
use crate::ui;

#[derive(Parser, Debug)]
pub struct PageArgs {
    /// classqueue API endpoint (default: http://127.0.0.1:3030)
    #[arg(long, env = "CLASSQUEUE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: PageCommands,
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// Create a new page
    Create(CreatePageArgs),
    /// List existing pages
    List(ListPagesArgs),
}

#[derive(Parser, Debug)]
pub struct CreatePageArgs {
    /// Page name, e.g. a classroom
    pub name: String,

    /// Print the created page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ListPagesArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

pub async fn run_page(args: PageArgs) -> Result<()> {
    let client = ApiClient::new(resolve_endpoint(args.endpoint)?)?;

    match args.command {
        PageCommands::Create(create) => run_create(&client, create).await,
        PageCommands::List(list) => run_list(&client, list).await,
    }
}

async fn run_create(client: &ApiClient, args: CreatePageArgs) -> Result<()> {
    if args.name.trim().is_empty() {
        ui::notify_error("Page name is required");
        anyhow::bail!("Page name is required");
    }

    let pb = ui::spinner("Creating page...");
    let result = client.create_page(&args.name).await;
    ui::clear(pb);

    let page = result
        .map_err(|e| report_failure(e, "Failed to create page", FailureNotice::ServerMessage))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        ui::notify_success(format!("Page '{}' created (id: {})", page.name, page.id));
    }

    Ok(())
}

async fn run_list(client: &ApiClient, args: ListPagesArgs) -> Result<()> {
    let pb = ui::spinner("Loading pages...");
    let result = client.list_pages().await;
    ui::clear(pb);

    let pages = result
        .map_err(|e| report_failure(e, "Failed to load pages", FailureNotice::ServerMessage))?;

    match get_output_format(args.output, args.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&pages)?),
        OutputFormat::Quiet => {
            for page in &pages {
                println!("{}", page.id);
            }
        }
        OutputFormat::Human => {
            print_tree("Pages", "no pages", &pages, |page| {
                vec![page.name.clone(), format!("id: {}", page.id)]
            });
        }
    }

    Ok(())
}
