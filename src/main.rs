use std::cell::RefCell;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::{PgPool, PgPoolOptions};

mod client;
mod controller;
mod dates;
mod db;
mod html;
mod models;
mod render;
mod status;
mod store;
mod view;

use client::GoalService;
use controller::GoalDetailsController;
use render::PageRegions;

#[derive(Parser)]
#[command(name = "goal-details")]
#[command(about = "Goal progress detail pages for Momentum", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load the demo goal and its entries
    Seed,
    /// Import goal events from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Render the detail page for one goal
    Show {
        #[arg(long)]
        goal: String,
        #[arg(long, default_value = db::DEMO_USER)]
        user: String,
        /// Serve the payload from a saved JSON file instead of Postgres
        #[arg(long)]
        payload: Option<PathBuf>,
        #[arg(long, default_value = "goal-details.html")]
        out: PathBuf,
        /// Print the raw payload as JSON instead of writing the page
        #[arg(long)]
        json: bool,
        /// Start with the all-entries panel visible
        #[arg(long)]
        show_entries: bool,
    },
    /// Browse goals interactively from stdin
    Browse {
        #[arg(long, default_value = db::DEMO_USER)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = pool_from_env().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = pool_from_env().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = pool_from_env().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} events from {}.", csv.display());
        }
        Commands::Show {
            goal,
            user,
            payload,
            out,
            json,
            show_entries,
        } => match payload {
            Some(path) => {
                let service = client::FileGoalService::new(path);
                run_show(service, &goal, &out, json, show_entries).await?;
            }
            None => {
                let pool = pool_from_env().await?;
                let service = db::PgGoalService::new(pool, user);
                run_show(service, &goal, &out, json, show_entries).await?;
            }
        },
        Commands::Browse { user } => {
            let pool = pool_from_env().await?;
            let service = db::PgGoalService::new(pool, user);
            run_browse(service).await?;
        }
    }

    Ok(())
}

async fn pool_from_env() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn run_show<S: GoalService>(
    service: S,
    goal: &str,
    out: &Path,
    json: bool,
    show_entries: bool,
) -> anyhow::Result<()> {
    if json {
        let payload = service.get_goal_details(goal).await?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let page = Rc::new(RefCell::new(PageRegions::new()));
    let mut controller = GoalDetailsController::new(service, Rc::clone(&page));
    controller.mount(Some(goal)).await?;
    if show_entries {
        controller.toggle_panel();
    }

    std::fs::write(out, page.borrow().to_document())?;
    println!("Page written to {}.", out.display());
    Ok(())
}

async fn run_browse<S: GoalService>(service: S) -> anyhow::Result<()> {
    let page = Rc::new(RefCell::new(PageRegions::new()));
    let mut controller = GoalDetailsController::new(service, Rc::clone(&page));

    println!("Enter a goal name (empty line clears, :toggle flips the entries panel, :quit exits).");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            ":quit" => break,
            ":toggle" => controller.toggle_panel(),
            _ => {
                if let Err(error) = controller.submit(input).await {
                    eprintln!("Could not load goal: {error}");
                    continue;
                }
                if controller.state().is_empty() {
                    println!("Cleared.");
                    continue;
                }
            }
        }
        println!("{}", page.borrow().to_document());
    }

    Ok(())
}
