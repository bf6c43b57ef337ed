use clap::{Parser, Subcommand};
use inquire::Text;

use crate::config::SyncConfig;
use crate::service::canvas_service::CanvasService;
use crate::service::course_mapping::CourseMappings;
use crate::service::notion_service::NotionService;
use crate::service::sync_flow;

#[derive(Parser)]
#[command(name = "canvas-sync", about = "Sync Canvas assignments into a Notion database")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Sync {},
    AddMapping {},
}

pub async fn cli(config: SyncConfig) -> Result<(), String> {
    // Fine to panic here
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Sync {}) {
        Commands::Sync {} => run_sync(&config).await,
        Commands::AddMapping {} => add_mapping(&config),
    }
}

async fn run_sync(config: &SyncConfig) -> Result<(), String> {
    println!("Starting Canvas -> Notion sync...");

    let mappings = CourseMappings::from_file(&config.course_map_file)?;
    if mappings.is_empty() {
        println!(
            "No course mappings loaded from {}; raw Canvas course names will be used.",
            config.course_map_file
        );
    } else {
        println!(
            "Loaded {} course mappings from {}",
            mappings.len(),
            config.course_map_file
        );
    }

    let canvas = CanvasService::new(config.canvas_url.clone(), config.canvas_key.clone());
    let notion = NotionService::new(
        config.notion_key.clone(),
        config.notion_db.clone(),
        config.timezone,
    );

    let summary = sync_flow::sync_tick(&canvas, &notion, &mappings).await?;
    println!(
        "Sync complete. Added {}, marked complete {}, skipped {}, failed {}.",
        summary.added, summary.marked_complete, summary.skipped, summary.failed
    );
    Ok(())
}

fn add_mapping(config: &SyncConfig) -> Result<(), String> {
    let keyword = Text::new("Canvas course name keyword to match.")
        .prompt()
        .map_err(|e| format!("No keyword supplied: {}", e))?;
    let label = Text::new("Notion course label to map it to.")
        .prompt()
        .map_err(|e| format!("No label supplied: {}", e))?;

    if keyword.trim().is_empty() || label.trim().is_empty() {
        return Err("Keyword and label must not be empty".to_string());
    }

    CourseMappings::append_to_file(&config.course_map_file, &keyword, &label)?;
    println!(
        "Added mapping {} -> {} to {}",
        keyword.trim().to_lowercase(),
        label.trim(),
        config.course_map_file
    );
    Ok(())
}
