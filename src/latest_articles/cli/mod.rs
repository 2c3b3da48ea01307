//! Command-line front-end: argument parsing, handlers and terminal output.

mod args;
mod print;

use clap::Parser;
use directories::ProjectDirs;
use latest_articles::api::BlocksApi;
use latest_articles::commands::BlockChanges;
use latest_articles::config::BlocksConfig;
use latest_articles::error::{LatestError, Result};
use latest_articles::model::Viewer;
use latest_articles::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use args::{BlockArgs, Cli, Commands, FeaturedFilter, StatusFilter};
use print::{print_blocks, print_messages, print_templates};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let config = BlocksConfig::load(&data_dir)?;
    init_logging(&config, cli.verbose);
    debug!(data_dir = %data_dir.display(), "starting");

    let mut api = BlocksApi::new(FileStore::new(data_dir), config)?;

    match cli.command {
        Commands::Add {
            placeholder,
            settings,
        } => handle_add(&mut api, &placeholder, settings),
        Commands::Configure { id, settings } => handle_configure(&mut api, &id, settings),
        Commands::Remove { id } => handle_remove(&mut api, &id),
        Commands::List { placeholder } => handle_list(&api, placeholder.as_deref()),
        Commands::Duplicate { id, placeholder } => {
            handle_duplicate(&mut api, &id, placeholder.as_deref())
        }
        Commands::Render { id, user, json } => handle_render(&api, &id, user, json),
        Commands::Templates => {
            print_templates(api.templates());
            Ok(())
        }
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("org", "latest-articles", "latest-articles")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LatestError::Config("Could not determine data directory".into()))
}

/// `RUST_LOG` wins; otherwise `-v` raises the configured level.
fn init_logging(config: &BlocksConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new(&config.log_level),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn to_changes(settings: BlockArgs) -> BlockChanges {
    BlockChanges {
        title: settings.title,
        cards_quantity: settings.quantity,
        categories: settings.categories.map(|ids| ids.into_iter().collect()),
        tags: settings.tags.map(|ids| ids.into_iter().collect()),
        status: settings.status.map(|s| match s {
            StatusFilter::Any => None,
            StatusFilter::Only(status) => Some(status),
        }),
        featured: settings.featured.map(|f| match f {
            FeaturedFilter::Yes => Some(true),
            FeaturedFilter::No => Some(false),
            FeaturedFilter::Any => None,
        }),
        privacy_criterion: settings.privacy,
        template: settings.template,
    }
}

fn handle_add(api: &mut BlocksApi<FileStore>, placeholder: &str, settings: BlockArgs) -> Result<()> {
    let result = api.create_block(placeholder, to_changes(settings))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_configure(api: &mut BlocksApi<FileStore>, id: &str, settings: BlockArgs) -> Result<()> {
    let result = api.configure_block(id, to_changes(settings))?;
    print_blocks(&result.affected_blocks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &mut BlocksApi<FileStore>, id: &str) -> Result<()> {
    let result = api.delete_block(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &BlocksApi<FileStore>, placeholder: Option<&str>) -> Result<()> {
    let result = api.list_blocks(placeholder)?;
    print_blocks(&result.listed_blocks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_duplicate(
    api: &mut BlocksApi<FileStore>,
    id: &str,
    placeholder: Option<&str>,
) -> Result<()> {
    let result = api.duplicate_block(id, placeholder)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_render(api: &BlocksApi<FileStore>, id: &str, user: Option<String>, json: bool) -> Result<()> {
    let viewer = match user {
        Some(name) => Viewer::authenticated(name),
        None => Viewer::Anonymous,
    };
    let result = api.render_block(id, &viewer)?;
    let rendered = result
        .rendered
        .ok_or_else(|| LatestError::Api("Nothing was rendered".into()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.context)?);
    } else {
        print!("{}", rendered.html);
    }
    print_messages(&result.messages);
    Ok(())
}
