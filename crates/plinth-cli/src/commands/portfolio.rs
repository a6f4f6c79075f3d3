use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use plinth_api::portfolio::{
    CreatePortfolioItemInput, PortfolioListOptions, UpdatePortfolioItemInput,
};
use plinth_api::{ApiClient, MediaType};
use plinth_store::PortfolioStore;
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// List portfolio items
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        category: Option<String>,
        /// photo or video
        #[arg(long)]
        media_type: Option<String>,
        /// Featured items only
        #[arg(long)]
        featured: bool,
    },
    /// Show one item
    Show { id: Uuid },
    /// List categories in use
    Categories,
    /// Add an item
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        media_url: String,
        /// photo or video
        #[arg(long)]
        media_type: String,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "0")]
        sort_order: i32,
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
        #[arg(long)]
        featured: bool,
    },
    /// Edit an item
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sort_order: Option<i32>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Delete an item
    #[command(alias = "rm")]
    Delete { id: Uuid },
    /// Move an item to a new position
    Reorder { id: Uuid, sort_order: i32 },
}

pub async fn run(client: Arc<ApiClient>, command: PortfolioCommand) -> Result<()> {
    let mut store = PortfolioStore::new(client);

    match command {
        PortfolioCommand::List {
            category,
            media_type,
            featured,
        } => {
            let options = PortfolioListOptions {
                category,
                media_type: media_type.as_deref().map(parse_media_type).transpose()?,
                featured_only: featured,
            };
            store.fetch_items(&options).await?;
            for item in &store.state().items {
                println!(
                    "{}  {:<5}  {:<16} {}",
                    item.id,
                    item.media_type.as_str(),
                    item.category.as_deref().unwrap_or("-"),
                    item.title
                );
            }
        }
        PortfolioCommand::Show { id } => {
            store.fetch_item(id).await?;
            let item = store.state().current.as_ref().context("No item loaded")?;
            println!("{}", item.title);
            println!("{}  {}", item.media_type.as_str(), item.media_url);
            if let Some(description) = &item.description {
                println!("{description}");
            }
        }
        PortfolioCommand::Categories => {
            store.fetch_categories().await?;
            for category in &store.state().categories {
                println!("{category}");
            }
        }
        PortfolioCommand::Add {
            title,
            media_url,
            media_type,
            thumbnail,
            description,
            category,
            sort_order,
            width,
            height,
            featured,
        } => {
            let input = CreatePortfolioItemInput {
                title,
                description,
                media_type: parse_media_type(&media_type)?,
                media_url,
                thumbnail_url: thumbnail,
                category,
                sort_order,
                width,
                height,
                is_featured: featured,
            };
            let item = store.create_item(&input).await?;
            println!("Created {} ({})", item.title, item.id);
        }
        PortfolioCommand::Edit {
            id,
            title,
            description,
            category,
            sort_order,
            featured,
        } => {
            let input = UpdatePortfolioItemInput {
                title,
                description,
                category,
                sort_order,
                is_featured: featured,
                ..Default::default()
            };
            let item = store.update_item(id, &input).await?;
            println!("Updated {} ({})", item.title, item.id);
        }
        PortfolioCommand::Delete { id } => {
            store.delete_item(id).await?;
            println!("Deleted {id}");
        }
        PortfolioCommand::Reorder { id, sort_order } => {
            let item = store.reorder_item(id, sort_order).await?;
            println!("Moved {} to {}", item.title, item.sort_order);
        }
    }

    Ok(())
}

fn parse_media_type(value: &str) -> Result<MediaType> {
    match value {
        "photo" => Ok(MediaType::Photo),
        "video" => Ok(MediaType::Video),
        other => bail!("Unknown media type: {other} (expected photo or video)"),
    }
}
