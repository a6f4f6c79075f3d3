use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Subcommand;
use plinth_api::influences::{CreateInfluenceInput, InfluenceCategory, UpdateInfluenceInput};
use plinth_api::ApiClient;
use plinth_store::InfluencesStore;
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum InfluencesCommand {
    /// List active influences
    #[command(alias = "ls")]
    List {
        /// book, podcast or creator
        #[arg(long)]
        category: Option<String>,
    },
    /// List every influence, hidden included
    Admin,
    /// Add an influence
    Add {
        #[arg(long)]
        title: String,
        /// book, podcast or creator
        #[arg(long)]
        category: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[arg(long, default_value = "0")]
        sort_order: i32,
        /// Keep out of the public listing
        #[arg(long)]
        hidden: bool,
    },
    /// Edit an influence
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        link_url: Option<String>,
        #[arg(long)]
        sort_order: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an influence
    #[command(alias = "rm")]
    Delete { id: Uuid },
}

pub async fn run(client: Arc<ApiClient>, command: InfluencesCommand) -> Result<()> {
    let mut store = InfluencesStore::new(client);

    match command {
        InfluencesCommand::List { category } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            store.fetch_influences(category).await?;
            for influence in &store.state().items {
                println!(
                    "{}  {:<8} {}",
                    influence.id,
                    influence.category.as_str(),
                    influence.title
                );
            }
        }
        InfluencesCommand::Admin => {
            store.fetch_admin_influences().await?;
            for influence in &store.state().items {
                let visibility = if influence.is_active { "active" } else { "hidden" };
                println!(
                    "{}  {:<7} {:<8} {}",
                    influence.id,
                    visibility,
                    influence.category.as_str(),
                    influence.title
                );
            }
        }
        InfluencesCommand::Add {
            title,
            category,
            author,
            description,
            image_url,
            link_url,
            sort_order,
            hidden,
        } => {
            let input = CreateInfluenceInput {
                title,
                category: parse_category(&category)?,
                author,
                description,
                image_url,
                link_url,
                sort_order,
                is_active: !hidden,
            };
            let influence = store.create_influence(&input).await?;
            println!("Created {} ({})", influence.title, influence.id);
        }
        InfluencesCommand::Edit {
            id,
            title,
            author,
            description,
            link_url,
            sort_order,
            active,
        } => {
            let input = UpdateInfluenceInput {
                title,
                author,
                description,
                link_url,
                sort_order,
                is_active: active,
                ..Default::default()
            };
            let influence = store.update_influence(id, &input).await?;
            println!("Updated {} ({})", influence.title, influence.id);
        }
        InfluencesCommand::Delete { id } => {
            store.delete_influence(id).await?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}

fn parse_category(value: &str) -> Result<InfluenceCategory> {
    match value {
        "book" => Ok(InfluenceCategory::Book),
        "podcast" => Ok(InfluenceCategory::Podcast),
        "creator" => Ok(InfluenceCategory::Creator),
        other => bail!("Unknown category: {other} (expected book, podcast or creator)"),
    }
}
