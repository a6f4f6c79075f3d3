use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use plinth_api::ApiClient;
use plinth_store::{ExperienceDraft, TimelineEventForm, WorkStore};
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum WorkCommand {
    /// List active experiences
    #[command(alias = "ls")]
    List,
    /// List every experience, hidden included
    Admin,
    /// Show one experience with its timeline and featured posts
    Show { slug: String },
    /// Create an experience
    #[command(alias = "new")]
    Create {
        #[arg(long)]
        title: String,
        /// Derived from the title when not given
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        /// Body text; blank lines separate paragraphs
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value = "0")]
        sort_order: i32,
        /// Keep out of the public listing
        #[arg(long)]
        hidden: bool,
    },
    /// Edit an experience
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        /// Replaces the whole body
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        sort_order: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an experience
    #[command(alias = "rm")]
    Delete { id: Uuid },
    /// List an experience's timeline
    Timeline { experience_id: Uuid },
    /// Add a timeline event
    TimelineAdd {
        experience_id: Uuid,
        /// Event date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        title: String,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        photo: Option<String>,
        #[arg(long, default_value = "0")]
        sort_order: i32,
    },
    /// Remove a timeline event
    TimelineRm { event_id: Uuid },
    /// List an experience's featured posts
    Featured { experience_id: Uuid },
    /// Pin a post to an experience
    Feature { experience_id: Uuid, post_id: Uuid },
    /// Unpin a post from an experience
    Unfeature { experience_id: Uuid, post_id: Uuid },
}

pub async fn run(client: Arc<ApiClient>, command: WorkCommand) -> Result<()> {
    let mut store = WorkStore::new(client);

    match command {
        WorkCommand::List => {
            store.fetch_experiences().await?;
            for experience in &store.state().experiences {
                println!("{}  {:<24} {}", experience.id, experience.slug, experience.title);
            }
        }
        WorkCommand::Admin => {
            store.fetch_admin_experiences().await?;
            for experience in &store.state().experiences {
                let visibility = if experience.is_active { "active" } else { "hidden" };
                println!(
                    "{}  {:<7} {:<24} {}",
                    experience.id, visibility, experience.slug, experience.title
                );
            }
        }
        WorkCommand::Show { slug } => {
            store.fetch_experience(&slug).await?;
            let detail = store
                .state()
                .current
                .as_ref()
                .context("No experience loaded")?;

            println!("{}", detail.experience.title);
            if let Some(subtitle) = &detail.experience.subtitle {
                println!("{subtitle}");
            }
            if let Some(html) = &detail.experience.description_html {
                println!("\n{html}");
            }
            if !detail.timeline.is_empty() {
                println!("\nTimeline:");
                for event in &detail.timeline {
                    println!("  {}  {}  {}", event.id, event.event_date, event.title);
                }
            }
            if !detail.featured_posts.is_empty() {
                println!("\nFeatured posts:");
                for featured in &detail.featured_posts {
                    println!(
                        "  {}  #{} {}",
                        featured.post.id, featured.sort_order, featured.post.title
                    );
                }
            }
        }
        WorkCommand::Create {
            title,
            slug,
            subtitle,
            text,
            sort_order,
            hidden,
        } => {
            let mut draft = ExperienceDraft::new();
            draft.set_title(&title);
            if let Some(slug) = &slug {
                draft.set_slug(slug);
            }
            if let Some(subtitle) = &subtitle {
                draft.set_subtitle(subtitle);
            }
            draft.set_sort_order(sort_order);
            draft.set_is_active(!hidden);
            if let Some(text) = &text {
                replace_body(&mut draft, text);
            }

            let experience = store.save_draft(&draft).await?;
            println!("Created {} ({})", experience.slug, experience.id);
        }
        WorkCommand::Edit {
            id,
            title,
            slug,
            subtitle,
            text,
            sort_order,
            active,
        } => {
            store.fetch_admin_experiences().await?;
            let experience = store
                .state()
                .experiences
                .iter()
                .find(|experience| experience.id == id)
                .cloned()
                .with_context(|| format!("No experience {id}"))?;

            let mut draft = ExperienceDraft::from_experience(&experience);
            if let Some(title) = &title {
                draft.set_title(title);
            }
            if let Some(slug) = &slug {
                draft.set_slug(slug);
            }
            if let Some(subtitle) = &subtitle {
                draft.set_subtitle(subtitle);
            }
            if let Some(sort_order) = sort_order {
                draft.set_sort_order(sort_order);
            }
            if let Some(active) = active {
                draft.set_is_active(active);
            }
            if let Some(text) = &text {
                replace_body(&mut draft, text);
            }

            let experience = store.save_draft(&draft).await?;
            println!("Updated {} ({})", experience.slug, experience.id);
        }
        WorkCommand::Delete { id } => {
            store.delete_experience(id).await?;
            println!("Deleted {id}");
        }
        WorkCommand::Timeline { experience_id } => {
            store.fetch_timeline(experience_id).await?;
            for event in &store.state().timeline {
                println!("{}  {}  {}", event.id, event.event_date, event.title);
            }
        }
        WorkCommand::TimelineAdd {
            experience_id,
            date,
            title,
            subtitle,
            photo,
            sort_order,
        } => {
            let form = TimelineEventForm {
                event_date: Some(date),
                title,
                subtitle: subtitle.unwrap_or_default(),
                photo_url: photo,
                sort_order,
            };
            let event = store.add_timeline_event(experience_id, &form).await?;
            println!("Added {} ({})", event.title, event.id);
        }
        WorkCommand::TimelineRm { event_id } => {
            store.delete_timeline_event(event_id).await?;
            println!("Removed {event_id}");
        }
        WorkCommand::Featured { experience_id } => {
            store.fetch_featured_posts(experience_id).await?;
            for featured in &store.state().featured_posts {
                println!(
                    "{}  #{} {}",
                    featured.post.id, featured.sort_order, featured.post.title
                );
            }
        }
        WorkCommand::Feature {
            experience_id,
            post_id,
        } => {
            store.fetch_featured_posts(experience_id).await?;
            store.add_featured_post(experience_id, post_id).await?;
            println!(
                "Featured {post_id} ({} posts pinned)",
                store.state().featured_posts.len()
            );
        }
        WorkCommand::Unfeature {
            experience_id,
            post_id,
        } => {
            store.fetch_featured_posts(experience_id).await?;
            store.remove_featured_post(experience_id, post_id).await?;
            println!(
                "Unfeatured {post_id} ({} posts pinned)",
                store.state().featured_posts.len()
            );
        }
    }

    Ok(())
}

fn replace_body(draft: &mut ExperienceDraft, text: &str) {
    let paragraphs = super::blog::paragraphs(text);
    draft.edit_body(|blocks| {
        blocks.clear();
        blocks.extend(paragraphs);
    });
}
