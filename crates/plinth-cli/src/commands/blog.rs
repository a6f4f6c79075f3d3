use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use plinth_api::blog::{Post, PostListOptions};
use plinth_api::ApiClient;
use plinth_store::{BlogStore, PostDraft};
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum PostsCommand {
    /// List published posts
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        /// Only posts carrying this tag slug
        #[arg(long)]
        tag: Option<String>,
    },
    /// List every post, drafts included
    Admin,
    /// Show one published post by slug
    Show { slug: String },
    /// Create a draft post
    #[command(alias = "new")]
    Create {
        #[arg(long)]
        title: String,
        /// Derived from the title when not given
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        /// Body text; blank lines separate paragraphs
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        cover: Option<String>,
        /// Tag id, repeatable
        #[arg(long)]
        tag: Vec<Uuid>,
    },
    /// Edit an existing post
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        /// Replaces the whole body
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        cover: Option<String>,
    },
    /// Publish a draft
    Publish { id: Uuid },
    /// Take a published post back to draft
    Unpublish { id: Uuid },
    /// Delete a post
    #[command(alias = "rm")]
    Delete { id: Uuid },
    /// List tags
    Tags,
    /// Create a tag
    TagAdd { name: String },
    /// Delete a tag
    TagRm { id: Uuid },
}

pub async fn run(client: Arc<ApiClient>, command: PostsCommand) -> Result<()> {
    let mut store = BlogStore::new(client);

    match command {
        PostsCommand::List {
            page,
            per_page,
            tag,
        } => {
            let options = PostListOptions {
                page,
                per_page,
                tag,
            };
            store.fetch_page(&options).await?;
            let state = store.state();
            for post in &state.items {
                print_row(post);
            }
            println!(
                "page {} ({} posts total)",
                state.page, state.total
            );
        }
        PostsCommand::Admin => {
            store.fetch_admin_posts().await?;
            for post in &store.state().admin_items {
                print_row(post);
            }
        }
        PostsCommand::Show { slug } => {
            store.fetch_post(&slug).await?;
            let post = store.state().current.as_ref().context("No post loaded")?;
            println!("{}", post.title);
            println!("slug: {}  status: {}", post.slug, post.status.as_str());
            if let Some(excerpt) = &post.excerpt {
                println!("{excerpt}");
            }
            if let Some(html) = &post.content_html {
                println!("\n{html}");
            }
        }
        PostsCommand::Create {
            title,
            slug,
            excerpt,
            text,
            cover,
            tag,
        } => {
            let mut draft = PostDraft::new();
            draft.set_title(&title);
            if let Some(slug) = &slug {
                draft.set_slug(slug);
            }
            if let Some(excerpt) = &excerpt {
                draft.set_excerpt(excerpt);
            }
            draft.set_cover_image_url(cover);
            for tag_id in tag {
                draft.add_tag(tag_id);
            }
            if let Some(text) = &text {
                replace_body(&mut draft, text);
            }

            let post = store.save_draft(&draft).await?;
            println!("Created {} ({})", post.slug, post.id);
        }
        PostsCommand::Edit {
            id,
            title,
            slug,
            excerpt,
            text,
            cover,
        } => {
            store.fetch_admin_post(id).await?;
            let post = store
                .state()
                .current
                .clone()
                .context("No post loaded")?;

            let mut draft = PostDraft::from_post(&post);
            if let Some(title) = &title {
                draft.set_title(title);
            }
            if let Some(slug) = &slug {
                draft.set_slug(slug);
            }
            if let Some(excerpt) = &excerpt {
                draft.set_excerpt(excerpt);
            }
            if cover.is_some() {
                draft.set_cover_image_url(cover);
            }
            if let Some(text) = &text {
                replace_body(&mut draft, text);
            }

            let post = store.save_draft(&draft).await?;
            println!("Updated {} ({})", post.slug, post.id);
        }
        PostsCommand::Publish { id } => {
            let post = store.publish_post(id).await?;
            println!("Published {}", post.slug);
        }
        PostsCommand::Unpublish { id } => {
            let post = store.unpublish_post(id).await?;
            println!("Unpublished {}", post.slug);
        }
        PostsCommand::Delete { id } => {
            store.delete_post(id).await?;
            println!("Deleted {id}");
        }
        PostsCommand::Tags => {
            store.fetch_tags().await?;
            for tag in &store.state().tags {
                println!("{}  {:<20} {}", tag.id, tag.slug, tag.name);
            }
        }
        PostsCommand::TagAdd { name } => {
            let tag = store.create_tag(&name).await?;
            println!("Created tag {} ({})", tag.slug, tag.id);
        }
        PostsCommand::TagRm { id } => {
            store.delete_tag(id).await?;
            println!("Deleted tag {id}");
        }
    }

    Ok(())
}

fn print_row(post: &Post) {
    println!(
        "{}  {:<9}  {}",
        post.id,
        post.status.as_str(),
        post.title
    );
}

/// Replace the draft body with plain paragraphs split on blank lines.
fn replace_body(draft: &mut PostDraft, text: &str) {
    draft.edit_body(|blocks| {
        blocks.clear();
        blocks.extend(paragraphs(text));
    });
}

pub(crate) fn paragraphs(text: &str) -> Vec<plinth_document::Node> {
    use plinth_document::Node;
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| Node::paragraph(vec![Node::text(paragraph)]))
        .collect()
}
