use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Subcommand;
use plinth_api::settings::SiteSettings;
use plinth_api::ApiClient;
use plinth_store::SettingsStore;

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show current settings
    Show,
    /// Update settings; absent fields are left unchanged
    Set {
        #[arg(long)]
        hero_tagline: Option<String>,
        #[arg(long)]
        about_text: Option<String>,
        #[arg(long)]
        athletics_intro: Option<String>,
        #[arg(long)]
        athletics_philosophy: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
    },
}

pub async fn run(client: Arc<ApiClient>, command: SettingsCommand) -> Result<()> {
    let mut store = SettingsStore::new(client);

    match command {
        SettingsCommand::Show => {
            store.fetch_settings().await?;
            print_settings(&store.state().data);
        }
        SettingsCommand::Set {
            hero_tagline,
            about_text,
            athletics_intro,
            athletics_philosophy,
            contact_email,
            instagram,
            linkedin,
        } => {
            let settings = SiteSettings {
                hero_tagline,
                about_text,
                athletics_intro,
                athletics_philosophy,
                contact_email,
                social_instagram: instagram,
                social_linkedin: linkedin,
            };
            if settings == SiteSettings::default() {
                bail!("Nothing to set");
            }
            let updated = store.update_settings(&settings).await?;
            print_settings(&updated);
        }
    }

    Ok(())
}

fn print_settings(settings: &SiteSettings) {
    let rows = [
        ("hero_tagline", &settings.hero_tagline),
        ("about_text", &settings.about_text),
        ("athletics_intro", &settings.athletics_intro),
        ("athletics_philosophy", &settings.athletics_philosophy),
        ("contact_email", &settings.contact_email),
        ("social_instagram", &settings.social_instagram),
        ("social_linkedin", &settings.social_linkedin),
    ];
    for (name, value) in rows {
        println!("{:<22} {}", name, value.as_deref().unwrap_or("-"));
    }
}
