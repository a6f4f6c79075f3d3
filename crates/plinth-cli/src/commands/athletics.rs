use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use plinth_api::athletics::{
    ContactMessage, CreateAthleticsServiceInput, UpdateAthleticsServiceInput,
};
use plinth_api::ApiClient;
use plinth_store::AthleticsStore;
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum AthleticsCommand {
    /// List active services
    Services,
    /// List every service, hidden included
    Admin,
    /// Add a service
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Icon identifier rendered by the client
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long, default_value = "0")]
        sort_order: i32,
        /// Keep out of the public listing
        #[arg(long)]
        hidden: bool,
    },
    /// Edit a service
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        sort_order: Option<i32>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a service
    #[command(alias = "rm")]
    Delete { id: Uuid },
    /// Send a contact message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

pub async fn run(client: Arc<ApiClient>, command: AthleticsCommand) -> Result<()> {
    let mut store = AthleticsStore::new(client);

    match command {
        AthleticsCommand::Services => {
            store.fetch_services().await?;
            for service in &store.state().services {
                println!("{}  {}", service.id, service.title);
            }
        }
        AthleticsCommand::Admin => {
            store.fetch_admin_services().await?;
            for service in &store.state().services {
                let visibility = if service.is_active { "active" } else { "hidden" };
                println!("{}  {:<7} {}", service.id, visibility, service.title);
            }
        }
        AthleticsCommand::Add {
            title,
            description,
            icon,
            price,
            sort_order,
            hidden,
        } => {
            let input = CreateAthleticsServiceInput {
                title,
                description,
                icon_name: icon,
                price_info: price,
                sort_order,
                is_active: !hidden,
            };
            let service = store.create_service(&input).await?;
            println!("Created {} ({})", service.title, service.id);
        }
        AthleticsCommand::Edit {
            id,
            title,
            description,
            icon,
            price,
            sort_order,
            active,
        } => {
            let input = UpdateAthleticsServiceInput {
                title,
                description,
                icon_name: icon,
                price_info: price,
                sort_order,
                is_active: active,
            };
            let service = store.update_service(id, &input).await?;
            println!("Updated {} ({})", service.title, service.id);
        }
        AthleticsCommand::Delete { id } => {
            store.delete_service(id).await?;
            println!("Deleted {id}");
        }
        AthleticsCommand::Contact {
            name,
            email,
            message,
        } => {
            let contact = ContactMessage {
                name,
                email,
                message,
            };
            let reply = store.submit_contact(&contact).await?;
            println!("{reply}");
        }
    }

    Ok(())
}
