use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use plinth_api::ApiClient;
use plinth_store::AuthStore;

pub async fn login(client: Arc<ApiClient>, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let mut store = AuthStore::new(client);
    store.login(email, &password).await?;
    store.check_auth().await?;

    match &store.state().user {
        Some(user) => println!(
            "Signed in as {}",
            user.email.as_deref().unwrap_or(&user.sub)
        ),
        None => println!("Signed in"),
    }
    Ok(())
}

pub fn logout(client: Arc<ApiClient>) -> Result<()> {
    let mut store = AuthStore::new(client);
    store.logout();
    println!("Signed out");
    Ok(())
}

pub async fn whoami(client: Arc<ApiClient>) -> Result<()> {
    let mut store = AuthStore::new(client);
    store.check_auth().await?;

    let state = store.state();
    let user = state.user.as_ref().context("No user in session")?;
    println!("{}", user.email.as_deref().unwrap_or("<no email>"));
    println!("subject: {}", user.sub);
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
