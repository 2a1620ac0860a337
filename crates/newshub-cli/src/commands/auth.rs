use anyhow::Result;

use newshub_core::{api::Credentials, NewsClient, SessionStore};

pub async fn login(
    client: &NewsClient,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let session = client.login(&Credentials::new(email, password)).await?;
    store.save(&session)?;

    println!("Logged in as {}.", email.trim());
    println!("Session stored at {}", store.path().display());

    Ok(())
}

pub async fn register(client: &NewsClient, email: &str, password: &str) -> Result<()> {
    client.register(&Credentials::new(email, password)).await?;

    println!("Registration successful! Please login:");
    println!("  newshub login -e {} -p <password>", email.trim());

    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}
