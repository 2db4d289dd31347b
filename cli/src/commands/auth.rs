//! Login / logout commands

use colored::Colorize;

use fieldform_sdk::{AdminSession, ApiClient};

use crate::session::FileKeyStore;

pub async fn login(client: &ApiClient, store: &FileKeyStore, key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err("please provide an API key".into());
    }
    match AdminSession::login(client, store, key).await {
        Ok(_) => {
            println!("{}", "API key verified and saved".green());
            Ok(())
        }
        Err(e) if e.is_unauthorized() => Err("invalid API key".into()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn logout(store: &FileKeyStore) -> Result<(), String> {
    AdminSession::logout(store).map_err(|e| e.to_string())?;
    println!("Logged out");
    Ok(())
}
