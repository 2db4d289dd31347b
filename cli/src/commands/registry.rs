//! Registry commands: salesmen, building types, villages

use fieldform_sdk::ApiClient;

use crate::output::OutputFormat;
use crate::session::FileKeyStore;
use crate::{BuildingTypeCommands, SalesmanCommands, VillageCommands};

use super::admin_session;

pub async fn salesmen(
    action: SalesmanCommands,
    client: &ApiClient,
    store: &FileKeyStore,
    api_key: Option<&str>,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        SalesmanCommands::List => {
            let names = client.salesmen().await.map_err(|e| e.to_string())?;
            format.print_names(&names);
        }
        SalesmanCommands::Search { query } => {
            let names = client
                .search_salesmen(&query)
                .await
                .map_err(|e| e.to_string())?;
            format.print_names(&names);
        }
        SalesmanCommands::Add { name } => {
            let session = admin_session(api_key, store)?;
            let updated = client
                .add_salesman(&name, &session)
                .await
                .map_err(|e| e.to_string())?;
            println!("Added salesman: {}", name);
            format.print_names(&updated);
        }
    }
    Ok(())
}

pub async fn building_types(
    action: BuildingTypeCommands,
    client: &ApiClient,
    store: &FileKeyStore,
    api_key: Option<&str>,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        BuildingTypeCommands::List => {
            let types = client.building_types().await.map_err(|e| e.to_string())?;
            format.print_names(&types);
        }
        BuildingTypeCommands::Add { name } => {
            let session = admin_session(api_key, store)?;
            let updated = client
                .add_building_type(&name, &session)
                .await
                .map_err(|e| e.to_string())?;
            println!("Added building type: {}", name);
            format.print_names(&updated);
        }
    }
    Ok(())
}

pub async fn villages(
    action: VillageCommands,
    client: &ApiClient,
    format: OutputFormat,
) -> Result<(), String> {
    match action {
        VillageCommands::Search { query } => {
            let names = client
                .search_villages(&query)
                .await
                .map_err(|e| e.to_string())?;
            format.print_names(&names);
        }
    }
    Ok(())
}
