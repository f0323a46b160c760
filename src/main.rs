mod actor_framework;
mod app_system;
mod auth;
mod catalog;
mod clients;
mod config;
mod directory;
mod domain;
mod error;
mod http;
mod messages;
mod reviews;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::app_system::{setup_tracing, Storefront};
use crate::config::Config;
use crate::domain::{Role, UserCreate};
use crate::http::AppState;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront backend");

    let config = Config::load();
    let system = Storefront::new();

    // Seed a bootstrap admin so the admin routes are reachable on a
    // fresh store; the logged token is a dev convenience.
    let admin_id = system
        .directory_client
        .create_user(UserCreate {
            name: "Admin".to_string(),
            email: "admin@storefront.local".to_string(),
            roles: vec![Role::Admin, Role::Customer],
        })
        .await
        .map_err(|e| e.to_string())?;

    let admin_token = auth::token::issue(&config.token_secret, &admin_id, Duration::hours(8));
    info!(admin_id = %admin_id, "Bootstrap admin created; cookie: token={admin_token}");

    let state = Arc::new(AppState {
        token_secret: config.token_secret.clone(),
        directory: system.directory_client.clone(),
        catalog: system.catalog_client.clone(),
        reviews: system.review_client.clone(),
    });

    http::start_server(config, state).await;

    system.shutdown().await?;

    info!("Storefront backend stopped");
    Ok(())
}
