// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and logging, then start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::SheetsCredentials;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
    }

    log::info!("Starting places-leads service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );
    log::info!(
        "Default search: \"{}\" within {} m; sheets auth: {}",
        config.search_keyword,
        config.search_radius_m,
        config.sheets_auth.describe()
    );

    // 4. Load Sheets credentials once so minted tokens are reused
    let credentials = SheetsCredentials::from_auth(&config.sheets_auth).map_err(|e| {
        log::error!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let app_config = web::Data::new(config);
    let app_credentials = web::Data::new(credentials);

    HttpServer::new(move || {
        App::new()
            .app_data(app_config.clone())
            .app_data(app_credentials.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::leads_config)
            .configure(handlers::sheets_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
