mod cli;
mod commands;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ConfigCommands, OutputFormat};
use hospital_cli::config::loader::load_config;
use hospital_cli::{ApiBackend, AppConfig, logging};
use hospital_client::HospitalClient;
use hospital_db_memory::create_hospital_api;
use hospital_storage::HospitalApi;
use hospital_store::{HospitalStore, StoreError};
use output::{flush_notifications, print_error};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Store failures were already announced as notifications.
        if e.downcast_ref::<StoreError>().is_none() {
            print_error(&format!("{e:#}"));
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init("warn");

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(server) = &cli.server {
        config.api.base_url = server.clone();
    }
    if !logging::set_level(&config.logging.level) {
        tracing::debug!("Keeping RUST_LOG filter over logging.level");
    }
    let format = cli.format.unwrap_or_default();

    if let Commands::Config(args) = &cli.command {
        match args.command {
            ConfigCommands::Show => show_config(&config, format)?,
        }
        return Ok(());
    }

    let api = build_api(&config)?;
    let store = Arc::new(
        HospitalStore::builder(api)
            .credentials(config.admin_credentials())
            .build(),
    );
    let mut notifications = store.subscribe();

    store.load().await;
    let result = execute(&cli.command, &store, format).await;
    flush_notifications(&mut notifications);
    result
}

async fn execute(command: &Commands, store: &HospitalStore, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Status => commands::status::status(store, format),
        Commands::List(args) => commands::records::list(store, args.resource, format),
        Commands::Import(args) => {
            commands::records::import(store, args.resource, &args.file).await
        }
        Commands::Delete(args) => {
            commands::records::delete(store, args.resource, &args.id).await
        }
        Commands::Login(args) => commands::auth::login(store, args, format),
        Commands::Config(_) => Ok(()),
    }
}

fn build_api(config: &AppConfig) -> Result<HospitalApi> {
    match config.api.backend {
        ApiBackend::Http => {
            let client = HospitalClient::new(&config.client_config())
                .with_context(|| format!("Invalid API base URL: {}", config.api.base_url))?;
            tracing::debug!(base_url = %client.base_url(), "Using HTTP backend");
            Ok(client.hospital_api())
        }
        ApiBackend::Memory => {
            tracing::debug!("Using in-memory backend");
            Ok(create_hospital_api())
        }
    }
}

fn show_config(config: &AppConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output::print_json(config),
        OutputFormat::Table => {
            println!("{}: {}", "Base URL".cyan(), config.api.base_url);
            println!("{}: {} ms", "Timeout".cyan(), config.api.timeout_ms);
            println!("{}: {:?}", "Backend".cyan(), config.api.backend);
            println!("{}: {}", "Log level".cyan(), config.logging.level);
            println!("{}: {}", "Admin user".cyan(), config.auth.admin_user_id);
            Ok(())
        }
    }
}
