use clap::{Parser, Subcommand, ValueEnum};
use hospital_core::{Portal, ResourceKind};

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital records client: load, inspect and edit patients, doctors, visits and prescriptions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (defaults to ./hospital.toml)
    #[arg(short, long, global = true, env = "HOSPITAL_CONFIG")]
    pub config: Option<String>,

    /// API base URL (overrides config)
    #[arg(short, long, global = true, env = "HOSPITAL_URL")]
    pub server: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show load status and record counts
    Status,
    /// List the records of one resource
    List(ListArgs),
    /// Save records from a JSON array file
    Import(ImportArgs),
    /// Delete a record by id
    Delete(DeleteArgs),
    /// Check credentials against a portal
    Login(LoginArgs),
    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Resource (patient, doctor, visit, prescription; plural accepted)
    pub resource: ResourceKind,
}

#[derive(clap::Args)]
pub struct ImportArgs {
    /// Resource (patient, doctor, visit, prescription; plural accepted)
    pub resource: ResourceKind,
    /// Path to a JSON file holding an array of records (reads stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Resource (patient, doctor, visit, prescription; plural accepted)
    pub resource: ResourceKind,
    /// Value of the record's id field (e.g. patient_id)
    pub id: String,
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// User id
    #[arg(short, long)]
    pub user: String,
    /// Password
    #[arg(long, env = "HOSPITAL_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Portal to log in through
    #[arg(long, default_value = "admin")]
    pub portal: Portal,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective config
    Show,
}
