use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use hospital_core::{Doctor, Patient, Prescription, ResourceKind, Visit};
use hospital_store::{HospitalStore, StoreRecord};

use crate::cli::OutputFormat;
use crate::output::print_records;

fn read_body(file: &Option<String>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_records<R: StoreRecord>(body: &str) -> Result<Vec<R>> {
    serde_json::from_str(body)
        .with_context(|| format!("Expected a JSON array of {} records", R::KIND))
}

pub fn list(store: &HospitalStore, kind: ResourceKind, format: OutputFormat) -> Result<()> {
    match kind {
        ResourceKind::Patient => print_records(kind, &store.records::<Patient>(), format),
        ResourceKind::Doctor => print_records(kind, &store.records::<Doctor>(), format),
        ResourceKind::Visit => print_records(kind, &store.records::<Visit>(), format),
        ResourceKind::Prescription => {
            print_records(kind, &store.records::<Prescription>(), format)
        }
    }
}

/// Bulk-saves the records in `file` through the store.
pub async fn import(
    store: &HospitalStore,
    kind: ResourceKind,
    file: &Option<String>,
) -> Result<()> {
    let body = read_body(file)?;
    let appended = match kind {
        ResourceKind::Patient => persist::<Patient>(store, &body).await?,
        ResourceKind::Doctor => persist::<Doctor>(store, &body).await?,
        ResourceKind::Visit => persist::<Visit>(store, &body).await?,
        ResourceKind::Prescription => persist::<Prescription>(store, &body).await?,
    };
    tracing::info!(%kind, appended, "Import finished");
    Ok(())
}

async fn persist<R: StoreRecord>(store: &HospitalStore, body: &str) -> Result<usize> {
    let records = parse_records::<R>(body)?;
    if records.is_empty() {
        anyhow::bail!("No {} records in input", R::KIND);
    }
    Ok(store.persist_many(records).await?)
}

pub async fn delete(store: &HospitalStore, kind: ResourceKind, id: &str) -> Result<()> {
    store.delete_one(kind, id).await?;
    Ok(())
}
