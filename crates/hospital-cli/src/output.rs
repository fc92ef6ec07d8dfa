use anyhow::Result;
use colored::Colorize;
use hospital_core::{Notification, NotificationLevel, ResourceKind};
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::cli::OutputFormat;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints every notification already published, without waiting.
pub fn flush_notifications(rx: &mut broadcast::Receiver<Notification>) {
    loop {
        match rx.try_recv() {
            Ok(n) => print_notification(&n),
            Err(TryRecvError::Lagged(skipped)) => {
                print_error(&format!("{skipped} notifications dropped"));
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn print_notification(n: &Notification) {
    match n.level {
        NotificationLevel::Success => print_success(&n.message),
        NotificationLevel::Error => print_error(&n.message),
    }
}

/// Prints a collection as JSON or as a table of its main columns.
pub fn print_records<R: Serialize>(
    kind: ResourceKind,
    records: &[R],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No {} found.", kind.plural());
                return Ok(());
            }
            let columns = table_columns(kind);
            let mut builder = Builder::default();
            builder.push_record(columns.iter().copied());
            for record in records {
                let value = serde_json::to_value(record)?;
                builder.push_record(columns.iter().map(|c| cell(value.get(*c))));
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
            println!("Total: {}", records.len());
            Ok(())
        }
    }
}

fn table_columns(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Patient => &["patient_id", "full_name", "age", "gender", "insurance_type"],
        ResourceKind::Doctor => &["doctor_id", "full_name", "specialization", "department"],
        ResourceKind::Visit => &[
            "visit_id",
            "patient_id",
            "doctor_id",
            "visit_date",
            "visit_type",
            "severity_score",
        ],
        ResourceKind::Prescription => &[
            "prescription_id",
            "patient_id",
            "medication_name",
            "dosage",
            "frequency",
        ],
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| cell(Some(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_rendering() {
        assert_eq!(cell(None), "-");
        assert_eq!(cell(Some(&Value::Null)), "-");
        assert_eq!(cell(Some(&json!("OP"))), "OP");
        assert_eq!(cell(Some(&json!(7))), "7");
        assert_eq!(cell(Some(&json!(54.0))), "54");
        assert_eq!(cell(Some(&json!(2.5))), "2.5");
        assert_eq!(cell(Some(&json!(["Asthma", "Diabetes"]))), "Asthma, Diabetes");
    }

    #[test]
    fn test_columns_start_with_id_field() {
        for kind in ResourceKind::ALL {
            assert_eq!(table_columns(kind)[0], kind.id_field());
        }
    }
}
