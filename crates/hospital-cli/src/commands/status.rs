use anyhow::Result;
use colored::Colorize;
use hospital_core::ResourceKind;
use hospital_store::{HospitalStore, LoadStatus};
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;
use crate::output::print_json;

pub fn status(store: &HospitalStore, format: OutputFormat) -> Result<()> {
    let state = store.state();
    match format {
        OutputFormat::Json => print_json(&json!({
            "backend": store.api().backend_name(),
            "ready": state.load.is_settled(),
            "resources": ResourceKind::ALL
                .iter()
                .map(|k| json!({
                    "resource": k.plural(),
                    "load": state.load.get(*k),
                    "count": state.count(*k),
                }))
                .collect::<Vec<_>>(),
        })),
        OutputFormat::Table => {
            println!("{}: {}", "Backend".cyan(), store.api().backend_name());
            let mut builder = Builder::default();
            builder.push_record(["Resource", "Status", "Records"]);
            for (kind, load) in state.load.iter() {
                builder.push_record([
                    kind.plural().to_string(),
                    describe(load),
                    state.count(kind).to_string(),
                ]);
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{table}");
            Ok(())
        }
    }
}

fn describe(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Pending => "pending".yellow().to_string(),
        LoadStatus::Ready => "ready".green().to_string(),
        LoadStatus::Failed(message) => format!("{} ({message})", "failed".red()),
    }
}
