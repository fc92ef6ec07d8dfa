use anyhow::Result;
use colored::Colorize;
use hospital_store::HospitalStore;

use crate::cli::{LoginArgs, OutputFormat};
use crate::output::{print_json, print_success};

pub fn login(store: &HospitalStore, args: &LoginArgs, format: OutputFormat) -> Result<()> {
    let user = store.login(&args.user, &args.password, args.portal)?;
    match format {
        OutputFormat::Json => print_json(&store.auth()),
        OutputFormat::Table => {
            print_success(&format!(
                "Logged in as {} ({})",
                user.user_id.cyan(),
                user.role
            ));
            Ok(())
        }
    }
}
