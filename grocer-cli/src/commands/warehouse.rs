//! Warehouse commands

use anyhow::Result;
use clap::Subcommand;
use grocer_core::domain::WarehouseForm;
use grocer_core::{LogEvent, LoggingService};

use super::account::AddressArgs;
use super::{get_context, log_event, required_field};
use crate::output;

#[derive(Subcommand)]
pub enum WarehouseCommands {
    /// Create a warehouse
    Create {
        /// Warehouse contact e-mail
        #[arg(long)]
        email: Option<String>,
        /// Warehouse contact number
        #[arg(long)]
        contact_number: Option<String>,
        /// E-mail of the warehouse administrator
        #[arg(long)]
        admin_email: Option<String>,
        /// Mark as the primary warehouse
        #[arg(long)]
        primary: bool,
        #[command(flatten)]
        address: AddressArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(logger: &Option<LoggingService>, command: WarehouseCommands) -> Result<()> {
    match command {
        WarehouseCommands::Create {
            email,
            contact_number,
            admin_email,
            primary,
            address,
            json,
        } => {
            let ctx = get_context(logger)?;

            let mut defaults = WarehouseForm::default().location;
            defaults.is_primary = primary;
            let form = WarehouseForm {
                email: required_field(email, "Warehouse email")?,
                contact_number: required_field(contact_number, "Contact number")?,
                warehouse_admin_email: required_field(admin_email, "Warehouse admin email")?,
                location: address.into_form(defaults)?,
            };

            let created = output::with_spinner("Creating warehouse...", json, || {
                ctx.warehouse_service.create(&form)
            })?;
            log_event(logger, LogEvent::new("warehouse_created").with_command("warehouse create"));

            if json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else {
                output::success(&format!(
                    "Warehouse created in {}, {}.",
                    created.city, created.state
                ));
                println!(
                    "Invite its administrator with 'grocer invite warehouse-admin --email {}'",
                    form.warehouse_admin_email.trim()
                );
            }
            Ok(())
        }
    }
}
