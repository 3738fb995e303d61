//! Invite commands - onboard administrators

use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::Select;
use grocer_core::domain::{AppAdminInviteForm, WarehouseAdminInviteForm};
use grocer_core::{LogEvent, LoggingService, UserType};

use super::{get_context, log_event, required_field};
use crate::output;

#[derive(Subcommand)]
pub enum InviteCommands {
    /// Invite an application administrator
    AppAdmin {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        /// ZEPTO_APP_ADMIN, SYSTEM or MAINT
        #[arg(long)]
        role: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Invite a warehouse administrator
    WarehouseAdmin {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn administrative_roles() -> Vec<UserType> {
    UserType::ALL
        .into_iter()
        .filter(UserType::is_administrative)
        .collect()
}

fn pick_role(role: Option<String>) -> Result<UserType> {
    if let Some(role) = role {
        return role
            .parse::<UserType>()
            .map_err(|e| anyhow!("Invalid role '{}': {}", role, e));
    }
    let roles = administrative_roles();
    if !atty::is(atty::Stream::Stdin) {
        return Ok(UserType::ZeptoAppAdmin);
    }
    let labels: Vec<&str> = roles.iter().map(UserType::as_str).collect();
    let selected = Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(roles[selected])
}

pub fn run(logger: &Option<LoggingService>, command: InviteCommands) -> Result<()> {
    match command {
        InviteCommands::AppAdmin {
            name,
            email,
            phone_number,
            role,
            json,
        } => {
            let ctx = get_context(logger)?;
            let form = AppAdminInviteForm {
                user_name: required_field(name, "Name")?,
                email: required_field(email, "Email")?,
                phone_number: required_field(phone_number, "Phone number")?,
                user_type: pick_role(role)?,
            };

            let invite = output::with_spinner("Sending invitation...", json, || {
                ctx.invite_service.invite_app_admin(&form)
            })?;
            log_event(logger, LogEvent::new("app_admin_invited").with_command("invite app-admin"));

            if json {
                println!("{}", serde_json::to_string_pretty(&invite)?);
            } else {
                output::success(&format!(
                    "Invited {} as {} (status {}).",
                    invite.email, invite.user_type, invite.status
                ));
            }
            Ok(())
        }
        InviteCommands::WarehouseAdmin {
            name,
            email,
            phone_number,
            json,
        } => {
            let ctx = get_context(logger)?;
            let form = WarehouseAdminInviteForm {
                user_name: required_field(name, "Name")?,
                email: required_field(email, "Email")?,
                phone_number: required_field(phone_number, "Phone number")?,
            };

            let invite = output::with_spinner("Sending invitation...", json, || {
                ctx.invite_service.invite_warehouse_admin(&form)
            })?;
            log_event(
                logger,
                LogEvent::new("warehouse_admin_invited").with_command("invite warehouse-admin"),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&invite)?);
            } else {
                output::success(&format!("Invitation sent to {}.", invite.email));
            }
            Ok(())
        }
    }
}
