//! Dashboard command - what the signed-in role can do

use anyhow::Result;
use colored::Colorize;
use grocer_core::domain::{access, Access};
use grocer_core::{Capability, Error, LoggingService, UserType, View};
use serde::Serialize;

use super::get_context;
use crate::output;

/// CLI invocation behind each dashboard card
pub fn command_for(capability: Capability) -> &'static str {
    match capability {
        Capability::SearchProducts => "grocer product search",
        Capability::InviteAppAdmin => "grocer invite app-admin",
        Capability::InviteWarehouseAdmin => "grocer invite warehouse-admin",
        Capability::CreateWarehouse => "grocer warehouse create",
        Capability::RegisterProduct => "grocer product register",
        Capability::AssignProduct => "grocer product assign",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardOutput {
    title: &'static str,
    user_type: UserType,
    cards: Vec<CardOutput>,
}

#[derive(Serialize)]
struct CardOutput {
    capability: Capability,
    title: &'static str,
    description: &'static str,
    view: &'static str,
    command: &'static str,
}

pub fn run(logger: &Option<LoggingService>, json: bool) -> Result<()> {
    let ctx = get_context(logger)?;
    let session = ctx.session().snapshot()?;

    if access(View::Dashboard, &session) == Access::RedirectToSignIn {
        return Err(Error::NotAuthenticated.into());
    }
    let Some(user) = session.user() else {
        return Err(Error::NotAuthenticated.into());
    };
    let capabilities = user.user_type.capabilities();

    if json {
        let output = DashboardOutput {
            title: user.user_type.dashboard_title(),
            user_type: user.user_type,
            cards: capabilities
                .iter()
                .map(|c| CardOutput {
                    capability: *c,
                    title: c.title(),
                    description: c.description(),
                    view: c.view().path(),
                    command: command_for(*c),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", user.user_type.dashboard_title().bold());
    println!("Welcome, {}", user.user_name);
    println!();

    if capabilities.is_empty() {
        output::warning("No dashboard available for your user type.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Action", "Description", "Command"]);
    for capability in capabilities {
        table.add_row(vec![
            capability.title(),
            capability.description(),
            command_for(*capability),
        ]);
    }
    println!("{}", table);
    Ok(())
}
