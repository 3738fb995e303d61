//! Config command - show and change client settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use grocer_core::config::{Config, Source, API_URL_ENV};
use serde_json::json;

use super::get_grocer_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective settings and where they come from
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the client at a different marketplace backend
    SetUrl {
        /// Base URL, e.g. https://market.example.com
        url: String,
    },
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Default => "default",
        Source::File => "settings.json",
        Source::Env => "environment",
    }
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let grocer_dir = get_grocer_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&grocer_dir)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "directory": grocer_dir.to_string_lossy(),
                        "apiUrl": config.api_url,
                        "apiUrlSource": config.api_url_source,
                        "timeoutSecs": config.timeout_secs,
                        "timeoutSource": config.timeout_source,
                    }))?
                );
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value", "Source"]);
            table.add_row(vec![
                "Directory",
                &grocer_dir.display().to_string(),
                "",
            ]);
            table.add_row(vec![
                "API URL",
                config.api_url.as_str(),
                source_label(config.api_url_source),
            ]);
            table.add_row(vec![
                "Timeout",
                &format!("{}s", config.timeout_secs),
                source_label(config.timeout_source),
            ]);
            println!("{}", table);
        }
        ConfigCommands::SetUrl { url } => {
            std::fs::create_dir_all(&grocer_dir)?;
            let mut config = Config::load(&grocer_dir)?;
            let env_override = config.api_url_source == Source::Env;
            config.set_api_url(&url)?;
            config.save(&grocer_dir)?;

            output::success(&format!("Marketplace URL set to {}", config.api_url));
            if env_override {
                println!(
                    "{}",
                    format!("Note: {} is set and still takes precedence.", API_URL_ENV).yellow()
                );
            }
        }
    }
    Ok(())
}
