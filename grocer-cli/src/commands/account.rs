//! Account commands - sign in, sign up, logout, whoami

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use grocer_core::domain::{Credentials, LocationForm, SignupForm};
use grocer_core::services::token_fingerprint;
use grocer_core::{LogEvent, LoggingService, View};
use serde_json::json;

use super::{
    field_with_default, get_context, get_grocer_dir, log_event, optional_field, password_field,
    required_field,
};
use crate::output;

/// Address flags shared by sign-up and warehouse creation
#[derive(clap::Args, Debug, Default)]
pub struct AddressArgs {
    /// Address line 1
    #[arg(long)]
    pub address_line1: Option<String>,
    /// Address line 2
    #[arg(long)]
    pub address_line2: Option<String>,
    /// Address line 3
    #[arg(long)]
    pub address_line3: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Six digit PIN code
    #[arg(long)]
    pub pin_code: Option<String>,
}

impl AddressArgs {
    /// Fill missing address fields interactively on top of `defaults`
    pub fn into_form(self, defaults: LocationForm) -> Result<LocationForm> {
        Ok(LocationForm {
            address_line1: required_field(self.address_line1, "Address line 1")?,
            address_line2: optional_field(self.address_line2, "Address line 2 (optional)")?,
            address_line3: optional_field(self.address_line3, "Address line 3 (optional)")?,
            city: required_field(self.city, "City")?,
            state: required_field(self.state, "State")?,
            country: if defaults.country.is_empty() {
                required_field(self.country, "Country")?
            } else {
                field_with_default(self.country, "Country", &defaults.country)?
            },
            pin_code: required_field(self.pin_code, "PIN code")?,
            is_primary: defaults.is_primary,
        })
    }
}

pub fn run_signin(
    logger: &Option<LoggingService>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context(logger)?;

    let credentials = Credentials::new(
        required_field(email, "Email")?,
        password_field(password, "Password")?,
    );

    let result = output::with_spinner("Signing in...", json, || {
        ctx.account_service.sign_in(&credentials)
    });

    let landing = match result {
        Ok(view) => view,
        Err(e) => {
            log_event(
                logger,
                LogEvent::new("signin_failed")
                    .with_view(View::SignIn.path())
                    .with_command("signin")
                    .with_failure(&e),
            );
            return Err(e.into());
        }
    };

    let session = ctx.session();
    let user = session
        .user()?
        .ok_or_else(|| anyhow::anyhow!("Sign-in did not produce a session"))?;
    let token = session.token()?.unwrap_or_default();
    log_event(
        logger,
        LogEvent::new("signin_succeeded")
            .with_view(landing.path())
            .with_command("signin")
            .with_session_token(&token),
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "user": user,
                "landing": landing,
            }))?
        );
        return Ok(());
    }

    output::success(&format!("Signed in as {} ({})", user.user_name, user.user_type));
    match landing {
        View::SearchProducts => println!("Next: {}", "grocer product search <name>".bold()),
        _ => println!("Next: {}", "grocer dashboard".bold()),
    }
    Ok(())
}

#[derive(clap::Args, Debug, Default)]
pub struct SignupArgs {
    #[arg(long)]
    pub user_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Password (or GROCER_PASSWORD)
    #[arg(long)]
    pub password: Option<String>,
    /// Ten digit phone number
    #[arg(long)]
    pub phone_number: Option<String>,
    #[command(flatten)]
    pub address: AddressArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_signup(logger: &Option<LoggingService>, args: SignupArgs) -> Result<()> {
    let ctx = get_context(logger)?;

    let (password, confirm_password) = match args.password {
        Some(p) => (p.clone(), p),
        None => {
            let password = password_field(None, "Password")?;
            let confirm = if std::env::var(super::PASSWORD_ENV).is_ok() {
                password.clone()
            } else {
                password_field(None, "Confirm password")?
            };
            (password, confirm)
        }
    };

    let mut form = SignupForm {
        user_name: required_field(args.user_name, "Username")?,
        email: required_field(args.email, "Email")?,
        password,
        confirm_password,
        phone_number: required_field(args.phone_number, "Phone number")?,
        ..SignupForm::default()
    };
    // Report account errors before asking for the address
    form.validate_account().map_err(grocer_core::Error::from)?;
    form.location = args.address.into_form(LocationForm::default())?;

    output::with_spinner("Creating account...", args.json, || {
        ctx.account_service.sign_up(&form)
    })?;

    log_event(logger, LogEvent::new("signup_succeeded").with_command("signup"));

    if args.json {
        println!("{}", json!({ "created": true, "email": form.email.trim() }));
    } else {
        output::success("Account created.");
        println!("Sign in with {}", "grocer signin".bold());
    }
    Ok(())
}

/// Shown when the in-memory session is gone but its files are not
fn leftover_session_warning(grocer_dir: &Path) -> String {
    format!(
        "Signed out, but the saved session could not be removed and will be restored \
         next time. Delete {} to finish signing out.",
        grocer_dir.join("session").display()
    )
}

pub fn run_logout(logger: &Option<LoggingService>, json: bool) -> Result<()> {
    let ctx = get_context(logger)?;
    let session = ctx.session();
    let token = session.token()?;

    if let Err(e) = ctx.account_service.logout() {
        output::warning(&leftover_session_warning(&get_grocer_dir()?));
        log_event(
            logger,
            LogEvent::new("logout_failed")
                .with_command("logout")
                .with_failure(&e),
        );
        return Err(e.into());
    }

    if let Some(token) = &token {
        log_event(
            logger,
            LogEvent::new("logout")
                .with_command("logout")
                .with_session_token(token),
        );
    }

    if json {
        println!("{}", json!({ "signedOut": token.is_some() }));
    } else if token.is_some() {
        output::success("Signed out.");
    } else {
        output::info("Already signed out.");
    }
    Ok(())
}

pub fn run_whoami(logger: &Option<LoggingService>, json: bool) -> Result<()> {
    let ctx = get_context(logger)?;
    let session = ctx.session().snapshot()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "state": session.state(),
                "user": session.user(),
                "session": session.token().map(token_fingerprint),
            }))?
        );
        return Ok(());
    }

    match (session.user(), session.token()) {
        (Some(user), Some(token)) => {
            let mut table = output::create_table();
            table.add_row(vec!["Name", user.user_name.as_str()]);
            table.add_row(vec!["Email", user.email.as_str()]);
            table.add_row(vec!["Phone", &user.phone_number.to_string()]);
            table.add_row(vec!["Role", user.user_type.as_str()]);
            table.add_row(vec!["Status", user.status.as_str()]);
            table.add_row(vec!["Session", &token_fingerprint(token)]);
            println!("{}", user.user_type.dashboard_title().bold());
            println!("{}", table);
        }
        _ => {
            println!("Not signed in. Run {} to sign in.", "grocer signin".bold());
        }
    }
    Ok(())
}
