//! CLI command execution against the client-side stores.

use std::io::Write;

use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::application::dto::BootstrapOutcome;
use crate::application::stores::{IdentifierSetStore, IdentityStore};
use crate::application::{AppState, LoginUseCase};
use crate::domain::entities::{Credentials, Registration, SessionUser};
use crate::infrastructure::config::{Command, ListCommand};

/// Runs one CLI command and writes its human-readable result to `out`.
pub struct CommandRunner {
    login_use_case: LoginUseCase,
}

impl CommandRunner {
    /// Creates a runner that logs in and out through `login_use_case`.
    #[must_use]
    pub const fn new(login_use_case: LoginUseCase) -> Self {
        Self { login_use_case }
    }

    /// Executes `command` after the session bootstrap produced `outcome`.
    ///
    /// # Errors
    /// Returns error if login/registration fails or output cannot be written.
    pub async fn run<W: Write>(
        &self,
        command: Command,
        state: &mut AppState,
        outcome: &BootstrapOutcome,
        out: &mut W,
    ) -> Result<()> {
        debug!(command = command.name(), "Running command");

        match command {
            Command::Favorites(list) => run_list(&mut state.favorites, "favorites", list, out),
            Command::Compare(list) => run_list(&mut state.comparison, "comparison", list, out),
            Command::Session => write_session(&state.identity, outcome, out),
            Command::Login { email, password } => {
                let user = self
                    .login_use_case
                    .execute(Credentials::new(email, password), &mut state.identity)
                    .await
                    .wrap_err("Login failed")?;
                writeln!(out, "Logged in as {}", describe(&user))?;
                Ok(())
            }
            Command::Register {
                name,
                email,
                phone,
                password,
            } => {
                let mut registration = Registration::new(name, Credentials::new(email, password));
                if let Some(phone) = phone {
                    registration = registration.with_phone(phone);
                }
                let user = self
                    .login_use_case
                    .register(registration, &mut state.identity)
                    .await
                    .wrap_err("Registration failed")?;
                writeln!(out, "Registered and logged in as {}", describe(&user))?;
                Ok(())
            }
            Command::Logout => {
                self.login_use_case.logout(&mut state.identity).await;
                writeln!(out, "Logged out")?;
                Ok(())
            }
        }
    }
}

fn run_list<W: Write>(
    store: &mut IdentifierSetStore,
    label: &str,
    command: ListCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        ListCommand::Add { id } => {
            store.add(id.as_str());
            writeln!(out, "{id} is in {label}")?;
        }
        ListCommand::Remove { id } => {
            store.remove(&id);
            writeln!(out, "{id} is not in {label}")?;
        }
        ListCommand::Toggle { id } => {
            let state = if store.toggle(&id) { "added to" } else { "removed from" };
            writeln!(out, "{id} {state} {label}")?;
        }
        ListCommand::List => {
            if !store.is_hydrated() {
                writeln!(out, "{label}: not loaded yet")?;
                return Ok(());
            }
            if store.is_empty() {
                writeln!(out, "{label}: empty")?;
            }
            for id in store.ids() {
                writeln!(out, "{id}")?;
            }
        }
        ListCommand::Clear => {
            store.clear();
            writeln!(out, "{label} cleared")?;
        }
    }
    Ok(())
}

fn write_session<W: Write>(
    identity: &IdentityStore,
    outcome: &BootstrapOutcome,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "session check: {outcome}")?;
    match identity.user() {
        Some(user) if identity.is_authenticated() => {
            writeln!(out, "logged in as {}", describe(user))?;
            if let Some(phone) = user.phone() {
                writeln!(out, "phone: {phone}")?;
            }
        }
        _ => writeln!(out, "not logged in")?,
    }
    Ok(())
}

fn describe(user: &SessionUser) -> String {
    if user.name().is_empty() {
        format!("{} [{}]", user.email(), user.role())
    } else {
        format!("{} <{}> [{}]", user.name(), user.email(), user.role())
    }
}
