//! One-shot commands: load the saved session, perform one action, print
//! the resulting surface.

use std::io;

use bankapi::Bank;
use tracing::info;

use crate::app::{App, FileStorage, Store, Surface, DEFAULT_ROUTE, LOGIN_ROUTE};
use crate::cli::SessionCommand;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::output;

pub async fn run(config: &AppConfig, command: SessionCommand, json: bool) -> Result<(), AppError> {
    let bank = Bank::new(config.bank_config())?;
    let store = Store::new(Box::new(FileStorage::new(&config.data_dir)));

    // Pages that need a session start on the dashboard so a stale session
    // is evicted before anything else happens.
    let location = match command {
        SessionCommand::Show | SessionCommand::Add(_) => DEFAULT_ROUTE,
        _ => LOGIN_ROUTE,
    };
    let needs_session = !matches!(command, SessionCommand::Logout);
    let mut app = App::new(bank, store, Surface::new(), location);
    app.init().await;

    match command {
        SessionCommand::Login(args) => app.login(&args.user).await,
        SessionCommand::Register(args) => app.register(&args.into()).await,
        SessionCommand::Show => {}
        SessionCommand::Add(args) => {
            if app.store().account().is_some() {
                app.add_transaction();
                let mut draft = app.renderer().dialog.clone().unwrap_or_default();
                if let Some(date) = args.date {
                    draft.date = date;
                }
                draft.object = args.object;
                draft.amount = args.amount;
                app.confirm_transaction(&draft).await;
            }
        }
        SessionCommand::Logout => app.logout().await,
    }

    let surface = app.renderer();
    output::write_surface(&mut io::stdout().lock(), surface, json)?;
    if let Some(balance) = output::balance_line(surface) {
        info!(balance = %balance, location = app.router().location(), "done");
    }
    outcome(surface, needs_session && app.store().account().is_none())
}

/// Map the final surface onto the process outcome.
fn outcome(surface: &Surface, missing_session: bool) -> Result<(), AppError> {
    if let Some(error) = surface.error() {
        return Err(AppError::Rejected(error.to_string()));
    }
    if missing_session {
        return Err(AppError::NotSignedIn);
    }
    Ok(())
}
