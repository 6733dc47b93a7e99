//! View controllers: login, registration, dashboard and the transaction
//! dialog.
//!
//! Each operation runs "request, await reply, replace state, re-render" in
//! order. Dashboard updates redraw regions in place; only login, register
//! and logout change page through the router.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bankapi::{Account, AccountDraft, Bank, Transaction, TransactionDraft};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};

use super::router::{Initializer, Router, DEFAULT_ROUTE, LOGIN_ROUTE};
use super::store::{StateChange, Store};
use super::surface::{Content, Region, Renderer, TransactionRow};

pub struct App<R: Renderer> {
    bank: Bank,
    store: Store,
    router: Router,
    renderer: R,
}

impl<R: Renderer> App<R> {
    /// Assemble the client at `location`. Call [`App::init`] to render.
    pub fn new(bank: Bank, store: Store, renderer: R, location: &str) -> Self {
        Self {
            bank,
            store,
            router: Router::new(location),
            renderer,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Restore the saved session, then render the current location.
    pub async fn init(&mut self) {
        self.store.restore();
        self.update_route().await;
    }

    // --- Navigation ---

    pub async fn navigate(&mut self, path: &str) {
        let init = self.router.navigate(path, &mut self.renderer);
        self.run_initializer(init).await;
    }

    /// Re-render the current location without a new history entry.
    pub async fn update_route(&mut self) {
        let init = self.router.resolve_and_render(&mut self.renderer);
        self.run_initializer(init).await;
    }

    /// Browser "back"; re-renders through the popstate path.
    pub async fn back(&mut self) -> bool {
        if !self.router.back() {
            return false;
        }
        self.update_route().await;
        true
    }

    /// Browser "forward"; re-renders through the popstate path.
    pub async fn forward(&mut self) -> bool {
        if !self.router.forward() {
            return false;
        }
        self.update_route().await;
        true
    }

    async fn run_initializer(&mut self, init: Option<Initializer>) {
        match init {
            Some(Initializer::RefreshDashboard) => self.refresh().await,
            None => {}
        }
    }

    // --- Login / register ---

    pub async fn login(&mut self, user: &str) {
        match self.bank.get_account(user).await {
            Ok(account) => {
                info!(user = %account.user, "logged in");
                self.store.replace(StateChange::Account(Some(account)));
                self.navigate(DEFAULT_ROUTE).await;
            }
            Err(e) => {
                self.renderer
                    .update_region(Region::LoginError, Content::Text(e.error));
            }
        }
    }

    pub async fn register(&mut self, draft: &AccountDraft) {
        match self.bank.create_account(draft).await {
            Ok(account) => {
                info!(user = %account.user, "registered");
                self.store.replace(StateChange::Account(Some(account)));
                self.navigate(DEFAULT_ROUTE).await;
            }
            Err(e) => {
                self.renderer
                    .update_region(Region::RegisterError, Content::Text(e.error));
            }
        }
    }

    /// Clear the session and go to the login page.
    ///
    /// Boxed because it closes the navigate -> refresh -> logout cycle.
    pub fn logout(&mut self) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            info!("logged out");
            self.store.replace(StateChange::Account(None));
            self.navigate(LOGIN_ROUTE).await;
        })
    }

    // --- Dashboard ---

    /// Re-fetch the account, then redraw the dashboard.
    pub async fn refresh(&mut self) {
        if self.update_account_data().await {
            self.update_dashboard().await;
        }
    }

    /// Re-fetch the account. Any failure ends the session; a dead account
    /// and an unreachable service are not told apart. Returns whether the
    /// session survived.
    pub async fn update_account_data(&mut self) -> bool {
        let Some(account) = self.store.account() else {
            self.logout().await;
            return false;
        };

        match self.bank.get_account(&account.user).await {
            Ok(fresh) => {
                self.store.replace(StateChange::Account(Some(fresh)));
                true
            }
            Err(e) => {
                warn!(user = %account.user, error = %e, "refresh failed, ending session");
                self.logout().await;
                false
            }
        }
    }

    /// Full redraw of the dashboard regions from the live snapshot.
    pub async fn update_dashboard(&mut self) {
        let Some(account) = self.store.account() else {
            return self.logout().await;
        };

        let r = &mut self.renderer;
        r.update_region(Region::Description, Content::Text(account.description.clone()));
        r.update_region(Region::Balance, Content::Text(format_amount(account.balance)));
        r.update_region(Region::Currency, Content::Text(account.currency.clone()));
        r.update_region(
            Region::Transactions,
            Content::Rows(account.transactions.iter().map(transaction_row).collect()),
        );
    }

    // --- Transaction dialog ---

    /// Open the dialog with a blank form dated today.
    pub fn add_transaction(&mut self) {
        self.renderer.set_dialog(Some(TransactionDraft {
            date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            ..Default::default()
        }));
    }

    /// Submit a transaction. The dialog closes before the request goes out;
    /// on success local state is rebuilt from the server's echoed record,
    /// never from `draft`.
    pub async fn confirm_transaction(&mut self, draft: &TransactionDraft) {
        self.renderer.set_dialog(None);

        let Some(account) = self.store.account() else {
            return self.logout().await;
        };

        match self.bank.create_transaction(&account.user, draft).await {
            Ok(recorded) => {
                info!(user = %account.user, amount = %recorded.amount, "transaction recorded");
                let next = reconcile(&account, recorded);
                self.store.replace(StateChange::Account(Some(next)));
                self.update_dashboard().await;
            }
            Err(e) => {
                self.renderer
                    .update_region(Region::TransactionError, Content::Text(e.error));
            }
        }
    }

    pub fn cancel_transaction(&mut self) {
        self.renderer.set_dialog(None);
    }
}

/// Apply a server-confirmed transaction to the account it was submitted
/// against: balance plus the recorded amount, record appended.
pub fn reconcile(account: &Arc<Account>, recorded: Transaction) -> Account {
    let mut next = Account::clone(account);
    next.balance += recorded.amount;
    next.transactions.push(recorded);
    next
}

/// Two decimals, halves rounded away from zero.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn transaction_row(tx: &Transaction) -> TransactionRow {
    TransactionRow {
        date: tx.date.clone(),
        object: tx.object.clone(),
        amount: format_amount(tx.amount),
    }
}
