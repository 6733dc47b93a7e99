//! Rendering surface: one mount point holding the current view, its title,
//! named regions and the transaction dialog.
//!
//! Controllers only talk to [`Renderer`]; frontends read a [`Surface`].

use std::collections::BTreeMap;

use bankapi::TransactionDraft;
use serde::Serialize;
use tokio::sync::watch;
use tracing::trace;

use super::router::View;

/// Named regions updated in place without a route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    Description,
    Balance,
    Currency,
    Transactions,
    LoginError,
    RegisterError,
    TransactionError,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Region::Description => "description",
            Region::Balance => "balance",
            Region::Currency => "currency",
            Region::Transactions => "transactions",
            Region::LoginError => "loginError",
            Region::RegisterError => "registerError",
            Region::TransactionError => "transactionError",
        }
    }
}

impl View {
    /// Regions present in this view's template.
    pub fn regions(self) -> &'static [Region] {
        match self {
            View::Login => &[Region::LoginError, Region::RegisterError],
            View::Dashboard => &[
                Region::Description,
                Region::Balance,
                Region::Currency,
                Region::Transactions,
                Region::TransactionError,
            ],
        }
    }
}

/// One row of the transactions table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub object: String,
    pub amount: String,
}

/// Contents of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Rows(Vec<TransactionRow>),
}

/// Everything a controller may do to the screen.
pub trait Renderer {
    /// Replace the mount point's contents with a fresh instance of `view`.
    fn mount(&mut self, view: View);

    fn set_title(&mut self, title: &str);

    /// Replace a region's contents. Regions missing from the mounted view
    /// are left alone.
    fn update_region(&mut self, region: Region, content: Content);

    /// Show the transaction dialog with `form`, or hide it with `None`.
    fn set_dialog(&mut self, form: Option<TransactionDraft>);
}

/// In-memory rendering surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Surface {
    pub title: String,
    pub view: Option<View>,
    pub regions: BTreeMap<Region, Content>,
    pub dialog: Option<TransactionDraft>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a region, if it holds text.
    pub fn text(&self, region: Region) -> Option<&str> {
        match self.regions.get(&region) {
            Some(Content::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Rows of a region; empty when it holds none.
    pub fn rows(&self, region: Region) -> &[TransactionRow] {
        match self.regions.get(&region) {
            Some(Content::Rows(rows)) => rows,
            _ => &[],
        }
    }

    /// First non-empty error slot of the current view.
    pub fn error(&self) -> Option<&str> {
        [
            Region::LoginError,
            Region::RegisterError,
            Region::TransactionError,
        ]
        .into_iter()
        .filter_map(|region| self.text(region))
        .find(|text| !text.is_empty())
    }
}

impl Renderer for Surface {
    fn mount(&mut self, view: View) {
        self.view = Some(view);
        self.regions.clear();
        self.dialog = None;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn update_region(&mut self, region: Region, content: Content) {
        match self.view {
            Some(view) if view.regions().contains(&region) => {
                self.regions.insert(region, content);
            }
            _ => trace!(region = region.id(), "region not in current view"),
        }
    }

    fn set_dialog(&mut self, form: Option<TransactionDraft>) {
        if form.is_some() && self.view != Some(View::Dashboard) {
            return;
        }
        self.dialog = form;
    }
}

/// A [`Surface`] published through a `watch` channel, so a frontend can
/// redraw from the latest state while a controller is mid-request.
pub struct SharedSurface {
    tx: watch::Sender<Surface>,
}

impl SharedSurface {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Surface::new());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Surface> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Surface {
        self.tx.borrow().clone()
    }
}

impl Default for SharedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SharedSurface {
    fn mount(&mut self, view: View) {
        self.tx.send_modify(|s| s.mount(view));
    }

    fn set_title(&mut self, title: &str) {
        self.tx.send_modify(|s| s.set_title(title));
    }

    fn update_region(&mut self, region: Region, content: Content) {
        self.tx.send_modify(|s| s.update_region(region, content));
    }

    fn set_dialog(&mut self, form: Option<TransactionDraft>) {
        self.tx.send_modify(|s| s.set_dialog(form));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_replaces_previous_content() {
        let mut surface = Surface::new();
        surface.mount(View::Dashboard);
        surface.update_region(Region::Balance, Content::Text("10.00".into()));
        surface.set_dialog(Some(TransactionDraft::default()));

        surface.mount(View::Login);
        assert_eq!(surface.view, Some(View::Login));
        assert!(surface.regions.is_empty());
        assert!(surface.dialog.is_none());
    }

    #[test]
    fn test_regions_outside_view_are_ignored() {
        let mut surface = Surface::new();
        surface.mount(View::Login);
        surface.update_region(Region::Balance, Content::Text("10.00".into()));
        assert!(surface.text(Region::Balance).is_none());

        surface.update_region(Region::LoginError, Content::Text("nope".into()));
        assert_eq!(surface.error(), Some("nope"));
    }

    #[test]
    fn test_shared_surface_publishes_changes() {
        let mut shared = SharedSurface::new();
        let mut rx = shared.subscribe();
        shared.mount(View::Login);
        shared.set_title("Login");
        assert!(rx.has_changed().unwrap());
        let surface = rx.borrow_and_update().clone();
        assert_eq!(surface.title, "Login");
        assert_eq!(surface.view, Some(View::Login));
    }

    #[test]
    fn test_surface_json_uses_region_ids() {
        let mut surface = Surface::new();
        surface.mount(View::Login);
        surface.update_region(Region::LoginError, Content::Text("bad".into()));
        let json = serde_json::to_value(&surface).unwrap();
        assert_eq!(json["regions"]["loginError"], "bad");
        assert_eq!(json["view"], "login");
    }
}
