//! Path-based router over a fixed route table.
//!
//! Resolution mounts the route's view, sets the title and hands back the
//! route's initializer for the caller to run. Unknown paths (including `/`)
//! are normalized by navigating to [`DEFAULT_ROUTE`]. There are no guards:
//! the dashboard's own initializer deals with a missing session.

use serde::Serialize;
use tracing::debug;

use super::history::History;
use super::surface::Renderer;

pub const DEFAULT_ROUTE: &str = "/dashboard";
pub const LOGIN_ROUTE: &str = "/login";

/// View templates the router can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Login,
    Dashboard,
}

/// Work a route asks for once its view is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    RefreshDashboard,
}

/// Static route descriptor.
#[derive(Debug)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub view: View,
    pub init: Option<Initializer>,
}

pub static ROUTES: &[Route] = &[
    Route {
        path: DEFAULT_ROUTE,
        title: "My Account",
        view: View::Dashboard,
        init: Some(Initializer::RefreshDashboard),
    },
    Route {
        path: LOGIN_ROUTE,
        title: "Login",
        view: View::Login,
        init: None,
    },
];

/// Find the route for a location, ignoring any query or fragment.
pub fn lookup(location: &str) -> Option<&'static Route> {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find(|r| r.path == path)
}

pub struct Router {
    history: History,
}

impl Router {
    /// Create a router whose current location is `location`. Nothing is
    /// rendered until [`Router::resolve_and_render`] is called.
    pub fn new(location: &str) -> Self {
        Self {
            history: History::new(location),
        }
    }

    pub fn location(&self) -> &str {
        self.history.location()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Push `path` onto the history and render it.
    pub fn navigate<R: Renderer>(&mut self, path: &str, renderer: &mut R) -> Option<Initializer> {
        debug!(path, "navigate");
        self.history.push(path);
        self.resolve_and_render(renderer)
    }

    /// Render the current location without touching the history.
    ///
    /// This is also the popstate handler.
    pub fn resolve_and_render<R: Renderer>(&mut self, renderer: &mut R) -> Option<Initializer> {
        let Some(route) = lookup(self.history.location()) else {
            debug!(location = self.history.location(), "no route, redirecting");
            return self.navigate(DEFAULT_ROUTE, renderer);
        };

        renderer.mount(route.view);
        renderer.set_title(route.title);
        route.init
    }

    /// Browser "back". Returns `false` when there is nowhere to go.
    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    /// Browser "forward". Returns `false` when there is nowhere to go.
    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::surface::Surface;

    #[test]
    fn test_unknown_path_redirects_to_dashboard() {
        let mut router = Router::new("/nonexistent");
        let mut surface = Surface::new();
        let init = router.resolve_and_render(&mut surface);

        assert_eq!(router.location(), DEFAULT_ROUTE);
        assert_eq!(surface.title, "My Account");
        assert_eq!(surface.view, Some(View::Dashboard));
        assert_eq!(init, Some(Initializer::RefreshDashboard));
        assert_eq!(router.history().entries(), ["/nonexistent", DEFAULT_ROUTE]);
    }

    #[test]
    fn test_root_path_redirects_to_dashboard() {
        let mut router = Router::new("/");
        let mut surface = Surface::new();
        router.resolve_and_render(&mut surface);
        assert_eq!(router.location(), DEFAULT_ROUTE);
    }

    #[test]
    fn test_navigate_to_login_has_no_initializer() {
        let mut router = Router::new("/dashboard");
        let mut surface = Surface::new();
        let init = router.navigate(LOGIN_ROUTE, &mut surface);
        assert_eq!(init, None);
        assert_eq!(surface.title, "Login");
        assert_eq!(surface.view, Some(View::Login));
    }

    #[test]
    fn test_query_is_ignored_for_lookup() {
        assert_eq!(lookup("/login?next=x").map(|r| r.view), Some(View::Login));
        assert!(lookup("/login/extra").is_none());
    }

    #[test]
    fn test_popstate_does_not_push() {
        let mut router = Router::new("/login");
        let mut surface = Surface::new();
        router.resolve_and_render(&mut surface);
        router.navigate(DEFAULT_ROUTE, &mut surface);
        assert_eq!(router.history().depth(), 2);

        assert!(router.back());
        router.resolve_and_render(&mut surface);
        assert_eq!(router.location(), LOGIN_ROUTE);
        assert_eq!(surface.view, Some(View::Login));
        assert_eq!(router.history().depth(), 2);
    }
}
