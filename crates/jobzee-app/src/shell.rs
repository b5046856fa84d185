//! Navigation shell: current route, gating, header and mobile menu.

use jobzee_models::Role;
use serde::Serialize;
use tracing::{debug, warn};

use crate::gate::GateDecision;
use crate::routes::Route;
use crate::session::SessionStore;

/// Longest redirect chain followed before giving up.
const MAX_REDIRECTS: usize = 4;

/// Mobile menu / dropdown state local to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    RouteChanged,
    OutsideClick,
}

impl MenuState {
    pub fn on(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (MenuState::Open, _) => MenuState::Closed,
            (MenuState::Closed, _) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Buttons in the header's user area that do something other than navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeaderAction {
    Logout,
}

impl HeaderAction {
    pub fn label(self) -> &'static str {
        match self {
            HeaderAction::Logout => "Logout",
        }
    }
}

/// Role-aware header contents for the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub links: Vec<NavLink>,
    /// Profile entry in the user area, shown as the picture when there is one.
    pub profile: NavLink,
    pub profile_picture: Option<String>,
    pub actions: Vec<HeaderAction>,
    pub menu: MenuState,
}

impl Header {
    pub fn labels(&self) -> Vec<&'static str> {
        self.links.iter().map(|l| l.label).collect()
    }

    pub fn active_link(&self) -> Option<&NavLink> {
        self.links.iter().find(|l| l.active)
    }
}

/// Result of entering a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    /// Where the redirect chain ended.
    pub route: Route,
    /// Routes redirected through, in order.
    pub redirects: Vec<Route>,
    /// The session is still resolving; the screen shows a placeholder.
    pub held: bool,
}

impl Navigation {
    pub fn rendered(&self) -> bool {
        !self.held
    }

    pub fn redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Owns the current route and header state for the page's lifetime.
#[derive(Debug)]
pub struct NavigationShell {
    store: SessionStore,
    current: Route,
    menu: MenuState,
}

impl NavigationShell {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            current: Route::Home,
            menu: MenuState::Closed,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    /// Feed a user interaction to the header menu.
    pub fn menu_event(&mut self, event: MenuEvent) -> MenuState {
        self.menu = self.menu.on(event);
        self.menu
    }

    /// Enter `path`, following gate redirects.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let requested = Route::parse(path);
        let navigation = self.enter(requested);

        self.current = navigation.route.clone();
        self.menu = self.menu.on(MenuEvent::RouteChanged);
        navigation
    }

    /// Re-check the current screen against the latest session, e.g. once a
    /// held screen's session has resolved.
    pub fn refresh(&mut self) -> Navigation {
        let navigation = self.enter(self.current.clone());
        if navigation.route != self.current {
            self.current = navigation.route.clone();
            self.menu = self.menu.on(MenuEvent::RouteChanged);
        }
        navigation
    }

    fn enter(&self, requested: Route) -> Navigation {
        let session = self.store.get();
        let mut route = requested.clone();
        let mut redirects = Vec::new();

        loop {
            match route.gate().check(&session) {
                GateDecision::Render => {
                    debug!(route = %route, "Rendering");
                    return Navigation {
                        requested,
                        route,
                        redirects,
                        held: false,
                    };
                }
                GateDecision::Hold => {
                    debug!(route = %route, "Holding until session resolves");
                    return Navigation {
                        requested,
                        route,
                        redirects,
                        held: true,
                    };
                }
                GateDecision::Redirect(next) => {
                    if redirects.len() >= MAX_REDIRECTS {
                        warn!(requested = %requested, at = %route, "Redirect chain too long");
                        return Navigation {
                            requested,
                            route,
                            redirects,
                            held: false,
                        };
                    }
                    debug!(from = %route, to = %next, "Redirecting");
                    redirects.push(route);
                    route = next;
                }
            }
        }
    }

    /// Header for the current screen; `None` on login and registration.
    pub fn header(&self) -> Option<Header> {
        if self.current.hides_header() {
            return None;
        }

        let session = self.store.get();
        let role = session.role();
        let current_path = self.current.path();

        let mut entries: Vec<(&'static str, &'static str)> =
            vec![("Home", "/"), ("All Jobs", "/job/getall")];
        if role == Some(Role::Employer) {
            entries.push(("Applicant's Applications", "/applications/me"));
            entries.push(("Post New Job", "/job/post"));
            entries.push(("View Your Jobs", "/job/me"));
        } else {
            entries.push(("My Applications", "/applications/me"));
        }
        if role == Some(Role::Admin) {
            entries.push(("Dashboard", "/admin"));
        }

        let links = entries
            .into_iter()
            .map(|(label, path)| NavLink {
                label,
                path,
                active: path == current_path,
            })
            .collect();

        let profile_path = Route::Profile.path();
        Some(Header {
            links,
            profile: NavLink {
                label: "Profile",
                path: "/profile",
                active: current_path == profile_path,
            },
            profile_picture: session.user().and_then(|u| u.profile_picture.clone()),
            actions: vec![HeaderAction::Logout],
            menu: self.menu,
        })
    }
}
