//! Route table and navigation plumbing for embedding shells.
//!
//! Routes mirror the web client's router: a static table of paths, each
//! naming a view and declaring whether it sits behind authentication. Per
//! transition, `guard::NavigationGuard` turns the table plus the session
//! check into a proceed-or-redirect decision.

pub mod guard;

use serde::Serialize;

pub use guard::{GuardOutcome, NavigationGuard, SessionCheck};

/// Where unauthenticated transitions to protected routes land
pub const LOGIN_PATH: &str = "/login";

/// The signup page, treated like the login page by the guard
pub const REGISTER_PATH: &str = "/register";

/// Where authenticated visits to the auth pages land
pub const HOME_PATH: &str = "/";

/// Sink for navigation side effects.
///
/// The guard and the request wrapper never move the UI themselves; they push
/// paths into whatever navigation the embedding shell runs.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Screens a shell can map routes onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewId {
    Home,
    Login,
    Register,
    Dashboard,
    ProfileEdit,
    PasswordEdit,
    Appearance,
    Tasks,
    TaskCreate,
    TaskShow,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewId,
    pub requires_auth: bool,
}

/// Route table matched by path, with `:param` placeholders.
///
/// Matching is first-match-wins in table order, so literal paths must be
/// listed before a parameterized sibling (`/tasks/create` before
/// `/tasks/:uuid`), the way the default table does.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The table entry matching `path`, if any. A `:param` segment in a
    /// route path matches any single non-empty segment.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        let path = strip_query(path);
        self.routes
            .iter()
            .find(|route| path_matches(route.path, path))
    }

    /// Whether `path` sits behind authentication. Unknown paths don't.
    pub fn requires_auth(&self, path: &str) -> bool {
        self.match_path(path)
            .map(|route| route.requires_auth)
            .unwrap_or(false)
    }
}

impl Default for RouteTable {
    /// The web client's full table: three public pages, the dashboard and
    /// settings screens, and the task screens
    fn default() -> Self {
        Self::with_routes(vec![
            Route {
                path: "/",
                name: "home",
                view: ViewId::Home,
                requires_auth: false,
            },
            Route {
                path: "/login",
                name: "login",
                view: ViewId::Login,
                requires_auth: false,
            },
            Route {
                path: "/register",
                name: "register",
                view: ViewId::Register,
                requires_auth: false,
            },
            Route {
                path: "/dashboard",
                name: "dashboard",
                view: ViewId::Dashboard,
                requires_auth: true,
            },
            Route {
                path: "/settings/profile",
                name: "profile.edit",
                view: ViewId::ProfileEdit,
                requires_auth: true,
            },
            Route {
                path: "/settings/password",
                name: "password.edit",
                view: ViewId::PasswordEdit,
                requires_auth: true,
            },
            Route {
                path: "/settings/appearance",
                name: "appearance",
                view: ViewId::Appearance,
                requires_auth: true,
            },
            Route {
                path: "/tasks",
                name: "tasks",
                view: ViewId::Tasks,
                requires_auth: true,
            },
            Route {
                path: "/tasks/create",
                name: "tasks.create",
                view: ViewId::TaskCreate,
                requires_auth: true,
            },
            Route {
                path: "/tasks/:uuid",
                name: "tasks.show",
                view: ViewId::TaskShow,
                requires_auth: true,
            },
        ])
    }
}

/// Drop a query string or fragment before matching
pub(crate) fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(pattern_segment), Some(path_segment)) => {
                // A :param placeholder accepts any single segment
                if pattern_segment.starts_with(':') {
                    continue;
                }
                if pattern_segment != path_segment {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_flags() {
        let table = RouteTable::default();
        assert!(!table.requires_auth("/"));
        assert!(!table.requires_auth("/login"));
        assert!(!table.requires_auth("/register"));
        assert!(table.requires_auth("/dashboard"));
        assert!(table.requires_auth("/settings/password"));
        assert!(table.requires_auth("/tasks"));
    }

    #[test]
    fn test_param_segment_matching() {
        let table = RouteTable::default();

        let show = table
            .match_path("/tasks/8f14e45f-ceea-467f-a8ce-1d6d2f1f9a3b")
            .unwrap();
        assert_eq!(show.name, "tasks.show");
        assert!(show.requires_auth);

        // The literal sibling wins over the parameterized route
        let create = table.match_path("/tasks/create").unwrap();
        assert_eq!(create.name, "tasks.create");

        // Too many segments for any pattern
        assert!(table.match_path("/tasks/abc/edit").is_none());
    }

    #[test]
    fn test_unknown_path_is_public() {
        let table = RouteTable::default();
        assert!(table.match_path("/about").is_none());
        assert!(!table.requires_auth("/about"));
    }

    #[test]
    fn test_query_and_trailing_slash() {
        let table = RouteTable::default();
        assert_eq!(
            table.match_path("/login?redirect=/dashboard").unwrap().name,
            "login"
        );
        assert_eq!(table.match_path("/dashboard/").unwrap().name, "dashboard");
        assert_eq!(table.match_path("/#top").unwrap().name, "home");
    }
}
