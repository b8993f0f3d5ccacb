//! Route gating for the dashboard views.

use crate::auth::session::SessionState;
use tracing::warn;

/// Unauthenticated entry point.
pub const ENTRY_ROUTE: &str = "/";
/// Landing page after sign-in.
pub const HOME_ROUTE: &str = "/app";

const PROTECTED_PREFIXES: &[&str] = &[
    "/app",
    "/dashboard",
    "/bots",
    "/templates",
    "/campaigns",
    "/analytics",
    "/settings",
];

const PUBLIC_ROUTES: &[&str] = &["/", "/signup", "/forgot-password"];

/// What a view should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session still resolving; show a placeholder.
    Loading,
    Render,
    Redirect {
        to: String,
        /// Page the user was headed for, restored after sign-in.
        from: Option<String>,
    },
}

pub fn is_protected_route(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

/// Where to land after sign-in, given the page that triggered it.
pub fn redirect_path(from: Option<&str>) -> String {
    match from {
        Some(path) if !is_public_route(path) => path.to_string(),
        _ => HOME_ROUTE.to_string(),
    }
}

/// Gate for pages that need a signed-in user.
pub fn guard_protected(state: &SessionState, path: &str) -> RouteDecision {
    match state {
        SessionState::Initializing => RouteDecision::Loading,
        SessionState::Authenticated(_) => RouteDecision::Render,
        SessionState::Unauthenticated => {
            warn!("Unauthorized access attempt to: {}", path);
            RouteDecision::Redirect {
                to: ENTRY_ROUTE.to_string(),
                from: Some(path.to_string()),
            }
        }
    }
}

/// Gate for sign-in pages; signed-in users are sent to the dashboard.
pub fn guard_public(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Initializing => RouteDecision::Loading,
        SessionState::Authenticated(_) => RouteDecision::Redirect {
            to: HOME_ROUTE.to_string(),
            from: None,
        },
        SessionState::Unauthenticated => RouteDecision::Render,
    }
}
