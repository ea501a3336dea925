//! Route guards for protected and public-only pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both guards re-check the session on every render of their route, so an
//! expired token is caught on the next navigation. The decision itself is a
//! pure function; the components only apply it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::state::session::Session;

/// Entry point for unauthenticated users.
pub const LOGIN_PATH: &str = "/login";
/// Default landing location for authenticated users.
pub const HOME_PATH: &str = "/";

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Redirect {
        to: &'static str,
        /// Originally requested location, kept for a post-login return.
        from: Option<String>,
    },
}

/// Navigation options for auth redirects: replace the current history entry
/// so Back never lands on a page that would redirect again.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Join a path and raw query string into one location.
pub fn requested_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Decide access to a route that requires a valid session.
pub fn protected_access(authenticated: bool, requested: &str) -> Access {
    if authenticated {
        Access::Allowed
    } else {
        let from = (requested != LOGIN_PATH).then(|| requested.to_owned());
        Access::Redirect { to: LOGIN_PATH, from }
    }
}

/// Decide access to a route only meant for signed-out users.
pub fn public_only_access(authenticated: bool) -> Access {
    if authenticated {
        Access::Redirect { to: HOME_PATH, from: None }
    } else {
        Access::Allowed
    }
}

/// Render `children` only with a valid session; otherwise redirect to `/login`
/// and remember where the user was headed.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<Session>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let requested = requested_location(&location.pathname.get_untracked(), &location.search.get_untracked());

    match protected_access(session.is_authenticated(), &requested) {
        Access::Allowed => children().into_any(),
        Access::Redirect { to, from } => {
            auth.update(|s| s.return_to = from);
            view! { <Redirect path=to options=redirect_options()/> }.into_any()
        }
    }
}

/// Render `children` only without a valid session; otherwise redirect home.
#[component]
pub fn PublicOnlyRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<Session>();

    match public_only_access(session.is_authenticated()) {
        Access::Allowed => children().into_any(),
        Access::Redirect { to, .. } => view! { <Redirect path=to options=redirect_options()/> }.into_any(),
    }
}
