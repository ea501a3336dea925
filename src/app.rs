//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::popup::Popup;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::transport::BrowserTransport;
use crate::pages::{home::HomePage, login::LoginPage};
use crate::state::auth::{AuthManager, AuthState};
use crate::state::popup::{PopupNotifier, PopupStore};
use crate::state::session::Session;
use crate::util::guard::{ProtectedRoute, PublicOnlyRoute};

/// Auth manager wired to `fetch` and the global popup.
pub type AppAuthManager = AuthManager<BrowserTransport, PopupNotifier>;

/// Root application component.
///
/// Provides the session, auth state, popup store and auth manager contexts and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (config, rejected) = ClientConfig::from_env_or_default();
    if let Some(e) = rejected {
        leptos::logging::warn!("{e}; using {}", config.api_base_url);
    }

    let session = Session::browser();
    let auth = RwSignal::new(AuthState::default());
    let popup = RwSignal::new(PopupStore::new(config.popup));
    let api = ApiClient::new(config.api_base_url.clone(), BrowserTransport, session.clone());
    let manager: AppAuthManager = AuthManager::new(api, config.endpoints.clone(), PopupNotifier::new(popup));

    provide_context(session);
    provide_context(auth);
    provide_context(popup);
    provide_context(manager);
    provide_context(config);

    view! {
        <Title text="FinGPT"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <PublicOnlyRoute><LoginPage/></PublicOnlyRoute> }
                />
                <Route
                    path=StaticSegment("")
                    view=|| view! { <ProtectedRoute><HomePage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
        <Popup/>
    }
}
