//! Landing page for signed-in users.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuthManager;
use crate::util::guard::{LOGIN_PATH, redirect_options};

#[component]
pub fn HomePage() -> impl IntoView {
    let manager = expect_context::<AppAuthManager>();
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        manager.sign_out();
        navigate(LOGIN_PATH, redirect_options());
    };

    view! {
        <div class="home">
            <header class="home__header">
                <span class="home__brand">"FinGPT"</span>
                <button class="home__sign-out" type="button" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
            <main class="home__main">
                <h1>"You're signed in"</h1>
            </main>
        </div>
    }
}
