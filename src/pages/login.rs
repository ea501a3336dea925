//! Sign-in / sign-up page with Google and Apple social login.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public-only route. Field errors render inline under each input; backend
//! failures arrive as popups raised by the auth manager. After any successful
//! sign-in the page navigates to the location the route guard remembered.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuthManager;
use crate::components::field::TextField;
use crate::config::ClientConfig;
use crate::net::google;
use crate::state::auth::{AuthOperation, AuthState, SocialPayload, SocialProvider};
use crate::util::guard::redirect_options;
use crate::util::validation::{AuthMode, Credentials, Field, ValidationErrors};

/// Static text that changes with the form mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormCopy {
    pub title: &'static str,
    pub submit: &'static str,
    pub toggle_prompt: &'static str,
    pub toggle_action: &'static str,
}

pub fn form_copy(mode: AuthMode) -> FormCopy {
    match mode {
        AuthMode::SignIn => FormCopy {
            title: "Welcome back",
            submit: "Continue",
            toggle_prompt: "Don't have an account?",
            toggle_action: "Sign up",
        },
        AuthMode::SignUp => FormCopy {
            title: "Create your account",
            submit: "Create account",
            toggle_prompt: "Already have an account?",
            toggle_action: "Log in",
        },
    }
}

pub fn toggled(mode: AuthMode) -> AuthMode {
    match mode {
        AuthMode::SignIn => AuthMode::SignUp,
        AuthMode::SignUp => AuthMode::SignIn,
    }
}

pub fn operation_for(mode: AuthMode) -> AuthOperation {
    match mode {
        AuthMode::SignIn => AuthOperation::SignIn,
        AuthMode::SignUp => AuthOperation::SignUp,
    }
}

/// Collect the form fields relevant to `mode`.
pub fn credentials_for(mode: AuthMode, full_name: String, email: String, password: String, confirm: String) -> Credentials {
    match mode {
        AuthMode::SignIn => Credentials::sign_in(email, password),
        AuthMode::SignUp => Credentials::sign_up(full_name, email, password, confirm),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let manager = expect_context::<AppAuthManager>();
    let config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthMode::SignIn);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::default());
    let busy = Memo::new(move |_| auth.with(AuthState::is_busy));

    let field_error = move |field: Field| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_owned)));

    // Navigate to wherever the guard sent us from.
    let go_back = move || {
        let target = auth.try_update(AuthState::take_return_to).unwrap_or_else(|| "/".to_owned());
        navigate(&target, redirect_options());
    };

    let on_submit = {
        let manager = manager.clone();
        let go_back = go_back.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get_untracked() {
                return;
            }
            errors.set(ValidationErrors::default());
            let current = mode.get_untracked();
            let op = operation_for(current);
            let creds = credentials_for(
                current,
                full_name.get_untracked(),
                email.get_untracked(),
                password.get_untracked(),
                confirm.get_untracked(),
            );
            let manager = manager.clone();
            let go_back = go_back.clone();
            auth.update(|s| s.begin(op));
            leptos::task::spawn_local(async move {
                let result = match current {
                    AuthMode::SignIn => manager.login(&creds).await,
                    AuthMode::SignUp => manager.sign_up(&creds).await,
                };
                auth.update(|s| s.finish(op, &result));
                match result {
                    Ok(_) => go_back(),
                    Err(e) => {
                        if let Some(field_errors) = e.field_errors() {
                            errors.set(field_errors.clone());
                        }
                    }
                }
            });
        }
    };

    let on_social = move |provider: SocialProvider| {
        if busy.get_untracked() {
            return;
        }
        let manager = manager.clone();
        let go_back = go_back.clone();
        let client_id = config.google_client_id.clone();
        let op = AuthOperation::Social(provider);
        auth.update(|s| s.begin(op));
        leptos::task::spawn_local(async move {
            let payload = match provider {
                SocialProvider::Google => match google::request_auth_code(client_id.as_deref()).await {
                    Ok(code) => SocialPayload::AuthCode(code),
                    Err(message) => SocialPayload::Failed(message),
                },
                SocialProvider::Apple => SocialPayload::Failed(String::new()),
            };
            let result = manager.social_login(provider, payload).await;
            auth.update(|s| s.finish(op, &result));
            if result.is_ok() {
                go_back();
            }
        });
    };
    let on_google = {
        let on_social = on_social.clone();
        move |_| on_social(SocialProvider::Google)
    };
    let on_apple = move |_| on_social(SocialProvider::Apple);

    let on_toggle = move |_| {
        errors.set(ValidationErrors::default());
        mode.update(|m| *m = toggled(*m));
    };
    let is_sign_up = move || mode.get() == AuthMode::SignUp;
    let copy = move || form_copy(mode.get());

    view! {
        <div class="onboarding">
            <header class="onboarding__header">"FinGPT"</header>
            <main class="onboarding__main">
                <form class="auth-form" on:submit=on_submit>
                    <h1 class="auth-form__title">{move || copy().title}</h1>
                    <Show when=is_sign_up>
                        <TextField id="fullName" label="Full name" value=full_name error=field_error(Field::FullName)/>
                    </Show>
                    <TextField
                        id="email"
                        label="Email address"
                        input_type="email"
                        value=email
                        error=field_error(Field::Email)
                    />
                    <TextField
                        id="password"
                        label="Password"
                        input_type="password"
                        value=password
                        error=field_error(Field::Password)
                    />
                    <Show when=is_sign_up>
                        <TextField
                            id="confirmPassword"
                            label="Confirm password"
                            input_type="password"
                            value=confirm
                            error=field_error(Field::ConfirmPassword)
                        />
                    </Show>
                    <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Please wait..." } else { copy().submit }}
                    </button>
                    <p class="auth-form__toggle">
                        {move || copy().toggle_prompt}
                        " "
                        <button class="link-button" type="button" on:click=on_toggle>
                            {move || copy().toggle_action}
                        </button>
                    </p>
                </form>
                <div class="divider"><span>"OR"</span></div>
                <div class="social-buttons">
                    <button class="social-button" type="button" disabled=move || busy.get() on:click=on_google>
                        "Continue with Google"
                    </button>
                    <button class="social-button" type="button" disabled=move || busy.get() on:click=on_apple>
                        "Continue with Apple"
                    </button>
                </div>
            </main>
        </div>
    }
}
