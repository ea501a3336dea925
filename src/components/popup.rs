//! Global popup with auto-close progress bar.
//!
//! Mount once at the app root. Anything holding a `Notifier` can raise it.

use leptos::prelude::*;

use crate::state::popup::{PopupNotifier, PopupStore};
use crate::util::{clock, popup_timer};

#[component]
pub fn Popup(#[prop(optional)] on_close: Option<Callback<()>>) -> impl IntoView {
    let store = expect_context::<RwSignal<PopupStore>>();
    let notifier = PopupNotifier::new(store);
    let now = RwSignal::new(clock::now_ms());
    popup_timer::install(store, now, on_close);

    let container_class = move || {
        store.with(|s| {
            let phase = if s.is_open() { "popup--open" } else { "popup--closing" };
            format!("popup {} {phase}", s.state().variant.css_class())
        })
    };
    let progress = move || store.with(|s| format!("{:.1}%", s.progress(now.get())));

    view! {
        <Show when=move || store.with(PopupStore::is_mounted)>
            <div class="popup-anchor">
                <div class=container_class role="alert">
                    <div class="popup__header">
                        <div>
                            <h3 class="popup__heading">{move || store.with(|s| s.state().heading.clone())}</h3>
                            <p class="popup__message">{move || store.with(|s| s.state().message.clone())}</p>
                        </div>
                        <button class="popup__close" aria-label="Dismiss" on:click=move |_| notifier.hide_popup()>
                            "✕"
                        </button>
                    </div>
                </div>
                <div class="popup__track">
                    <div class="popup__bar" style:width=progress></div>
                </div>
            </div>
        </Show>
    }
}
