//! Labeled text input with an inline validation message.

use leptos::prelude::*;

#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let has_error = move || error.with(Option::is_some);

    view! {
        <div class="field" class:field--error=has_error>
            <label class="field__label" for=id>{label}</label>
            <input
                id=id
                class="field__input"
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=has_error>
                <p class="field__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
