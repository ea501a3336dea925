//! Browser timers driving the popup store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PopupStore` says which single timer it wants armed; this module keeps the
//! matching `gloo_timers` handle in a slot next to the store. Storing a new
//! handle drops the old one, and dropping a `Timeout` cancels it, so a
//! replaced or dismissed popup can never be closed by a stale timer. Both
//! slots belong to the component's owner and are dropped with it.

use leptos::prelude::*;

use crate::state::popup::PopupStore;

/// Progress bar refresh interval.
pub const PROGRESS_TICK_MS: u32 = 100;

/// Keep the store's pending timer armed and refresh `now` while the popup is
/// open. `on_close` runs once each time a popup finishes fading out.
pub fn install(store: RwSignal<PopupStore>, now: RwSignal<f64>, on_close: Option<Callback<()>>) {
    #[cfg(feature = "csr")]
    {
        use gloo_timers::callback::{Interval, Timeout};

        use crate::util::clock;

        let timer_slot = StoredValue::new_local(None::<Timeout>);
        let tick_slot = StoredValue::new_local(None::<Interval>);

        Effect::new(move || {
            let pending = store.with(PopupStore::pending_timer);
            let open = store.with(PopupStore::is_open);

            timer_slot.set_value(pending.map(|timer| {
                Timeout::new(timer.delay_from(clock::now_ms()), move || {
                    let closed = store.try_update(|s| s.fire(timer, clock::now_ms())).flatten();
                    if closed.is_some() {
                        if let Some(on_close) = on_close {
                            on_close.run(());
                        }
                    }
                })
            }));

            now.set(clock::now_ms());
            tick_slot.set_value(open.then(|| Interval::new(PROGRESS_TICK_MS, move || now.set(clock::now_ms()))));
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (store, now, on_close);
    }
}
