//! Global popup notification state.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`PopupStore`] lives in an `RwSignal` provided at the app root. Any
//! code holding a [`Notifier`] can raise a popup; the `Popup` component
//! renders it and `util::popup_timer` drives its timers.
//!
//! DESIGN
//! ======
//! The store owns its single pending timer as data ([`PendingTimer`]) rather
//! than as a closure. Every transition that replaces content or closes the
//! popup bumps `generation`, so a timer that fires after being superseded is
//! recognized as stale and ignored. Time is passed in as milliseconds, which
//! keeps the state machine deterministic under test.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use leptos::prelude::*;

use crate::config::PopupTimings;

/// Severity driving a popup's styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopupVariant {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl PopupVariant {
    /// CSS modifier used by the `Popup` component.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "popup--success",
            Self::Error => "popup--error",
            Self::Warning => "popup--warning",
            Self::Info => "popup--info",
        }
    }
}

/// Content for [`PopupStore::show_popup`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupRequest {
    pub heading: String,
    pub message: String,
    pub variant: PopupVariant,
}

impl PopupRequest {
    /// An INFO popup.
    pub fn new(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self { heading: heading.into(), message: message.into(), variant: PopupVariant::Info }
    }

    #[must_use]
    pub fn with_variant(mut self, variant: PopupVariant) -> Self {
        self.variant = variant;
        self
    }
}

/// What the rendering layer reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupState {
    pub open: bool,
    pub heading: String,
    pub message: String,
    pub variant: PopupVariant,
}

/// What a pending timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Auto-close countdown elapsed.
    Dismiss,
    /// Exit animation finished; unmount and notify.
    Fade,
}

/// The one timer the store currently wants armed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTimer {
    pub generation: u64,
    pub kind: TimerKind,
    pub fires_at_ms: f64,
}

impl PendingTimer {
    /// Milliseconds from `now_ms` until this timer should fire, never negative.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delay_from(&self, now_ms: f64) -> u32 {
        (self.fires_at_ms - now_ms).clamp(0.0, f64::from(u32::MAX)).ceil() as u32
    }
}

/// Emitted when a popup has fully closed (fade finished).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopupClosed;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Hidden,
    Showing { opened_at_ms: f64 },
    FadingOut { closing_at_ms: f64 },
}

/// Popup state plus its auto-dismiss/fade lifecycle.
#[derive(Clone, Debug)]
pub struct PopupStore {
    state: PopupState,
    phase: Phase,
    generation: u64,
    timings: PopupTimings,
}

impl Default for PopupStore {
    fn default() -> Self {
        Self::new(PopupTimings::default())
    }
}

impl PopupStore {
    pub fn new(timings: PopupTimings) -> Self {
        Self { state: PopupState::default(), phase: Phase::Hidden, generation: 0, timings }
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Whether the popup is in the DOM: open, or closed but still fading out.
    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Hidden)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open with `request`, replacing whatever is shown, and restart the countdown.
    pub fn show_popup(&mut self, request: PopupRequest, now_ms: f64) {
        self.generation += 1;
        self.state = PopupState {
            open: true,
            heading: request.heading,
            message: request.message,
            variant: request.variant,
        };
        self.phase = Phase::Showing { opened_at_ms: now_ms };
    }

    /// Close and start the fade window. No-op when already closed.
    pub fn hide_popup(&mut self, now_ms: f64) {
        if !self.state.open {
            return;
        }
        self.generation += 1;
        self.state.open = false;
        self.phase = Phase::FadingOut { closing_at_ms: now_ms };
    }

    /// The timer that should be armed now, if any.
    pub fn pending_timer(&self) -> Option<PendingTimer> {
        match self.phase {
            Phase::Hidden => None,
            Phase::Showing { opened_at_ms } => Some(PendingTimer {
                generation: self.generation,
                kind: TimerKind::Dismiss,
                fires_at_ms: opened_at_ms + f64::from(self.timings.auto_close_ms),
            }),
            Phase::FadingOut { closing_at_ms } => Some(PendingTimer {
                generation: self.generation,
                kind: TimerKind::Fade,
                fires_at_ms: closing_at_ms + f64::from(self.timings.fade_ms),
            }),
        }
    }

    /// Apply a fired timer. Stale timers (older generation) are ignored.
    ///
    /// Returns [`PopupClosed`] when a fade completes, which is the moment the
    /// close callback should run.
    pub fn fire(&mut self, timer: PendingTimer, now_ms: f64) -> Option<PopupClosed> {
        if timer.generation != self.generation {
            return None;
        }
        match (timer.kind, self.phase) {
            (TimerKind::Dismiss, Phase::Showing { .. }) => {
                self.hide_popup(now_ms);
                None
            }
            (TimerKind::Fade, Phase::FadingOut { .. }) => {
                self.phase = Phase::Hidden;
                Some(PopupClosed)
            }
            _ => None,
        }
    }

    /// Remaining countdown as a percentage, 100 at open and 0 at expiry.
    pub fn progress(&self, now_ms: f64) -> f64 {
        match self.phase {
            Phase::Showing { opened_at_ms } => {
                let total = f64::from(self.timings.auto_close_ms.max(1));
                let remaining = 1.0 - (now_ms - opened_at_ms) / total;
                (remaining * 100.0).clamp(0.0, 100.0)
            }
            Phase::Hidden | Phase::FadingOut { .. } => 0.0,
        }
    }
}

/// Anything that can raise a popup.
pub trait Notifier {
    fn show_popup(&self, request: PopupRequest);
}

/// [`Notifier`] writing into the app's `RwSignal<PopupStore>`.
#[derive(Clone, Copy, Debug)]
pub struct PopupNotifier {
    store: RwSignal<PopupStore>,
}

impl PopupNotifier {
    pub fn new(store: RwSignal<PopupStore>) -> Self {
        Self { store }
    }

    /// Close the popup now, starting its fade.
    pub fn hide_popup(&self) {
        let now = crate::util::clock::now_ms();
        self.store.update(|s| s.hide_popup(now));
    }
}

impl Notifier for PopupNotifier {
    fn show_popup(&self, request: PopupRequest) {
        let now = crate::util::clock::now_ms();
        self.store.update(|s| s.show_popup(request, now));
    }
}
