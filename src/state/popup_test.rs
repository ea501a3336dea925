use super::*;

fn store() -> PopupStore {
    PopupStore::new(PopupTimings { auto_close_ms: 5000, fade_ms: 300 })
}

fn error(heading: &str, message: &str) -> PopupRequest {
    PopupRequest::new(heading, message).with_variant(PopupVariant::Error)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn store_starts_closed_with_info_variant() {
    let s = PopupStore::default();
    assert!(!s.is_open());
    assert!(!s.is_mounted());
    assert_eq!(s.state().variant, PopupVariant::Info);
    assert_eq!(s.pending_timer(), None);
}

#[test]
fn request_defaults_to_info() {
    assert_eq!(PopupRequest::new("h", "m").variant, PopupVariant::Info);
}

// =============================================================
// show / hide
// =============================================================

#[test]
fn show_popup_opens_with_content() {
    let mut s = store();
    s.show_popup(error("Signin Failed!", "Invalid credentials"), 0.0);
    assert_eq!(
        s.state(),
        &PopupState {
            open: true,
            heading: "Signin Failed!".to_owned(),
            message: "Invalid credentials".to_owned(),
            variant: PopupVariant::Error,
        }
    );
    let timer = s.pending_timer().unwrap();
    assert_eq!(timer.kind, TimerKind::Dismiss);
    assert_eq!(timer.fires_at_ms, 5000.0);
}

#[test]
fn second_show_replaces_content_and_restarts_countdown() {
    let mut s = store();
    s.show_popup(PopupRequest::new("first", "one"), 0.0);
    let first_timer = s.pending_timer().unwrap();

    s.show_popup(error("second", "two"), 4000.0);
    assert_eq!(s.state().heading, "second");
    assert_eq!(s.state().message, "two");
    assert_eq!(s.state().variant, PopupVariant::Error);

    let timer = s.pending_timer().unwrap();
    assert_eq!(timer.fires_at_ms, 9000.0);
    assert_ne!(timer.generation, first_timer.generation);

    // The superseded countdown fires on schedule but must not close the new popup.
    assert_eq!(s.fire(first_timer, 5000.0), None);
    assert!(s.is_open());
    assert_eq!(s.state().heading, "second");
}

#[test]
fn hide_popup_when_closed_is_noop() {
    let mut s = store();
    let before = s.generation();
    s.hide_popup(10.0);
    assert!(!s.is_open());
    assert!(!s.is_mounted());
    assert_eq!(s.generation(), before);
    assert_eq!(s.pending_timer(), None);
}

#[test]
fn hide_popup_is_idempotent_while_fading() {
    let mut s = store();
    s.show_popup(PopupRequest::new("h", "m"), 0.0);
    s.hide_popup(100.0);
    let fade = s.pending_timer().unwrap();
    s.hide_popup(200.0);
    assert_eq!(s.pending_timer(), Some(fade));
}

#[test]
fn manual_dismiss_cancels_countdown_and_waits_for_fade() {
    let mut s = store();
    s.show_popup(PopupRequest::new("h", "m"), 0.0);
    let countdown = s.pending_timer().unwrap();

    s.hide_popup(1000.0);
    assert!(!s.is_open());
    assert!(s.is_mounted());

    let fade = s.pending_timer().unwrap();
    assert_eq!(fade.kind, TimerKind::Fade);
    assert_eq!(fade.fires_at_ms, 1300.0);

    assert_eq!(s.fire(countdown, 5000.0), None);
    assert_eq!(s.fire(fade, 1300.0), Some(PopupClosed));
    assert!(!s.is_mounted());
    assert_eq!(s.pending_timer(), None);
}

// =============================================================
// Auto-dismiss
// =============================================================

#[test]
fn countdown_expiry_closes_then_fades() {
    let mut s = store();
    s.show_popup(PopupRequest::new("h", "m"), 0.0);

    let countdown = s.pending_timer().unwrap();
    assert_eq!(s.fire(countdown, 5000.0), None);
    assert!(!s.is_open());
    assert!(s.is_mounted());

    let fade = s.pending_timer().unwrap();
    assert_eq!(fade.kind, TimerKind::Fade);
    assert_eq!(fade.fires_at_ms, 5300.0);
    assert_eq!(s.fire(fade, 5300.0), Some(PopupClosed));
    assert!(!s.is_mounted());
}

#[test]
fn reopening_during_fade_cancels_fade() {
    let mut s = store();
    s.show_popup(PopupRequest::new("a", "a"), 0.0);
    s.hide_popup(100.0);
    let fade = s.pending_timer().unwrap();

    s.show_popup(PopupRequest::new("b", "b"), 200.0);
    assert_eq!(s.fire(fade, 400.0), None);
    assert!(s.is_open());
    assert_eq!(s.pending_timer().unwrap().kind, TimerKind::Dismiss);
}

#[test]
fn only_one_timer_is_pending_at_a_time() {
    let mut s = store();
    s.show_popup(PopupRequest::new("a", "a"), 0.0);
    s.show_popup(PopupRequest::new("b", "b"), 10.0);
    s.show_popup(PopupRequest::new("c", "c"), 20.0);
    let timer = s.pending_timer().unwrap();
    assert_eq!(timer.generation, s.generation());
    assert_eq!(timer.fires_at_ms, 5020.0);
}

// =============================================================
// Progress
// =============================================================

#[test]
fn progress_decreases_linearly() {
    let mut s = store();
    s.show_popup(PopupRequest::new("h", "m"), 1000.0);
    assert_eq!(s.progress(1000.0), 100.0);
    assert_eq!(s.progress(2250.0), 75.0);
    assert_eq!(s.progress(3500.0), 50.0);
    assert_eq!(s.progress(6000.0), 0.0);
    assert_eq!(s.progress(9000.0), 0.0);
}

#[test]
fn progress_is_zero_when_not_showing() {
    let mut s = store();
    assert_eq!(s.progress(0.0), 0.0);
    s.show_popup(PopupRequest::new("h", "m"), 0.0);
    s.hide_popup(10.0);
    assert_eq!(s.progress(10.0), 0.0);
}

#[test]
fn delay_from_never_goes_negative() {
    let timer = PendingTimer { generation: 1, kind: TimerKind::Dismiss, fires_at_ms: 5000.0 };
    assert_eq!(timer.delay_from(0.0), 5000);
    assert_eq!(timer.delay_from(4999.5), 1);
    assert_eq!(timer.delay_from(6000.0), 0);
}

#[test]
fn variant_css_classes_are_distinct() {
    let classes = [
        PopupVariant::Success.css_class(),
        PopupVariant::Error.css_class(),
        PopupVariant::Warning.css_class(),
        PopupVariant::Info.css_class(),
    ];
    for (i, a) in classes.iter().enumerate() {
        for b in &classes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
