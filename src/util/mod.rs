//! Framework-light helpers: validation, token checks, route guards and
//! browser shims.

pub mod clock;
pub mod guard;
pub mod popup_timer;
pub mod storage;
pub mod token;
pub mod validation;
