//! Client state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the persisted token, `auth` the in-flight operations and
//! `popup` the single global notification.

pub mod auth;
pub mod popup;
pub mod session;
