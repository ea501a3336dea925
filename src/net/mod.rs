//! Networking modules for the REST backend and the Google SDK.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves raw HTTP, `api` adds auth headers and the response
//! envelope, `types` defines the auth payloads, and `google` wraps the
//! third-party sign-in popup.

pub mod api;
pub mod google;
pub mod transport;
pub mod types;
