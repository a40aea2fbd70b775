//! Request pipeline stages.
//!
//! The authorization core is this chain, composed in `router.rs`:
//!
//! 1. [`security_headers`] (outermost) — hardening headers on every
//!    response, cache suppression for unauthenticated traffic
//! 2. [`session_guard`] — cookie → session → account resolution and the
//!    absolute session-age ceiling
//! 3. [`role`] — role-to-route enforcement and generic-dashboard
//!    resolution
//!
//! A stage that rejects a request answers with a redirect directly; the
//! stages outside it still run on that response.

pub mod auth;
pub mod role;
pub mod security_headers;
pub mod session_guard;
