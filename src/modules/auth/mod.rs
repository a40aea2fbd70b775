//! Authentication: login/logout/registration flow, the authentication
//! event log, and account lockout.

pub mod controller;
pub mod events;
pub mod lockout;
pub mod model;
pub mod router;
pub mod service;
