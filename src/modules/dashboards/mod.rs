//! Public pages and per-role dashboards.

pub mod controller;
pub mod router;
