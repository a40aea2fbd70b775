pub mod auth;
pub mod dashboards;
pub mod pages;
pub mod users;
