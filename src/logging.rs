//! Tracing setup and the audit/security log channels.
//!
//! Three channels exist, each backed by its own daily-rolling file:
//!
//! - `audit` target → `authentication.log` (login/logout audit trail)
//! - `security` target → `security.log` (denials, failed logins, lockouts)
//! - `ERROR` level → `errors.log`
//!
//! Components never reach for a global logger by name; they receive
//! [`AuditLog`] / [`SecurityLog`] handles from the application state and
//! emit through those.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const AUDIT_TARGET: &str = "audit";
pub const SECURITY_TARGET: &str = "security";

/// Handle for the authentication audit trail.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLog;

impl AuditLog {
    pub fn info(&self, message: &str) {
        info!(target: "audit", "{message}");
    }
}

/// Handle for the security event channel.
///
/// Severity escalates with the monitored state: routine events at info,
/// violations at warning, lockouts at critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityLog;

impl SecurityLog {
    pub fn info(&self, message: &str) {
        info!(target: "security", "{message}");
    }

    pub fn warning(&self, message: &str) {
        warn!(target: "security", "{message}");
    }

    pub fn critical(&self, message: &str) {
        error!(target: "security", critical = true, "{message}");
    }
}

/// Request/response log line pair with latency, adapted per status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency = start.elapsed();
    let status = response.status();

    match status.as_u16() {
        400..=499 => {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Client error"
            );
        }
        500..=599 => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Server error"
            );
        }
        _ => {
            info!(
                request_id = %request_id,
                method = %method,
                path = %matched_path,
                status = %status.as_u16(),
                latency_ms = %latency.as_millis(),
                "Request completed"
            );
        }
    }

    response
}

/// Initializes the tracing subscriber: console output plus the three
/// rolling files under `storage/logs`.
pub fn init_tracing() {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let log_dir = "storage/logs";
    fs::create_dir_all(log_dir).expect("Failed to create logs directory");

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,audit=info,security=info,tower_http=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_filter(console_filter);

    // Audit trail: every login/logout event.
    let audit_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "authentication.log");
    let audit_layer = fmt::layer()
        .with_writer(audit_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("audit=info"));

    // Security channel: denials, failed attempts, lockouts.
    let security_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "security.log");
    let security_layer = fmt::layer()
        .with_writer(security_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("security=info"));

    // Errors from anywhere.
    let error_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "errors.log");
    let error_layer = fmt::layer()
        .with_writer(error_appender)
        .with_target(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Structured JSON stream for ingestion.
    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "portal.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(audit_layer)
        .with(security_layer)
        .with(error_layer)
        .with(json_layer)
        .init();

    info!("Tracing initialized with file logging");
}
