//! Response hardening.
//!
//! Runs as the outermost stage so it wraps every response the pipeline can
//! produce, including guard short-circuits. Headers go in with
//! `HeaderMap::insert`, so applying the stage twice leaves each name with a
//! single, final value.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthenticatedRequest;

pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let authenticated = response
        .extensions()
        .get::<AuthenticatedRequest>()
        .is_some();
    apply_security_headers(response.headers_mut(), authenticated);

    response
}

/// Stamps the uniform security headers; unauthenticated responses also get
/// cache suppression so anonymous agents never see a cached page from a
/// prior login in the same browser.
pub fn apply_security_headers(headers: &mut HeaderMap, authenticated: bool) {
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if !authenticated {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("max-age=0, no-cache, no-store, must-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }
}
