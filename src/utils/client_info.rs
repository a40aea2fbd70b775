use axum::http::HeaderMap;

/// Client address and user agent attached to authentication events.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    /// Extracts client details from request headers.
    ///
    /// `X-Forwarded-For` wins when a proxy chain is present; only the first
    /// hop is trusted for logging purposes.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.trim().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Self { ip, user_agent }
    }
}
