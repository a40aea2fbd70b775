//! Minimal HTML shells.
//!
//! The real template layer is outside this core; handlers emit just enough
//! markup to carry the page title and pending notices.

use axum::response::Html;

use crate::notify::FlashMessage;

pub fn render(title: &str, body: &str, flashes: &[FlashMessage]) -> Html<String> {
    let mut notices = String::new();
    for flash in flashes {
        let level = match flash.level {
            crate::notify::Severity::Info => "info",
            crate::notify::Severity::Success => "success",
            crate::notify::Severity::Warning => "warning",
            crate::notify::Severity::Error => "danger",
        };
        notices.push_str(&format!(
            "<div class=\"alert alert-{level}\">{}</div>\n",
            escape(&flash.message)
        ));
    }

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n{notices}<main>{body}</main>\n</body>\n</html>\n",
        escape(title)
    ))
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
