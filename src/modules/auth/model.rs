use serde::Deserialize;
use validator::{Validate, ValidationErrors};

// Login form posted from the login page.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

// Registration form. Charset, password-strength and uniqueness checks that
// need more than an attribute live in the service.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long."))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub password: String,
    /// Must equal `password`; cross-field checks live in the service.
    pub password_confirm: String,
    /// Wire string of a role; defaults to `USUARIO` when absent.
    pub role: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

/// Flattens validator output into flashable messages.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect()
}
