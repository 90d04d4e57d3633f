use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::mailer::MailError;

/// Terminal outcomes of a contact submission other than success.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Method not allowed.")]
    MethodNotAllowed,
    #[error("Missing required fields.")]
    MissingFields,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Failed to build email message: {0}")]
    Compose(String),
    #[error("Failed to send email: {0}")]
    Delivery(#[from] MailError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::MissingFields | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
            ContactError::Compose(_) | ContactError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        // Server-side failure details stay in the logs.
        let body = match &self {
            ContactError::Compose(_) | ContactError::Delivery(_) => {
                "Failed to send email.".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), body).into_response()
    }
}
