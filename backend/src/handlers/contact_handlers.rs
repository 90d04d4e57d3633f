use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use lettre::{
    message::{header::ContentType, Mailbox},
    Address, Message,
};

use crate::{
    error::ContactError,
    handlers::contact_dtos::{Lead, LeadForm},
    AppState,
};

/// Relays one contact form submission to the configured recipient.
///
/// Validation happens before any mail is composed; delivery is attempted once.
/// A body that is not a urlencoded form reads as an empty one.
pub async fn send_lead(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LeadForm>, FormRejection>,
) -> Result<impl IntoResponse, ContactError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Unreadable contact form body: {}", rejection);
            LeadForm::default()
        }
    };
    let lead = Lead::from(form);
    if !lead.has_required_fields() {
        tracing::debug!("Rejected lead: missing required fields");
        return Err(ContactError::MissingFields);
    }
    let reply_to = parse_reply_to(&lead.email)?;

    let message = compose(&state, &lead, reply_to)?;
    tracing::info!("Attempting to deliver lead from {}", lead.email);
    match state.mailer.deliver(message).await {
        Ok(()) => {
            tracing::info!("Lead from {} delivered", lead.email);
            Ok((
                StatusCode::FOUND,
                [(header::LOCATION, state.config.contact_redirect())],
            ))
        }
        Err(e) => {
            tracing::error!("Failed to deliver lead from {}: {:?}", lead.email, e);
            Err(ContactError::Delivery(e))
        }
    }
}

/// Parses the visitor's address for `Reply-To`.
///
/// Beyond RFC syntax the domain must be dotted with no empty labels, so
/// intranet-style hosts such as `localhost` are refused.
fn parse_reply_to(raw: &str) -> Result<Address, ContactError> {
    let address = raw.parse::<Address>().map_err(|e| {
        tracing::debug!("Rejected lead: invalid email {:?}: {}", raw, e);
        ContactError::InvalidEmail
    })?;
    let domain = address.domain();
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        tracing::debug!("Rejected lead: undotted email domain {:?}", domain);
        return Err(ContactError::InvalidEmail);
    }
    Ok(address)
}

pub async fn method_not_allowed() -> ContactError {
    ContactError::MethodNotAllowed
}

fn compose(state: &AppState, lead: &Lead, reply_to: Address) -> Result<Message, ContactError> {
    Message::builder()
        .from(state.config.sender.clone())
        .reply_to(Mailbox::new(None, reply_to))
        .to(state.config.recipient.clone())
        .subject(lead.subject())
        .header(ContentType::TEXT_PLAIN)
        .body(lead.body())
        .map_err(|e| {
            tracing::error!("Failed to build lead message: {}", e);
            ContactError::Compose(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{body::Body, http::Request, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ContactConfig, SmtpSettings};
    use crate::utils::mailer::{MailError, MockLeadMailer};

    fn test_config() -> ContactConfig {
        ContactConfig {
            recipient: "sales@ssd.example".parse().unwrap(),
            sender: "SSD HOLDING <no-reply@ssd.example>".parse().unwrap(),
            landing_page: "/index.html".to_string(),
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 25,
                credentials: None,
            },
            frontend_dist: "dist".to_string(),
            port: 0,
        }
    }

    fn app(mailer: MockLeadMailer) -> Router {
        crate::build_router(Arc::new(AppState {
            config: test_config(),
            mailer: Arc::new(mailer),
        }))
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn non_post_is_rejected_without_sending() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let request = Request::builder()
            .method("GET")
            .uri("/api/contact")
            .body(Body::empty())
            .unwrap();
        let response = app(mailer).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_text(response).await, "Method not allowed.");
    }

    #[tokio::test]
    async fn empty_name_is_missing_fields() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let response = app(mailer)
            .oneshot(post_form("name=&email=jane%40example.com&message=Hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing required fields.");
    }

    #[tokio::test]
    async fn tags_only_message_is_missing_fields() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let response = app(mailer)
            .oneshot(post_form("name=Jane&email=jane%40example.com&message=%3Cbr%3E"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let response = app(mailer)
            .oneshot(post_form("name=Jane&email=bad%40%40&message=Hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid email.");
    }

    #[tokio::test]
    async fn body_without_content_type_is_missing_fields() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .body(Body::empty())
            .unwrap();
        let response = app(mailer).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing required fields.");
    }

    #[tokio::test]
    async fn repeated_field_is_missing_fields() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let response = app(mailer)
            .oneshot(post_form("name=a&name=b&email=jane%40example.com&message=Hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing required fields.");
    }

    #[tokio::test]
    async fn undotted_domain_is_invalid_email() {
        let mut mailer = MockLeadMailer::new();
        mailer.expect_deliver().times(0);

        let response = app(mailer)
            .oneshot(post_form("name=Jane&email=a%40localhost&message=Hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid email.");
    }

    #[test]
    fn reply_to_needs_dotted_domain() {
        assert!(parse_reply_to("jane@example.com").is_ok());
        assert!(parse_reply_to("jane@mail.example.co.uk").is_ok());
        assert!(matches!(parse_reply_to("a@localhost"), Err(ContactError::InvalidEmail)));
        assert!(matches!(parse_reply_to("a@example..com"), Err(ContactError::InvalidEmail)));
        assert!(matches!(parse_reply_to("a@example.com."), Err(ContactError::InvalidEmail)));
    }

    #[tokio::test]
    async fn valid_lead_is_sent_once_and_redirects() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut mailer = MockLeadMailer::new();
        {
            let sent = sent.clone();
            mailer.expect_deliver().times(1).returning(move |message| {
                sent.lock().unwrap().push(message.formatted());
                Box::pin(async { Ok(()) })
            });
        }

        let response = app(mailer)
            .oneshot(post_form(
                "name=%3Cb%3EJane+Doe%3C%2Fb%3E&email=jane%40example.com&company=Acme&message=Hello+there",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/index.html#contact"
        );

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let raw = String::from_utf8_lossy(&sent[0]);
        assert!(raw.contains("Subject: New SSD HOLDING Lead: Jane Doe"));
        assert!(raw.contains("Reply-To: jane@example.com"));
        assert!(raw.contains("To: sales@ssd.example"));
        assert!(raw.contains("Name: Jane Doe"));
        assert!(raw.contains("Email: jane@example.com"));
        assert!(raw.contains("Company: Acme"));
        assert!(raw.contains("Hello there"));
        assert!(!raw.contains("<b>"));
    }

    #[tokio::test]
    async fn transport_failure_is_server_error() {
        let mut mailer = MockLeadMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .returning(|_| Box::pin(async { Err(MailError::Rejected("554".to_string())) }));

        let response = app(mailer)
            .oneshot(post_form("name=Jane&email=jane%40example.com&message=Hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Failed to send email.");
    }
}
