//! Email service for payment notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::{branch::OfficeBranch, office::Office},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Tell a renter their payment was accepted and the purchase confirmed
    pub async fn send_payment_accepted(
        &self,
        to: &str,
        amount: Decimal,
        currency: &str,
        office: &Office,
        branch: &OfficeBranch,
    ) -> AppResult<()> {
        let subject = "Your Deskhive payment was accepted";
        let body = format!(
            r#"
Your payment of {amount} {currency} was accepted.

Your reservation at "{office_name}" ({branch_name}, {location}) is confirmed.

See you there!
"#,
            amount = amount,
            currency = currency,
            office_name = office.name,
            branch_name = branch.name,
            location = branch.location_line(),
        );

        self.send_email(to, subject, &body).await
    }

    /// Tell a buyer their membership payment was accepted
    pub async fn send_membership_active(
        &self,
        to: &str,
        amount: Decimal,
        currency: &str,
        membership_name: &str,
        branch: &OfficeBranch,
    ) -> AppResult<()> {
        let subject = "Your Deskhive membership is active";
        let body = format!(
            r#"
Your payment of {amount} {currency} was accepted.

Your "{membership_name}" membership at {branch_name} ({location}) is now
active. You can book offices on your access days without further payment.
"#,
            amount = amount,
            currency = currency,
            membership_name = membership_name,
            branch_name = branch.name,
            location = branch.location_line(),
        );

        self.send_email(to, subject, &body).await
    }

    /// Tell a payer their payment did not go through
    pub async fn send_payment_failed(&self, to: &str) -> AppResult<()> {
        let subject = "Your Deskhive payment could not be completed";
        let body = r#"
Your payment was rejected or cancelled by the payment provider.

No reservation was confirmed. You can retry the purchase at any time;
if you believe this is an error, please contact your card issuer.
"#;

        self.send_email(to, subject, body).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Deskhive");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
