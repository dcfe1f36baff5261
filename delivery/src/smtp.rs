use common::error::{AppError, Res};
use db::models::smtp::SmtpConfig;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

/// Sends campaign mail through a user-supplied SMTP relay.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Builds a transport from an SMTP config row. `secure` selects implicit
    /// TLS; otherwise the connection is upgraded via STARTTLS.
    pub fn from_config(config: &SmtpConfig) -> Res<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| {
            AppError::BadRequest(format!(
                "Failed to set up SMTP relay {}: {}. Check the host, port and credentials of your SMTP configuration.",
                config.host, e
            ))
        })?;

        let transport = builder
            .port(config.port as u16)
            .credentials(creds)
            .build();

        let from = config.from_email.parse::<Mailbox>().map_err(|e| {
            AppError::BadRequest(format!("Invalid from address {}: {}", config.from_email, e))
        })?;

        Ok(Mailer { transport, from })
    }

    /// Sends one plain-text message. A failed send surfaces as an error so
    /// the campaign loop can record the recipient as failed and move on.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Res<()> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::BadRequest(format!("Invalid recipient address {}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::BadRequest(format!("SMTP send failed: {}", e)))?;

        Ok(())
    }
}
