//! Outbound mail.
//!
//! Thin wrapper over lettre's async SMTP transport. When mail is disabled
//! in configuration the service is constructed without a transport and
//! every send becomes a logged no-op, which keeps development setups free
//! of an SMTP dependency.

use desk_common::{config::MailConfig, AppError, AppResult};
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Outbound mail sender.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl EmailService {
    /// Build the sender from configuration.
    ///
    /// Returns a disabled sender when `mail.enabled` is false or no relay
    /// host is configured.
    pub fn from_config(config: &MailConfig) -> AppResult<Self> {
        let from_address = config
            .from_address
            .clone()
            .unwrap_or_else(|| "desk@localhost".to_string());

        if !config.enabled {
            return Ok(Self {
                transport: None,
                from_address,
            });
        }

        let host = config.smtp_host.as_deref().ok_or_else(|| {
            AppError::Config("mail.smtp_host is required when mail is enabled".to_string())
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::Config(e.to_string()))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) =
            (config.smtp_username.clone(), config.smtp_password.clone())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: Some(builder.build()),
            from_address,
        })
    }

    /// Whether a transport is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send a plain-text message.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let Some(ref transport) = self.transport else {
            tracing::debug!(to, subject, "Mail disabled; dropping message");
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_builds_disabled_sender() {
        let service = EmailService::from_config(&MailConfig::default()).unwrap();
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_sender_drops_mail_silently() {
        let service = EmailService::from_config(&MailConfig::default()).unwrap();
        service
            .send("client@example.com", "subject", "body")
            .await
            .unwrap();
    }

    #[test]
    fn test_enabled_without_host_is_a_config_error() {
        let config = MailConfig {
            enabled: true,
            ..MailConfig::default()
        };
        let result = EmailService::from_config(&config);
        assert!(result.is_err());
    }
}
