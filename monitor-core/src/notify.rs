use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::fmt;
use thiserror::Error;

use crate::{alert::AlertEvent, config::EmailConfig};

/// Errors from building or delivering an alert email.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build alert email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery channel for fired alerts. The collector only sees this trait,
/// so the channel can be swapped out.
#[async_trait]
pub trait Notifier: Send + Sync + fmt::Debug {
    async fn send_alert(&self, event: &AlertEvent) -> Result<(), DeliveryError>;
}

/// Sends alert emails through the configured SMTP relay using STARTTLS.
pub struct EmailAlerter {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    receiver: Mailbox,
}

impl EmailAlerter {
    /// Build the alerter from config. Addresses are parsed and the relay is
    /// set up here; no connection is made until the first send.
    pub fn from_config(config: &EmailConfig) -> Result<Self, DeliveryError> {
        let sender: Mailbox = config.sender.parse()?;
        let receiver: Mailbox = config.receiver.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(config.sender.clone(), config.password.clone()))
            .build();

        Ok(Self { transport, sender, receiver })
    }
}

#[async_trait]
impl Notifier for EmailAlerter {
    async fn send_alert(&self, event: &AlertEvent) -> Result<(), DeliveryError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.receiver.clone())
            .subject(alert_subject(&event.city, event.threshold_c))
            .header(ContentType::TEXT_PLAIN)
            .body(alert_body(&event.city, event.temperature_c))?;

        self.transport.send(message).await?;

        Ok(())
    }
}

impl fmt::Debug for EmailAlerter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Credentials stay out of debug output.
        f.debug_struct("EmailAlerter")
            .field("sender", &self.sender.to_string())
            .field("receiver", &self.receiver.to_string())
            .finish_non_exhaustive()
    }
}

pub fn alert_subject(city: &str, threshold_c: f64) -> String {
    format!("Weather Alert: {city} Temperature Exceeds {threshold_c}°C")
}

pub fn alert_body(city: &str, temperature_c: f64) -> String {
    format!(
        "The temperature in {city} has exceeded the threshold. \
         Current temperature: {temperature_c:.2}°C."
    )
}
