use crate::config::{EmailConfig, WatcherConfig};
use crate::domain::model::NotificationMessage;
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Writes notifications to a console-like sink instead of sending them.
#[derive(Clone)]
pub struct ConsoleNotifier {
    out: Arc<Mutex<dyn Write + Send>>,
}

impl ConsoleNotifier {
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, message: &NotificationMessage) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "Subject: {}\nBody:\n{}\n", message.subject, message.body)?;
        out.flush()?;
        Ok(())
    }
}

/// Sends each notification as one plain-text email over STARTTLS.
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(email: &EmailConfig) -> Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_host)?
            .port(email.smtp_port)
            .credentials(Credentials::new(email.from.clone(), email.password.clone()))
            .timeout(Some(Duration::from_secs(email.timeout_secs)))
            .build();

        Ok(Self {
            mailer,
            from: email.from.parse()?,
            to: email.to.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, message: &NotificationMessage) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        self.mailer.send(email).await?;
        tracing::debug!("Email sent to {}", self.to);
        Ok(())
    }
}

/// Picks SMTP delivery when email is fully configured, the console otherwise.
pub enum DeliveryNotifier {
    Smtp(SmtpNotifier),
    Console(ConsoleNotifier),
}

impl DeliveryNotifier {
    pub fn from_config(config: &WatcherConfig) -> Result<Self> {
        Self::select(config, ConsoleNotifier::stdout())
    }

    /// Like [`DeliveryNotifier::from_config`] with an explicit console sink.
    pub fn select(config: &WatcherConfig, console: ConsoleNotifier) -> Result<Self> {
        if config.dry_run {
            tracing::info!("Dry run: notifications are printed, not emailed");
            return Ok(Self::Console(console));
        }
        if !config.email.is_complete() {
            tracing::warn!("Email is not configured; notifications are printed to the console");
            return Ok(Self::Console(console));
        }

        tracing::info!(
            "Notifications are emailed to {} via {}:{}",
            config.email.to,
            config.email.smtp_host,
            config.email.smtp_port
        );
        Ok(Self::Smtp(SmtpNotifier::new(&config.email)?))
    }

    pub fn is_console(&self) -> bool {
        matches!(self, Self::Console(_))
    }
}

#[async_trait]
impl Notifier for DeliveryNotifier {
    async fn notify(&self, message: &NotificationMessage) -> Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.notify(message).await,
            Self::Console(console) => console.notify(message).await,
        }
    }
}
