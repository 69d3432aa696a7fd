use crate::config::{ConfigError, EmailConfig};
use crate::model::contact::ContactRecord;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, instrument};

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Sends the operator notification for a stored contact submission.
///
/// Single-shot: one attempt per submission, no retries. A failure here never
/// undoes the persistence that preceded it.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify_contact(&self, record: &ContactRecord) -> Result<(), EmailError>;
}

/// Email message builder
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            text_body: None,
            html_body: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Create a new SMTP email service
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(std::time::Duration::from_secs(
                    config.connection_timeout_secs,
                )));

        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if config.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if !config.smtp_username.is_empty() && !config.smtp_password.is_empty() {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Send an email message
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    pub async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!("Sending email to: {}", message.to);

        self.validate_email_address(&message.to)?;

        let email_message = self.build_message(message)?;

        self.transport.send(email_message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }

    /// Generate the notification templates for a contact submission
    fn generate_contact_notification_template(&self, record: &ContactRecord) -> (String, String) {
        let text_body = format!(
            r#"Nuevo contacto recibido

Nombre: {nombre}
Email: {correo}
Celular: {celular}
Mensaje: {mensaje}"#,
            nombre = record.nombre,
            correo = record.correo,
            celular = record.celular,
            mensaje = record.mensaje,
        );

        let html_body = format!(
            r#"<h3>Nuevo contacto recibido</h3>
<p><strong>Nombre:</strong> {nombre}</p>
<p><strong>Email:</strong> {correo}</p>
<p><strong>Celular:</strong> {celular}</p>
<p><strong>Mensaje:</strong> {mensaje}</p>"#,
            nombre = html_escape::encode_text(&record.nombre),
            correo = html_escape::encode_text(&record.correo),
            celular = html_escape::encode_text(&record.celular),
            mensaje = html_escape::encode_text(&record.mensaje),
        );

        (text_body, html_body)
    }

    /// Build a lettre Message from EmailMessage
    fn build_message(&self, email_message: EmailMessage) -> Result<Message, EmailError> {
        let from_mailbox: Mailbox =
            format!("{} <{}>", self.config.from_name, self.config.from_email)
                .parse()
                .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = email_message
            .to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let message_builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email_message.subject);

        match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => {
                let message = message_builder
                    .multipart(
                        lettre::message::MultiPart::alternative()
                            .singlepart(
                                lettre::message::SinglePart::builder()
                                    .header(ContentType::TEXT_PLAIN)
                                    .body(text),
                            )
                            .singlepart(
                                lettre::message::SinglePart::builder()
                                    .header(ContentType::TEXT_HTML)
                                    .body(html),
                            ),
                    )
                    .map_err(|e| {
                        EmailError::MessageError(format!(
                            "Failed to build multipart message: {}",
                            e
                        ))
                    })?;
                Ok(message)
            }
            (Some(text), None) => {
                let message = message_builder.body(text).map_err(|e| {
                    EmailError::MessageError(format!("Failed to build text message: {}", e))
                })?;
                Ok(message)
            }
            (None, Some(html)) => {
                let message = message_builder
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    )
                    .map_err(|e| {
                        EmailError::MessageError(format!("Failed to build HTML message: {}", e))
                    })?;
                Ok(message)
            }
            (None, None) => Err(EmailError::MessageError(
                "No message body provided".to_string(),
            )),
        }
    }

    /// Validate email address format
    fn validate_email_address(&self, email: &str) -> Result<(), EmailError> {
        if email.is_empty() {
            return Err(EmailError::AddressError(
                "Email address cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(EmailError::AddressError("Invalid email format".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl ContactNotifier for SmtpEmailService {
    /// Send the operator notification for a newly stored submission.
    #[instrument(skip(self, record), fields(nombre = %record.nombre))]
    async fn notify_contact(&self, record: &ContactRecord) -> Result<(), EmailError> {
        info!("Sending contact notification to operator");

        let (text_body, html_body) = self.generate_contact_notification_template(record);

        let message = EmailMessage::new(
            self.config.notify_email.clone(),
            format!("Nuevo mensaje de {}", record.nombre),
        )
        .with_text_body(text_body)
        .with_html_body(html_body);

        self.send_email(message).await?;

        info!("Contact notification sent successfully");
        Ok(())
    }
}
