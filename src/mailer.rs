//! SMTP delivery of the rendered digest.
//!
//! One SSL session against the fixed mail host, authenticated with the
//! sender's app password, sending a multipart message whose HTML part is the
//! digest body. A send failure is fatal for the run.

use std::error::Error;

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

use crate::config::{DigestConfig, SMTP_HOST, SMTP_PORT};

/// Send the digest to every configured recipient.
#[instrument(level = "info", skip_all, fields(recipients = config.recipients.len()))]
pub async fn send_digest(
    config: &DigestConfig,
    subject: &str,
    html_body: &str,
) -> Result<(), Box<dyn Error>> {
    let from: Mailbox = config.sender.parse()?;

    let mut builder = Message::builder().from(from).subject(subject);
    for recipient in &config.recipients {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    let message = builder.multipart(MultiPart::alternative().singlepart(
        SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string()),
    ))?;

    let credentials = Credentials::new(config.sender.clone(), config.app_password.clone());
    let mailer: AsyncSmtpTransport<Tokio1Executor> = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)?
        .port(SMTP_PORT)
        .credentials(credentials)
        .build();

    mailer.send(message).await?;

    info!(
        destinatarios = %config.recipients.join(", "),
        "Email enviado exitosamente"
    );
    Ok(())
}
