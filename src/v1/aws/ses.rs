use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sesv2::{
    types::{Body, Content, Destination, EmailContent, Message},
    Client,
};

use crate::v1::notify::{Email, MailError, Mailer};

const CHARSET: &str = "UTF-8";

/// `Mailer` that sends simple (non-templated) messages through SES v2.
#[derive(Clone)]
pub struct SesMailer {
    client: Client,
}

impl SesMailer {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

fn content(data: &str) -> Result<Content, MailError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| MailError::Build(e.to_string()))
}

pub fn email_content(email: &Email) -> Result<EmailContent, MailError> {
    let message = Message::builder()
        .subject(content(&email.subject)?)
        .body(
            Body::builder()
                .text(content(&email.text)?)
                .html(content(&email.html)?)
                .build(),
        )
        .build();
    Ok(EmailContent::builder().simple(message).build())
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &Email) -> Result<Option<String>, MailError> {
        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(email_content(email)?)
            .send()
            .await
            .map_err(|e| MailError::SendFail(format!("{:?}", e.into_source())))?;
        Ok(output.message_id)
    }
}
