use std::env;

use super::handler::HandlerError;
use super::notify::MailRoute;

pub const TABLE_VAR: &str = "DYNAMO_TABLE";
pub const RECIPIENT_VAR: &str = "EMAIL_RECIPIENT";
pub const SENDER_VAR: &str = "EMAIL_SENDER";

/// Environment configuration, read once at cold start and checked on every
/// invocation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub table: Option<String>,
    pub email_recipient: Option<String>,
    pub email_sender: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            table: read(TABLE_VAR),
            email_recipient: read(RECIPIENT_VAR),
            email_sender: read(SENDER_VAR),
        }
    }
    pub fn table(&self) -> Result<&str, HandlerError> {
        self.table
            .as_deref()
            .ok_or(HandlerError::MissingConfig(TABLE_VAR))
    }
    pub fn mail_route(&self) -> Result<MailRoute, HandlerError> {
        Ok(MailRoute {
            sender: self
                .email_sender
                .clone()
                .ok_or(HandlerError::MissingConfig(SENDER_VAR))?,
            recipient: self
                .email_recipient
                .clone()
                .ok_or(HandlerError::MissingConfig(RECIPIENT_VAR))?,
        })
    }
}
