use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use super::record::{Appointment, CommentSubmission};

const SITE: &str = "aqua-vantage.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub sender: String,
    pub recipient: String,
}

/// A two-part notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends `email` and returns the provider's message id, if it gave one.
    async fn send(&self, email: &Email) -> Result<Option<String>, MailError>;
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Could not build email: {0}")]
    Build(String),
    #[error("Send email failed: {0}")]
    SendFail(String),
}

pub fn comment_email(route: &MailRoute, comment: &CommentSubmission) -> Email {
    let fields = [("Author", &comment.author), ("Text", &comment.text)];
    Email {
        from: route.sender.clone(),
        to: route.recipient.clone(),
        subject: "Someone has made a comment!".to_string(),
        text: format!(
            "Someone has made a comment at {SITE}! Here are all the details:\n\n{}",
            text_list(&fields)
        ),
        html: format!(
            "<html><head></head><body><h1>Someone has made a comment at {SITE}!</h1>\
             <p>Here are all the details:</p>{}</body></html>",
            html_list(&fields)
        ),
    }
}

pub fn appointment_email(route: &MailRoute, appt: &Appointment) -> Email {
    let fields = [
        ("Name", &appt.name),
        ("Address Line 1", &appt.address_line1),
        ("Address Line 2", &appt.address_line2),
        ("City", &appt.city),
        ("State", &appt.state),
        ("Zip", &appt.zip),
        ("Phone", &appt.phone),
        ("Requested Appointment Date and Time", &appt.appt_date_and_time),
    ];
    let closing = "Please get into contact with the requester to confirm the appointment!";
    Email {
        from: route.sender.clone(),
        to: route.recipient.clone(),
        subject: "Someone requested an appointment!".to_string(),
        text: format!(
            "Someone has requested an appointment at {SITE}! Here are all the details:\n\n{}{closing}",
            text_list(&fields)
        ),
        html: format!(
            "<html><head></head><body><h1>Someone has requested an appointment at {SITE}!</h1>\
             <p>Here are all the details:</p>{}<p>{closing}</p></body></html>",
            html_list(&fields)
        ),
    }
}

fn text_list(fields: &[(&str, &String)]) -> String {
    fields
        .iter()
        .map(|(label, value)| format!("{label}: {value}\n"))
        .collect()
}

fn html_list(fields: &[(&str, &String)]) -> String {
    let items: String = fields
        .iter()
        .map(|(label, value)| format!("<li>{label}: {}</li>", escape_html(value)))
        .collect();
    format!("<ol>{items}</ol>")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Keeps every email it is asked to send. Used as a stand-in for SES.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<Option<String>, MailError> {
        if self.fail {
            return Err(MailError::SendFail(format!("rejected mail to {}", email.to)));
        }
        let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
        sent.push(email.clone());
        Ok(Some(format!("local-{}", sent.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> MailRoute {
        MailRoute {
            sender: "site@example.com".into(),
            recipient: "owner@example.com".into(),
        }
    }

    #[test]
    fn comment_email_lists_author_and_text() {
        let email = comment_email(
            &route(),
            &CommentSubmission {
                author: "Alice".into(),
                text: "Hello".into(),
            },
        );
        assert_eq!(email.subject, "Someone has made a comment!");
        assert_eq!(email.from, "site@example.com");
        assert_eq!(email.to, "owner@example.com");
        assert!(email.text.contains("Author: Alice\nText: Hello\n"));
        assert!(email.html.contains("<li>Author: Alice</li><li>Text: Hello</li>"));
    }

    #[test]
    fn appointment_email_lists_every_field() {
        let appt = Appointment {
            name: "Ana".into(),
            address_line1: "1 Main St".into(),
            address_line2: "Apt 2".into(),
            city: "Austin".into(),
            state: "TX".into(),
            zip: "78701".into(),
            phone: "555-0100".into(),
            appt_date_and_time: "Friday 10am".into(),
        };
        let email = appointment_email(&route(), &appt);
        assert_eq!(email.subject, "Someone requested an appointment!");
        for value in ["Ana", "1 Main St", "Apt 2", "Austin", "TX", "78701", "555-0100", "Friday 10am"] {
            assert!(email.text.contains(value), "text body missing {value}");
            assert!(email.html.contains(value), "html body missing {value}");
        }
        assert!(email.text.ends_with("to confirm the appointment!"));
    }

    #[test]
    fn html_body_escapes_user_text() {
        let email = comment_email(
            &route(),
            &CommentSubmission {
                author: "<b>Eve</b>".into(),
                text: "a & b".into(),
            },
        );
        assert!(email.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(email.html.contains("a &amp; b"));
        assert!(email.text.contains("<b>Eve</b>"));
    }

    #[tokio::test]
    async fn recording_mailer_keeps_sent_mail() {
        let mailer = RecordingMailer::new();
        let email = comment_email(&route(), &CommentSubmission::default());
        assert_eq!(mailer.send(&email).await.unwrap().as_deref(), Some("local-1"));
        assert_eq!(mailer.sent(), vec![email]);
        assert!(RecordingMailer::failing().send(&mailer.sent()[0]).await.is_err());
    }
}
