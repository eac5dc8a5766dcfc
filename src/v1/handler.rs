//! The four invocation entry points. Each one parses its input, checks the
//! configuration it needs, and only then talks to the store and the mailer.

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::config::Settings;
use super::datastore::{RecordStore, StoreError};
use super::notify::{appointment_email, comment_email, Email, MailError, Mailer};
use super::record::{
    Appointment, Comment, CommentList, CommentSubmission, Envelope, RecordId,
};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("missing required environment variable {0}")]
    MissingConfig(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The record was written but the notification was not sent. The record
    /// is not rolled back.
    #[error("Record {record_id} was stored but the notification failed: {source}")]
    Notify {
        record_id: String,
        #[source]
        source: MailError,
    },
}

fn parse<T: serde::de::DeserializeOwned>(event: Value) -> Result<T, HandlerError> {
    debug!(%event, "received event");
    serde_json::from_value(event).map_err(|e| {
        warn!("Failed to unmarshal event: {e}");
        HandlerError::from(e)
    })
}

fn parse_body<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> Result<T, HandlerError> {
    envelope.decode_body().map_err(|e| {
        warn!("Failed to unmarshal body: {e}");
        HandlerError::from(e)
    })
}

async fn notify(
    mailer: &impl Mailer,
    record_id: RecordId,
    email: &Email,
) -> Result<(), HandlerError> {
    match mailer.send(email).await {
        Ok(message_id) => {
            info!(%record_id, ?message_id, "Sent notification email");
            Ok(())
        }
        Err(source) => {
            error!(%record_id, "error sending email: {source}");
            Err(HandlerError::Notify {
                record_id: record_id.to_string(),
                source,
            })
        }
    }
}

/// Returns every stored comment. The body of the event is not used.
pub async fn list_comments(
    store: &impl RecordStore,
    settings: &Settings,
    event: Value,
) -> Result<CommentList, HandlerError> {
    let _envelope: Envelope = parse(event)?;
    let table = settings.table()?;
    let items = store.scan(table).await.inspect_err(|e| error!("{e}"))?;
    let comments: Vec<Comment> = items.iter().map(Comment::from_item).collect();
    info!(table, count = comments.len(), "Scanned comments");
    Ok(CommentList { comments })
}

pub async fn post_comment(
    store: &impl RecordStore,
    mailer: &impl Mailer,
    settings: &Settings,
    event: Value,
) -> Result<RecordId, HandlerError> {
    let envelope: Envelope = parse(event)?;
    let comment: CommentSubmission = parse_body(&envelope)?;
    info!(author = %comment.author, "Parsed comment");
    let table = settings.table()?;
    let route = settings.mail_route()?;

    let record_id = RecordId::generate();
    let email = comment_email(&route, &comment);
    store
        .put(table, comment.into_item(record_id, Utc::now()))
        .await
        .inspect_err(|e| error!("{e}"))?;
    info!(table, %record_id, "Saved comment");

    notify(mailer, record_id, &email).await?;
    Ok(record_id)
}

pub async fn post_appointment(
    store: &impl RecordStore,
    mailer: &impl Mailer,
    settings: &Settings,
    event: Value,
) -> Result<RecordId, HandlerError> {
    let envelope: Envelope = parse(event)?;
    let appt: Appointment = parse_body(&envelope)?;
    info!(date = %appt.appt_date_and_time, "Parsed appointment");
    let table = settings.table()?;
    let route = settings.mail_route()?;

    let record_id = RecordId::generate();
    let email = appointment_email(&route, &appt);
    store
        .put(table, appt.into_item(record_id))
        .await
        .inspect_err(|e| error!("{e}"))?;
    info!(table, %record_id, "Saved appointment");

    notify(mailer, record_id, &email).await?;
    Ok(record_id)
}

/// Stores an appointment without sending mail. The event is the appointment
/// itself, not an envelope.
pub async fn post_appointment_silent(
    store: &impl RecordStore,
    settings: &Settings,
    event: Value,
) -> Result<RecordId, HandlerError> {
    let appt: Appointment = parse(event)?;
    info!(date = %appt.appt_date_and_time, "Parsed appointment");
    let table = settings.table()?;

    let record_id = RecordId::generate();
    store
        .put(table, appt.into_item(record_id))
        .await
        .inspect_err(|e| error!("{e}"))?;
    info!(table, %record_id, "Saved appointment");
    Ok(record_id)
}
