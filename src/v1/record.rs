use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use super::datastore::Item;

pub const PRIMARY_KEY: &str = "PrimaryKey";

/// Delivery wrapper around a submission; `body` holds the record as JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub body: Option<String>,
}

impl Envelope {
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.body.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appointment {
    pub name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub appt_date_and_time: String,
}

impl Appointment {
    pub fn into_item(self, id: RecordId) -> Item {
        [
            (PRIMARY_KEY, id.to_string()),
            ("Name", self.name),
            ("AddressLine1", self.address_line1),
            ("AddressLine2", self.address_line2),
            ("City", self.city),
            ("State", self.state),
            ("Zip", self.zip),
            ("Phone", self.phone),
            ("ApptDateAndTime", self.appt_date_and_time),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSubmission {
    pub author: String,
    pub text: String,
}

impl CommentSubmission {
    pub fn into_item(self, id: RecordId, created_at: DateTime<Utc>) -> Item {
        [
            (PRIMARY_KEY, id.to_string()),
            ("Author", self.author),
            ("Text", self.text),
            (
                "Date",
                created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

/// A stored comment as the reader returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub text: String,
    pub date: String,
}

impl Comment {
    /// Legacy rows may lack any of the attributes; those come back empty.
    pub fn from_item(item: &Item) -> Self {
        let attr = |key: &str| item.get(key).cloned().unwrap_or_default();
        Self {
            name: attr("Author"),
            text: attr("Text"),
            date: attr("Date"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentList {
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn appointment_uses_camel_case_names() {
        let appt: Appointment = serde_json::from_str(
            r#"{"name":"Ana","addressLine1":"1 Main St","addressLine2":"Apt 2",
                "city":"Austin","state":"TX","zip":"78701","phone":"555-0100",
                "apptDateAndTime":"2024-05-01T10:00"}"#,
        )
        .unwrap();
        assert_eq!(appt.address_line1, "1 Main St");
        assert_eq!(appt.appt_date_and_time, "2024-05-01T10:00");
    }

    #[test]
    fn appointment_missing_fields_are_empty() {
        let appt: Appointment = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(appt.name, "Ana");
        assert_eq!(appt.zip, "");
    }

    #[test]
    fn appointment_item_keeps_every_field() {
        let appt = Appointment {
            name: "Ana".into(),
            address_line1: "1 Main St".into(),
            address_line2: "".into(),
            city: "Austin".into(),
            state: "TX".into(),
            zip: "78701".into(),
            phone: "555-0100".into(),
            appt_date_and_time: "tomorrow".into(),
        };
        let id = RecordId::generate();
        let item = appt.into_item(id);
        assert_eq!(item.len(), 9);
        assert_eq!(item[PRIMARY_KEY], id.to_string());
        assert_eq!(item["AddressLine2"], "");
        assert_eq!(item["ApptDateAndTime"], "tomorrow");
    }

    #[test]
    fn comment_item_is_stamped() {
        let created_at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let item = CommentSubmission {
            author: "Alice".into(),
            text: "Hello".into(),
        }
        .into_item(RecordId::generate(), created_at);
        assert_eq!(item["Author"], "Alice");
        assert_eq!(item["Date"], "2024-05-01T10:00:00.000Z");
    }

    #[rstest]
    #[case(&[("Author", "Bo"), ("Text", "hi"), ("Date", "d")], ("Bo", "hi", "d"))]
    #[case(&[("Author", "Bo"), ("Text", "hi")], ("Bo", "hi", ""))]
    #[case(&[], ("", "", ""))]
    fn comment_from_item(#[case] attrs: &[(&str, &str)], #[case] expected: (&str, &str, &str)) {
        let item: Item = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let comment = Comment::from_item(&item);
        assert_eq!(
            (comment.name.as_str(), comment.text.as_str(), comment.date.as_str()),
            expected
        );
    }

    #[test]
    fn record_ids_are_distinct() {
        assert_ne!(RecordId::generate(), RecordId::generate());
        assert_eq!(RecordId::generate().to_string().len(), 36);
    }

    #[rstest]
    #[case(r#"{"body":"{\"author\":\"Alice\",\"text\":\"Hello\"}"}"#, true)]
    #[case(r#"{"body":"{not json"}"#, false)]
    #[case(r#"{}"#, false)]
    fn envelope_body_decoding(#[case] raw: &str, #[case] ok: bool) {
        let envelope: Envelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.decode_body::<CommentSubmission>().is_ok(), ok);
    }
}
