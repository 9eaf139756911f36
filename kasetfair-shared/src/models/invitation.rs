use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pending invitation to join someone else's store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    pub store_name: String,
    pub inviter_name: String,
    pub invitee_email: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Raw timestamp; the API does not guarantee a parseable value.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Invitation {
    /// Creation time, when the API sent a valid RFC 3339 timestamp.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }

    /// Message to show, if any text was sent.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}
