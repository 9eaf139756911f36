use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// What an uploaded file is used for; sent alongside the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaPurpose {
    NisitCard,
    StoreLayout,
    StoreGoods,
    ClubApplication,
    Other,
}

/// Response of a media upload: an opaque reference id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResponse {
    pub id: String,
}

/// Resolved download link for a media id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    pub id: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_wire_names_match_form_field() {
        assert_eq!(MediaPurpose::ClubApplication.as_ref(), "CLUB_APPLICATION");
        assert_eq!(
            serde_json::to_string(&MediaPurpose::NisitCard).unwrap(),
            "\"NISIT_CARD\""
        );
    }
}
