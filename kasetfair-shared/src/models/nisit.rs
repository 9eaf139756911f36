use serde::{Deserialize, Serialize};

/// Student profile every store member must register before joining.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NisitInfo {
    pub first_name: String,
    pub last_name: String,
    pub nisit_id: String,
    pub email: String,
    pub phone: String,
    /// Uploaded student card (`NISIT_CARD` media).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nisit_card_media_id: Option<String>,
}

/// Body of `PATCH /nisit/info`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNisitInfoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nisit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nisit_card_media_id: Option<String>,
}

impl UpdateNisitInfoRequest {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.nisit_id.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.nisit_card_media_id.is_none()
    }
}
