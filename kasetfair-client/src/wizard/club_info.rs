//! Club-info step draft.

use shared::models::{ClubInfo, UpdateClubInfoRequest};

use crate::api::Attachment;
use crate::storage::CachedClubInfo;

/// Editable text fields of the club-info form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClubInfoField {
    OrganizationName,
    PresidentFirstName,
    PresidentLastName,
    PresidentNisitId,
    PresidentEmail,
    PresidentPhone,
}

impl ClubInfoField {
    pub const ALL: [Self; 6] = [
        Self::OrganizationName,
        Self::PresidentFirstName,
        Self::PresidentLastName,
        Self::PresidentNisitId,
        Self::PresidentEmail,
        Self::PresidentPhone,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubInfoDraft {
    pub organization_name: String,
    pub president_first_name: String,
    pub president_last_name: String,
    pub president_nisit_id: String,
    pub president_email: String,
    pub president_phone: String,
    pub application_file_name: Option<String>,
    /// Picked but not yet uploaded.
    pub application_file: Option<Attachment>,
    /// Reference to an application document already on the server.
    pub club_application_media_id: Option<String>,
}

impl ClubInfoDraft {
    #[must_use]
    pub fn from_snapshot(info: &ClubInfo) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            organization_name: text(&info.club_name),
            president_first_name: text(&info.leader_first_name),
            president_last_name: text(&info.leader_last_name),
            president_nisit_id: text(&info.leader_nisit_id),
            president_email: text(&info.leader_email),
            president_phone: text(&info.leader_phone),
            application_file_name: info.application_file_name.clone(),
            application_file: None,
            club_application_media_id: info.application_media_id().map(str::to_string),
        }
    }

    #[must_use]
    pub fn field(&self, field: ClubInfoField) -> &str {
        match field {
            ClubInfoField::OrganizationName => &self.organization_name,
            ClubInfoField::PresidentFirstName => &self.president_first_name,
            ClubInfoField::PresidentLastName => &self.president_last_name,
            ClubInfoField::PresidentNisitId => &self.president_nisit_id,
            ClubInfoField::PresidentEmail => &self.president_email,
            ClubInfoField::PresidentPhone => &self.president_phone,
        }
    }

    pub fn set_field(&mut self, field: ClubInfoField, value: impl Into<String>) {
        let slot = match field {
            ClubInfoField::OrganizationName => &mut self.organization_name,
            ClubInfoField::PresidentFirstName => &mut self.president_first_name,
            ClubInfoField::PresidentLastName => &mut self.president_last_name,
            ClubInfoField::PresidentNisitId => &mut self.president_nisit_id,
            ClubInfoField::PresidentEmail => &mut self.president_email,
            ClubInfoField::PresidentPhone => &mut self.president_phone,
        };
        *slot = value.into();
    }

    /// Picks (or clears) the application document. A stored media id stays
    /// until an upload replaces it.
    pub fn attach_application(&mut self, file: Option<Attachment>) {
        self.application_file_name = file.as_ref().map(|file| file.file_name.clone());
        self.application_file = file;
    }

    /// Records a finished upload.
    pub fn mark_uploaded(&mut self, media_id: String) {
        self.club_application_media_id = Some(media_id);
        self.application_file = None;
    }

    /// Request body with every blank field left out.
    #[must_use]
    pub fn to_request(&self) -> UpdateClubInfoRequest {
        let value = |field| {
            let trimmed = self.field(field).trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        UpdateClubInfoRequest {
            club_name: value(ClubInfoField::OrganizationName),
            leader_first_name: value(ClubInfoField::PresidentFirstName),
            leader_last_name: value(ClubInfoField::PresidentLastName),
            leader_nisit_id: value(ClubInfoField::PresidentNisitId),
            leader_email: value(ClubInfoField::PresidentEmail),
            leader_phone: value(ClubInfoField::PresidentPhone),
            club_application_media_id: self
                .club_application_media_id
                .clone()
                .filter(|id| !id.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn to_cached(&self) -> CachedClubInfo {
        CachedClubInfo {
            organization_name: self.organization_name.clone(),
            president_first_name: self.president_first_name.clone(),
            president_last_name: self.president_last_name.clone(),
            president_nisit_id: self.president_nisit_id.clone(),
            president_email: self.president_email.clone(),
            president_phone: self.president_phone.clone(),
            application_file_name: self.application_file_name.clone(),
            club_application_media_id: self.club_application_media_id.clone(),
        }
    }

    /// Lays a cached draft over this one. The picked file cannot survive a
    /// reload, so it is dropped.
    pub fn restore(&mut self, cached: CachedClubInfo) {
        *self = Self {
            organization_name: cached.organization_name,
            president_first_name: cached.president_first_name,
            president_last_name: cached.president_last_name,
            president_nisit_id: cached.president_nisit_id,
            president_email: cached.president_email,
            president_phone: cached.president_phone,
            application_file_name: cached.application_file_name,
            application_file: None,
            club_application_media_id: cached.club_application_media_id,
        };
    }
}
