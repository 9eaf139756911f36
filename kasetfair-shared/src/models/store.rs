//! Store registration models.
//!
//! The API returns one loose record for every progress state
//! ([`StoreSnapshotDto`]). Clients work with [`StoreProgress`], which only
//! carries the fields that are valid at the reported state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Kind of store being registered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum StoreType {
    /// Individual student store.
    Nisit,
    /// Store run by a student organization.
    Club,
}

impl StoreType {
    /// Parses a navigation parameter such as `?type=club`.
    ///
    /// Unknown or missing values mean "no type chosen yet".
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
    }
}

/// Server-reported registration progress, in progression order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum StoreState {
    CreateStore,
    ClubInfo,
    StoreDetails,
    ProductDetails,
    Submitted,
    Pending,
}

/// Invitation status of one member email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEmailStatus {
    pub email: String,
    pub status: String,
}

/// Organization details stored for club stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubInfo {
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub leader_first_name: Option<String>,
    #[serde(default)]
    pub leader_last_name: Option<String>,
    #[serde(default)]
    pub leader_nisit_id: Option<String>,
    #[serde(default)]
    pub leader_email: Option<String>,
    #[serde(default)]
    pub leader_phone: Option<String>,
    #[serde(default)]
    pub application_file_name: Option<String>,
    #[serde(default)]
    pub club_application_media_id: Option<String>,
    /// Older responses name the media reference this way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_file_id: Option<String>,
}

impl ClubInfo {
    /// Media id of the uploaded application document, whichever field carries it.
    #[must_use]
    pub fn application_media_id(&self) -> Option<&str> {
        self.club_application_media_id
            .as_deref()
            .or(self.application_file_id.as_deref())
    }
}

/// Layout/booth details stored from the store-details step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub description: Option<String>,
    pub file_name: Option<String>,
}

/// JSON scalar the API is loose about: ids and prices arrive as numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Product row as reported inside a store snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(default)]
    pub id: Option<Scalar>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
}

impl ProductSummary {
    /// Display name of the product image, whichever field carries it.
    #[must_use]
    pub fn display_file_name(&self) -> Option<&str> {
        self.file_name.as_deref().or(self.image_name.as_deref())
    }
}

/// Loose wire shape of `GET /store/status`, `POST /store/create` and
/// `PATCH /store/club-info` responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshotDto {
    pub id: i64,
    #[serde(default)]
    pub store_name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    pub state: StoreState,
    #[serde(default)]
    pub member_emails: Vec<MemberEmailStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_profile_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_info: Option<ClubInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data accumulated once a store reaches the product step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    pub club_info: Option<ClubInfo>,
    pub layout: Option<LayoutInfo>,
    /// `None` when the snapshot left the list out; an empty list is kept as such.
    pub products: Option<Vec<ProductSummary>>,
}

/// Progress state together with the data that is valid at that state.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreStage {
    CreateStore,
    ClubInfo {
        club_info: Option<ClubInfo>,
    },
    StoreDetails {
        club_info: Option<ClubInfo>,
        layout: Option<LayoutInfo>,
    },
    ProductDetails(Catalogue),
    Submitted(Catalogue),
    Pending(Catalogue),
}

/// Client-held mirror of the server's view of the user's store.
///
/// Always replaced wholesale from a server response.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreProgress {
    pub id: i64,
    pub store_name: String,
    pub store_type: StoreType,
    pub member_emails: Vec<MemberEmailStatus>,
    pub missing_profile_emails: Vec<String>,
    pub stage: StoreStage,
}

/// A snapshot that contradicts itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("store {0} is an individual store but reports the ClubInfo state")]
    ClubStateOnNisit(i64),
    #[error("store {0} is an individual store but carries club information")]
    ClubInfoOnNisit(i64),
}

impl StoreProgress {
    /// The progress state this snapshot is in.
    #[must_use]
    pub const fn state(&self) -> StoreState {
        match self.stage {
            StoreStage::CreateStore => StoreState::CreateStore,
            StoreStage::ClubInfo { .. } => StoreState::ClubInfo,
            StoreStage::StoreDetails { .. } => StoreState::StoreDetails,
            StoreStage::ProductDetails(_) => StoreState::ProductDetails,
            StoreStage::Submitted(_) => StoreState::Submitted,
            StoreStage::Pending(_) => StoreState::Pending,
        }
    }

    #[must_use]
    pub fn club_info(&self) -> Option<&ClubInfo> {
        match &self.stage {
            StoreStage::CreateStore => None,
            StoreStage::ClubInfo { club_info } | StoreStage::StoreDetails { club_info, .. } => {
                club_info.as_ref()
            }
            StoreStage::ProductDetails(catalogue)
            | StoreStage::Submitted(catalogue)
            | StoreStage::Pending(catalogue) => catalogue.club_info.as_ref(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> Option<&LayoutInfo> {
        match &self.stage {
            StoreStage::CreateStore | StoreStage::ClubInfo { .. } => None,
            StoreStage::StoreDetails { layout, .. } => layout.as_ref(),
            StoreStage::ProductDetails(catalogue)
            | StoreStage::Submitted(catalogue)
            | StoreStage::Pending(catalogue) => catalogue.layout.as_ref(),
        }
    }

    /// Products reported by the server; `None` before the product step or
    /// when the snapshot did not include them.
    #[must_use]
    pub fn products(&self) -> Option<&[ProductSummary]> {
        match &self.stage {
            StoreStage::ProductDetails(catalogue)
            | StoreStage::Submitted(catalogue)
            | StoreStage::Pending(catalogue) => catalogue.products.as_deref(),
            _ => None,
        }
    }

    /// Whether the store has been created on the server and moved past step one.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.state() != StoreState::CreateStore
    }
}

impl TryFrom<StoreSnapshotDto> for StoreProgress {
    type Error = SnapshotError;

    fn try_from(dto: StoreSnapshotDto) -> Result<Self, Self::Error> {
        let is_club = dto.store_type == StoreType::Club;
        if !is_club && dto.state == StoreState::ClubInfo {
            return Err(SnapshotError::ClubStateOnNisit(dto.id));
        }
        if !is_club && dto.club_info.is_some() {
            return Err(SnapshotError::ClubInfoOnNisit(dto.id));
        }

        let layout = if dto.layout_description.is_some() || dto.layout_file_name.is_some() {
            Some(LayoutInfo {
                description: dto.layout_description,
                file_name: dto.layout_file_name.filter(|name| !name.is_empty()),
            })
        } else {
            None
        };
        let club_info = dto.club_info;
        let catalogue = || Catalogue {
            club_info: club_info.clone(),
            layout: layout.clone(),
            products: dto.products.clone(),
        };

        let stage = match dto.state {
            StoreState::CreateStore => StoreStage::CreateStore,
            StoreState::ClubInfo => StoreStage::ClubInfo {
                club_info: club_info.clone(),
            },
            StoreState::StoreDetails => StoreStage::StoreDetails {
                club_info: club_info.clone(),
                layout: layout.clone(),
            },
            StoreState::ProductDetails => StoreStage::ProductDetails(catalogue()),
            StoreState::Submitted => StoreStage::Submitted(catalogue()),
            StoreState::Pending => StoreStage::Pending(catalogue()),
        };

        Ok(Self {
            id: dto.id,
            store_name: dto.store_name,
            store_type: dto.store_type,
            member_emails: dto.member_emails,
            missing_profile_emails: dto.missing_profile_emails,
            stage,
        })
    }
}

/// Body of `POST /store/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub store_name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    pub member_gmails: Vec<String>,
}

/// Body of `PATCH /store/club-info`. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubInfoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_nisit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_application_media_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(store_type: &str, state: &str) -> serde_json::Value {
        json!({
            "id": 42,
            "storeName": "Drinks",
            "type": store_type,
            "state": state,
            "memberEmails": [
                {"email": "a@ku.th", "status": "Joined"},
                {"email": "b@ku.th", "status": "Invited"}
            ]
        })
    }

    #[test]
    fn test_store_type_from_param() {
        assert_eq!(StoreType::from_param(Some("club")), Some(StoreType::Club));
        assert_eq!(StoreType::from_param(Some("NISIT")), Some(StoreType::Nisit));
        assert_eq!(StoreType::from_param(Some(" Club ")), Some(StoreType::Club));
        assert_eq!(StoreType::from_param(Some("shop")), None);
        assert_eq!(StoreType::from_param(Some("")), None);
        assert_eq!(StoreType::from_param(None), None);
    }

    #[test]
    fn test_store_state_order() {
        assert!(StoreState::CreateStore < StoreState::ClubInfo);
        assert!(StoreState::StoreDetails < StoreState::ProductDetails);
        assert_eq!(StoreState::ProductDetails.to_string(), "ProductDetails");
    }

    #[test]
    fn test_create_store_snapshot_carries_no_stage_data() {
        let dto: StoreSnapshotDto =
            serde_json::from_value(snapshot("Nisit", "CreateStore")).unwrap();
        let progress = StoreProgress::try_from(dto).unwrap();

        assert_eq!(progress.state(), StoreState::CreateStore);
        assert_eq!(progress.member_emails.len(), 2);
        assert!(progress.layout().is_none());
        assert!(progress.products().is_none());
        assert!(!progress.is_created());
    }

    #[test]
    fn test_stage_drops_fields_not_valid_yet() {
        let mut value = snapshot("Club", "ClubInfo");
        value["layoutDescription"] = json!("stale");
        value["products"] = json!([{"id": 1, "name": "Tea"}]);
        value["clubInfo"] = json!({"clubName": "Robotics"});

        let progress = StoreProgress::try_from(
            serde_json::from_value::<StoreSnapshotDto>(value).unwrap(),
        )
        .unwrap();

        assert_eq!(progress.state(), StoreState::ClubInfo);
        assert_eq!(
            progress.club_info().and_then(|info| info.club_name.as_deref()),
            Some("Robotics")
        );
        assert!(progress.layout().is_none());
        assert!(progress.products().is_none());
    }

    #[test]
    fn test_product_stage_keeps_everything() {
        let mut value = snapshot("Nisit", "ProductDetails");
        value["layoutDescription"] = json!("corner booth");
        value["layoutFileName"] = json!("layout.png");
        value["products"] = json!([
            {"id": 7, "name": "Tea", "price": 25, "imageName": "tea.png"},
            {"id": "x-2", "name": "Cake", "price": "40.5"}
        ]);

        let progress = StoreProgress::try_from(
            serde_json::from_value::<StoreSnapshotDto>(value).unwrap(),
        )
        .unwrap();

        let layout = progress.layout().unwrap();
        assert_eq!(layout.description.as_deref(), Some("corner booth"));
        assert_eq!(layout.file_name.as_deref(), Some("layout.png"));

        let products = progress.products().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_ref().unwrap().to_string(), "7");
        assert_eq!(products[0].display_file_name(), Some("tea.png"));
        assert_eq!(products[1].price.as_ref().unwrap().to_string(), "40.5");
    }

    #[test]
    fn test_absent_products_differ_from_empty_products() {
        let absent = StoreProgress::try_from(
            serde_json::from_value::<StoreSnapshotDto>(snapshot("Nisit", "Pending")).unwrap(),
        )
        .unwrap();
        assert!(absent.products().is_none());

        let mut value = snapshot("Nisit", "Pending");
        value["products"] = json!([]);
        let empty =
            StoreProgress::try_from(serde_json::from_value::<StoreSnapshotDto>(value).unwrap())
                .unwrap();
        assert_eq!(empty.products(), Some(&[][..]));
    }

    #[test]
    fn test_nisit_in_club_state_is_rejected() {
        let dto: StoreSnapshotDto = serde_json::from_value(snapshot("Nisit", "ClubInfo")).unwrap();
        assert_eq!(
            StoreProgress::try_from(dto),
            Err(SnapshotError::ClubStateOnNisit(42))
        );
    }

    #[test]
    fn test_nisit_with_club_info_is_rejected() {
        let mut value = snapshot("Nisit", "StoreDetails");
        value["clubInfo"] = json!({"clubName": "Nope"});
        let dto: StoreSnapshotDto = serde_json::from_value(value).unwrap();
        assert_eq!(
            StoreProgress::try_from(dto),
            Err(SnapshotError::ClubInfoOnNisit(42))
        );
    }

    #[test]
    fn test_club_info_media_id_fallback() {
        let info: ClubInfo =
            serde_json::from_value(json!({"applicationFileId": "media-old"})).unwrap();
        assert_eq!(info.application_media_id(), Some("media-old"));

        let info: ClubInfo = serde_json::from_value(json!({
            "clubApplicationMediaId": "media-new",
            "applicationFileId": "media-old"
        }))
        .unwrap();
        assert_eq!(info.application_media_id(), Some("media-new"));
    }

    #[test]
    fn test_create_request_wire_shape() {
        let request = CreateStoreRequest {
            store_name: "Drinks".to_string(),
            store_type: StoreType::Club,
            member_gmails: vec!["a@ku.th".to_string()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"storeName": "Drinks", "type": "Club", "memberGmails": ["a@ku.th"]})
        );
    }

    #[test]
    fn test_club_info_request_omits_absent_fields() {
        let request = UpdateClubInfoRequest {
            club_name: Some("Robotics".to_string()),
            club_application_media_id: Some("m-1".to_string()),
            ..UpdateClubInfoRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"clubName": "Robotics", "clubApplicationMediaId": "m-1"})
        );
    }
}
