use serde::{Deserialize, Serialize};

use super::store::{StoreState, StoreType};

/// Store header included in a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedStore {
    pub id: i64,
    pub store_name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    pub state: StoreState,
    #[serde(default)]
    pub booth_number: Option<String>,
    #[serde(default)]
    pub store_admin_nisit_id: Option<String>,
}

/// One pass/fail sub-check of an admission requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub key: String,
    pub label: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One admission requirement and its sub-checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSection {
    pub key: String,
    pub label: String,
    pub ok: bool,
    #[serde(default)]
    pub items: Vec<ValidationItem>,
}

/// Response of `GET /store/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreValidateResponse {
    pub store: ValidatedStore,
    pub is_valid: bool,
    #[serde(default)]
    pub sections: Vec<ValidationSection>,
}
