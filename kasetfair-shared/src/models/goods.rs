use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Category of a good sold at a booth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum GoodsType {
    #[default]
    Food,
    NonFood,
}

/// A good as stored by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub goods_type: GoodsType,
    /// Decimal string, as the API formats prices.
    pub price: String,
    pub store_id: i64,
    #[serde(default)]
    pub good_media_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /store/goods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoodRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub goods_type: GoodsType,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_media_id: Option<String>,
}

/// Body of `PATCH /store/goods/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoodRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub goods_type: Option<GoodsType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_media_id: Option<String>,
}
