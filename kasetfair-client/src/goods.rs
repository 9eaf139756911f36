//! Goods catalog of a created store.
//!
//! Edits are held as per-row drafts; every row keeps its own field and
//! request errors, and a failed call never drops the last loaded list.

use std::collections::HashMap;

use shared::models::{CreateGoodRequest, Good, GoodsType, MediaPurpose, UpdateGoodRequest};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{Attachment, StoreApi};
use crate::errors::{ApiError, WizardError};

const LOAD_FALLBACK: &str = "Unable to load store goods";
const SAVE_FALLBACK: &str = "Failed to save good";
const CREATE_FALLBACK: &str = "Failed to create good";
const DELETE_FALLBACK: &str = "Failed to delete good";
const UPLOAD_FALLBACK: &str = "Image upload failed";

const NAME_REQUIRED: &str = "Please enter a name.";
const PRICE_INVALID: &str = "Please enter a valid price.";
const UNKNOWN_ROW: &str = "This good is no longer in the list.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodField {
    Name,
    Price,
}

/// Editable copy of a good, or of a row not yet created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodDraft {
    pub name: String,
    pub price: String,
    pub goods_type: GoodsType,
    pub good_media_id: Option<String>,
}

impl From<&Good> for GoodDraft {
    fn from(good: &Good) -> Self {
        Self {
            name: good.name.clone(),
            price: good.price.clone(),
            goods_type: good.goods_type,
            good_media_id: good.good_media_id.clone(),
        }
    }
}

/// Field-level messages for one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub price: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    fn clear(&mut self, field: GoodField) {
        match field {
            GoodField::Name => self.name = None,
            GoodField::Price => self.price = None,
        }
    }

    fn first(&self) -> Option<&str> {
        self.name.as_deref().or(self.price.as_deref())
    }
}

/// Checks a draft and returns the trimmed name and parsed price.
///
/// # Errors
/// The messages for every field that failed.
pub fn validate_good(draft: &GoodDraft) -> Result<(String, f64), FieldErrors> {
    let name = draft.name.trim();
    let price = draft
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite());

    let errors = FieldErrors {
        name: name.is_empty().then(|| NAME_REQUIRED.to_string()),
        price: price.is_none().then(|| PRICE_INVALID.to_string()),
    };
    match price {
        Some(price) if errors.is_empty() => Ok((name.to_string(), price)),
        _ => Err(errors),
    }
}

pub struct GoodsCatalog<A> {
    api: A,
    goods: Vec<Good>,
    drafts: HashMap<String, GoodDraft>,
    editing: Option<String>,
    new_drafts: Vec<(String, GoodDraft)>,
    field_errors: HashMap<String, FieldErrors>,
    row_errors: HashMap<String, String>,
    error: Option<String>,
    image_links: HashMap<String, String>,
}

impl<A: StoreApi> GoodsCatalog<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            goods: Vec::new(),
            drafts: HashMap::new(),
            editing: None,
            new_drafts: Vec::new(),
            field_errors: HashMap::new(),
            row_errors: HashMap::new(),
            error: None,
            image_links: HashMap::new(),
        }
    }

    /// Reloads the list and resets every draft of an existing good.
    ///
    /// # Errors
    /// [`WizardError::Api`]; the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), WizardError> {
        self.error = None;
        match self.api.list_goods().await {
            Ok(goods) => {
                debug!(count = goods.len(), "goods loaded");
                self.drafts = goods
                    .iter()
                    .map(|good| (good.id.clone(), GoodDraft::from(good)))
                    .collect();
                self.goods = goods;
                self.field_errors.clear();
                self.row_errors.clear();
                self.editing = None;
                Ok(())
            }
            Err(err) => Err(self.fail_global(err, LOAD_FALLBACK)),
        }
    }

    /// Resolves image links for goods that have media. Failures are skipped.
    pub async fn refresh_image_links(&mut self) {
        let media_ids: Vec<(String, String)> = self
            .goods
            .iter()
            .filter_map(|good| Some((good.id.clone(), good.good_media_id.clone()?)))
            .collect();
        for (good_id, media_id) in media_ids {
            match self.api.media_link(&media_id).await {
                Ok(media) => {
                    if let Some(link) = media.link {
                        self.image_links.insert(good_id, link);
                    }
                }
                Err(err) => warn!(%good_id, %media_id, error = %err, "failed to load good image"),
            }
        }
    }

    pub fn begin_edit(&mut self, good_id: &str) -> bool {
        let Some(good) = self.goods.iter().find(|good| good.id == good_id) else {
            return false;
        };
        self.drafts.insert(good.id.clone(), GoodDraft::from(good));
        self.editing = Some(good.id.clone());
        true
    }

    /// Drops the edits to a good and its errors.
    pub fn cancel_edit(&mut self, good_id: &str) {
        if let Some(good) = self.goods.iter().find(|good| good.id == good_id) {
            self.drafts.insert(good.id.clone(), GoodDraft::from(good));
        }
        self.field_errors.remove(good_id);
        self.row_errors.remove(good_id);
        if self.editing.as_deref() == Some(good_id) {
            self.editing = None;
        }
    }

    /// Edits a field of an existing good's draft or of a new row.
    pub fn set_field(&mut self, row_id: &str, field: GoodField, value: impl Into<String>) -> bool {
        let Some(draft) = self.draft_mut(row_id) else {
            return false;
        };
        match field {
            GoodField::Name => draft.name = value.into(),
            GoodField::Price => draft.price = value.into(),
        }
        if let Some(errors) = self.field_errors.get_mut(row_id) {
            errors.clear(field);
        }
        self.row_errors.remove(row_id);
        true
    }

    pub fn set_type(&mut self, row_id: &str, goods_type: GoodsType) -> bool {
        let Some(draft) = self.draft_mut(row_id) else {
            return false;
        };
        draft.goods_type = goods_type;
        true
    }

    /// Uploads an image for a row and records its media id in the draft.
    ///
    /// # Errors
    /// [`WizardError::Api`], also kept as the row error.
    pub async fn upload_image(&mut self, row_id: &str, file: &Attachment) -> Result<(), WizardError> {
        if self.draft_mut(row_id).is_none() {
            return Err(WizardError::InvalidTransition(UNKNOWN_ROW.to_string()));
        }
        self.row_errors.remove(row_id);
        match self.api.upload_media(MediaPurpose::StoreGoods, file).await {
            Ok(media) => {
                debug!(%row_id, media_id = %media.id, "good image uploaded");
                if let Some(draft) = self.draft_mut(row_id) {
                    draft.good_media_id = Some(media.id);
                }
                Ok(())
            }
            Err(err) => Err(self.fail_row(row_id, err, UPLOAD_FALLBACK)),
        }
    }

    /// Sends the draft of an existing good.
    ///
    /// # Errors
    /// [`WizardError::Validation`] without a request when a field is invalid,
    /// otherwise [`WizardError::Api`].
    pub async fn save_good(&mut self, good_id: &str) -> Result<(), WizardError> {
        let Some(draft) = self.drafts.get(good_id).cloned() else {
            return Err(WizardError::InvalidTransition(UNKNOWN_ROW.to_string()));
        };
        let (name, price) = match validate_good(&draft) {
            Ok(valid) => valid,
            Err(errors) => return Err(self.reject_fields(good_id, errors)),
        };
        let request = UpdateGoodRequest {
            name: Some(name),
            goods_type: Some(draft.goods_type),
            price: Some(price),
            good_media_id: draft.good_media_id,
        };

        self.row_errors.remove(good_id);
        match self.api.update_good(good_id, &request).await {
            Ok(updated) => {
                info!(good_id = %updated.id, "good updated");
                self.drafts
                    .insert(updated.id.clone(), GoodDraft::from(&updated));
                if let Some(slot) = self.goods.iter_mut().find(|good| good.id == updated.id) {
                    *slot = updated;
                }
                self.field_errors.remove(good_id);
                self.editing = None;
                Ok(())
            }
            Err(err) => Err(self.fail_row(good_id, err, SAVE_FALLBACK)),
        }
    }

    /// # Errors
    /// [`WizardError::Api`], kept as the catalog error; the list is unchanged.
    pub async fn delete_good(&mut self, good_id: &str) -> Result<(), WizardError> {
        self.error = None;
        match self.api.delete_good(good_id).await {
            Ok(()) => {
                info!(%good_id, "good deleted");
                self.goods.retain(|good| good.id != good_id);
                self.drafts.remove(good_id);
                self.field_errors.remove(good_id);
                self.row_errors.remove(good_id);
                self.image_links.remove(good_id);
                if self.editing.as_deref() == Some(good_id) {
                    self.editing = None;
                }
                Ok(())
            }
            Err(err) => Err(self.fail_global(err, DELETE_FALLBACK)),
        }
    }

    /// Appends an empty new row and returns its temporary id.
    pub fn add_new_draft(&mut self) -> String {
        let temp_id = format!("new-{}", Uuid::new_v4());
        self.new_drafts.push((temp_id.clone(), GoodDraft::default()));
        temp_id
    }

    pub fn remove_new_draft(&mut self, temp_id: &str) -> bool {
        let before = self.new_drafts.len();
        self.new_drafts.retain(|(id, _)| id != temp_id);
        self.field_errors.remove(temp_id);
        self.row_errors.remove(temp_id);
        self.new_drafts.len() != before
    }

    /// Creates a good from a new row; on success the row becomes a listed good.
    ///
    /// # Errors
    /// [`WizardError::Validation`] without a request when a field is invalid,
    /// otherwise [`WizardError::Api`].
    pub async fn create_from_draft(&mut self, temp_id: &str) -> Result<(), WizardError> {
        let Some(draft) = self
            .new_drafts
            .iter()
            .find(|(id, _)| id == temp_id)
            .map(|(_, draft)| draft.clone())
        else {
            return Err(WizardError::InvalidTransition(UNKNOWN_ROW.to_string()));
        };
        let (name, price) = match validate_good(&draft) {
            Ok(valid) => valid,
            Err(errors) => return Err(self.reject_fields(temp_id, errors)),
        };
        let request = CreateGoodRequest {
            name,
            goods_type: draft.goods_type,
            price,
            good_media_id: draft.good_media_id,
        };

        self.row_errors.remove(temp_id);
        match self.api.create_good(&request).await {
            Ok(created) => {
                info!(good_id = %created.id, "good created");
                self.remove_new_draft(temp_id);
                self.drafts
                    .insert(created.id.clone(), GoodDraft::from(&created));
                self.goods.push(created);
                Ok(())
            }
            Err(err) => Err(self.fail_row(temp_id, err, CREATE_FALLBACK)),
        }
    }

    // ---- accessors ----

    pub fn goods(&self) -> &[Good] {
        &self.goods
    }

    pub fn draft(&self, good_id: &str) -> Option<&GoodDraft> {
        self.drafts.get(good_id)
    }

    pub fn new_drafts(&self) -> impl Iterator<Item = (&str, &GoodDraft)> {
        self.new_drafts.iter().map(|(id, draft)| (id.as_str(), draft))
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn field_errors(&self, row_id: &str) -> Option<&FieldErrors> {
        self.field_errors.get(row_id)
    }

    pub fn row_error(&self, row_id: &str) -> Option<&str> {
        self.row_errors.get(row_id).map(String::as_str)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn image_link(&self, good_id: &str) -> Option<&str> {
        self.image_links.get(good_id).map(String::as_str)
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    // ---- internals ----

    fn draft_mut(&mut self, row_id: &str) -> Option<&mut GoodDraft> {
        if let Some(draft) = self.drafts.get_mut(row_id) {
            return Some(draft);
        }
        self.new_drafts
            .iter_mut()
            .find(|(id, _)| id == row_id)
            .map(|(_, draft)| draft)
    }

    fn reject_fields(&mut self, row_id: &str, errors: FieldErrors) -> WizardError {
        let message = errors.first().unwrap_or(PRICE_INVALID).to_string();
        self.field_errors.insert(row_id.to_string(), errors);
        WizardError::Validation(message)
    }

    fn fail_row(&mut self, row_id: &str, err: ApiError, fallback: &str) -> WizardError {
        warn!(%row_id, error = %err, "goods request failed");
        let err = WizardError::api(err, fallback);
        self.row_errors.insert(row_id.to_string(), err.to_string());
        err
    }

    fn fail_global(&mut self, err: ApiError, fallback: &str) -> WizardError {
        warn!(error = %err, "goods request failed");
        let err = WizardError::api(err, fallback);
        self.error = Some(err.to_string());
        err
    }
}
