//! Registration wizard controller.
//!
//! The controller owns the store type, the last server snapshot, the
//! requested step and every step draft. Hosts drive it through
//! [`WizardController::on_init`], [`WizardController::on_resume_focus`] and
//! the step operations; each operation takes `&mut self` for its whole
//! duration, so only one can be in flight.

use std::time::Duration;

use shared::config::client::ClientConfig;
use shared::models::{MediaPurpose, StoreProgress, StoreState, StoreType};
use tracing::{debug, error, info, warn};

use crate::api::{Attachment, StoreApi};
use crate::delay::pause;
use crate::errors::{ApiError, ApiResult, WizardError};
use crate::storage::{DraftCache, KeyValueStore};

use super::club_info::{ClubInfoDraft, ClubInfoField};
use super::products::{ProductField, ProductsDraft};
use super::steps::{
    StepDefinition, StepIndicator, StepKind, clamp_step_to_state, preferred_step_for_state,
    step_indicator, step_kind_at, steps_for_type,
};
use super::store_details::LayoutDraft;
use super::validation::{MIN_MEMBERS, build_create_request};

const STATUS_FALLBACK: &str = "Unable to load store status";
const CREATE_FALLBACK: &str = "Failed to create store";
const CLUB_INFO_FALLBACK: &str = "Failed to save club information";
const LEAVE_FALLBACK: &str = "Failed to leave store";

const NO_TYPE_MESSAGE: &str = "Please choose a store type first.";
const ALREADY_CREATED_MESSAGE: &str = "This store has already been created.";
const TYPE_LOCKED_MESSAGE: &str = "The store type cannot be changed after the store is created.";
const CREATE_FIRST_MESSAGE: &str = "Please create a store before submitting club information.";

/// Values a host passes in from navigation and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOptions {
    /// Type requested by navigation, e.g. `?type=club`.
    pub requested_type: Option<StoreType>,
    /// Step requested by navigation; clamped for display.
    pub requested_step: Option<usize>,
    /// Delay used by the steps whose persistence is simulated.
    pub save_delay: Duration,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            requested_type: None,
            requested_step: None,
            save_delay: Duration::ZERO,
        }
    }
}

impl WizardOptions {
    #[must_use]
    pub const fn from_config(config: &ClientConfig) -> Self {
        Self {
            requested_type: None,
            requested_step: None,
            save_delay: Duration::from_millis(config.simulated_save_delay_ms),
        }
    }

    #[must_use]
    pub fn with_type(mut self, store_type: Option<StoreType>) -> Self {
        self.requested_type = store_type;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Option<usize>) -> Self {
        self.requested_step = step;
        self
    }
}

pub struct WizardController<A, S> {
    api: A,
    cache: DraftCache<S>,
    options: WizardOptions,
    store_type: Option<StoreType>,
    snapshot: Option<StoreProgress>,
    requested_step: usize,
    step_error: Option<String>,
    saving: bool,
    store_name: String,
    members: Vec<String>,
    club_info: ClubInfoDraft,
    layout: LayoutDraft,
    products: ProductsDraft,
}

impl<A: StoreApi, S: KeyValueStore> WizardController<A, S> {
    pub fn new(api: A, cache: DraftCache<S>, options: WizardOptions) -> Self {
        Self {
            api,
            cache,
            store_type: options.requested_type,
            requested_step: options.requested_step.unwrap_or(1).max(1),
            options,
            snapshot: None,
            step_error: None,
            saving: false,
            store_name: String::new(),
            members: empty_members(),
            club_info: ClubInfoDraft::default(),
            layout: LayoutDraft::default(),
            products: ProductsDraft::default(),
        }
    }

    // ---- lifecycle ----

    /// Loads the user's store and lands on the step its state prefers.
    ///
    /// A missing store is not an error: the navigation type is kept and the
    /// cached drafts are dropped.
    ///
    /// # Errors
    /// [`WizardError::Api`] when the status cannot be loaded; step and type
    /// are left as they were.
    pub async fn on_init(&mut self) -> Result<(), WizardError> {
        match self.api.store_status().await {
            Ok(progress) => {
                let store_type = progress.store_type;
                let state = progress.state();
                info!(store_id = progress.id, %store_type, %state, "store status loaded");
                self.adopt(progress);
                self.restore_cached_club_info();
                self.requested_step = preferred_step_for_state(store_type, state);
                self.step_error = None;
                Ok(())
            }
            Err(ApiError::NotFound) => {
                info!("no store yet for this user");
                self.snapshot = None;
                self.store_type = self.options.requested_type;
                self.cache.clear_club_info();
                self.cache.clear_active_store_id();
                Ok(())
            }
            Err(err) => Err(self.fail(WizardError::api(err, STATUS_FALLBACK))),
        }
    }

    /// Best-effort refresh when the host regains focus. Never moves the user
    /// and never reports an error.
    pub async fn on_resume_focus(&mut self) {
        match self.api.store_status().await {
            Ok(progress) => {
                debug!(store_id = progress.id, state = %progress.state(), "store status refreshed");
                self.adopt(progress);
                self.restore_cached_club_info();
            }
            Err(ApiError::NotFound) => debug!("focus refresh found no store"),
            Err(err) => warn!(error = %err, "focus refresh failed"),
        }
    }

    // ---- navigation ----

    /// Step shown to the user: the requested step clamped to what the last
    /// known server state allows.
    #[must_use]
    pub fn current_step(&self) -> usize {
        clamp_step_to_state(self.requested_step, self.store_type, self.server_state())
    }

    /// What the current step collects; `None` until a store type is known.
    #[must_use]
    pub fn current_step_kind(&self) -> Option<StepKind> {
        step_kind_at(self.store_type?, self.current_step())
    }

    /// Requests a step and clears the step error. Steps below 1 become 1;
    /// the result is clamped when read through [`Self::current_step`].
    pub fn go_to_step(&mut self, step: usize) {
        self.step_error = None;
        self.requested_step = step.max(1);
    }

    /// Moves one step forward from the displayed step.
    pub fn go_next_step(&mut self) {
        self.go_to_step(self.current_step() + 1);
    }

    /// Moves one step back, stopping at the first step.
    pub fn go_previous_step(&mut self) {
        self.go_to_step(self.current_step().saturating_sub(1));
    }

    /// Steps of the selected store type; empty before a type is chosen.
    #[must_use]
    pub fn steps(&self) -> &'static [StepDefinition] {
        match self.store_type {
            Some(store_type) => steps_for_type(store_type),
            None => &[],
        }
    }

    /// Completed/current/upcoming status of every step, for display.
    #[must_use]
    pub fn step_indicator(&self) -> Vec<StepIndicator> {
        self.store_type
            .map(|store_type| step_indicator(store_type, self.current_step()))
            .unwrap_or_default()
    }

    // ---- step operations ----

    /// Picks the store type before the store exists. Every draft, the
    /// snapshot and the cached entries are reset.
    ///
    /// # Errors
    /// [`WizardError::InvalidTransition`] once the store has been created.
    pub fn select_store_type(&mut self, store_type: StoreType) -> Result<(), WizardError> {
        if self.is_store_created() {
            return Err(self.fail(WizardError::InvalidTransition(
                TYPE_LOCKED_MESSAGE.to_string(),
            )));
        }
        self.cache.clear_club_info();
        self.cache.clear_active_store_id();
        self.snapshot = None;
        self.reset_drafts();
        self.store_type = Some(store_type);
        self.go_to_step(1);
        info!(%store_type, "store type selected");
        Ok(())
    }

    /// Validates the first step locally and creates the store.
    ///
    /// # Errors
    /// [`WizardError::Validation`] without any request when a local check
    /// fails, [`WizardError::InvalidTransition`] when the store already
    /// exists, and [`WizardError::Api`] when the server refuses.
    pub async fn create_store(&mut self) -> Result<(), WizardError> {
        let Some(store_type) = self.store_type else {
            return Err(self.fail(WizardError::Validation(NO_TYPE_MESSAGE.to_string())));
        };
        if let Some(state) = self.server_state().filter(|state| *state != StoreState::CreateStore)
        {
            self.requested_step = preferred_step_for_state(store_type, state);
            return Err(self.fail(WizardError::InvalidTransition(
                ALREADY_CREATED_MESSAGE.to_string(),
            )));
        }
        let request = match build_create_request(store_type, &self.store_name, &self.members) {
            Ok(request) => request,
            Err(err) => return Err(self.fail(WizardError::Validation(err.to_string()))),
        };

        self.saving = true;
        let result = self.api.create_store(&request).await;
        self.saving = false;

        match result {
            Ok(progress) => {
                let state = progress.state();
                info!(store_id = progress.id, %state, "store created");
                self.adopt(progress);
                self.requested_step = preferred_step_for_state(store_type, state);
                self.step_error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(WizardError::api(err, CREATE_FALLBACK))),
        }
    }

    /// Saves the club-info step. Individual stores have no such step and
    /// just move on.
    ///
    /// # Errors
    /// [`WizardError::InvalidTransition`] before the store exists, otherwise
    /// [`WizardError::Api`] when the upload or the update fails.
    pub async fn submit_club_info(&mut self) -> Result<(), WizardError> {
        if self.store_type != Some(StoreType::Club) {
            self.go_next_step();
            return Ok(());
        }
        if !self.is_store_created() {
            self.requested_step = 1;
            return Err(self.fail(WizardError::InvalidTransition(
                CREATE_FIRST_MESSAGE.to_string(),
            )));
        }

        self.saving = true;
        let result = self.persist_club_info().await;
        self.saving = false;

        match result {
            Ok(progress) => {
                info!(store_id = progress.id, state = %progress.state(), "club info saved");
                self.cache.clear_club_info();
                self.adopt(progress);
                self.go_next_step();
                Ok(())
            }
            Err(err) => Err(self.fail(WizardError::api(err, CLUB_INFO_FALLBACK))),
        }
    }

    async fn persist_club_info(&mut self) -> ApiResult<StoreProgress> {
        if let Some(file) = &self.club_info.application_file {
            let media = self
                .api
                .upload_media(MediaPurpose::ClubApplication, file)
                .await?;
            debug!(media_id = %media.id, "club application uploaded");
            self.club_info.mark_uploaded(media.id);
            self.persist_club_draft();
        }
        let request = self.club_info.to_request();
        self.api.update_club_info(&request).await
    }

    /// Store details are not persisted yet; waits and moves on.
    pub async fn save_store_details(&mut self) {
        self.saving = true;
        pause(self.options.save_delay).await;
        self.saving = false;
        info!(
            description_len = self.layout.description.len(),
            file = self.layout.display_file_name().unwrap_or("-"),
            "store details saved locally"
        );
        self.go_next_step();
    }

    /// Products are not persisted yet; waits and logs what would be sent.
    pub async fn submit_products(&mut self) {
        self.saving = true;
        pause(self.options.save_delay).await;
        self.saving = false;
        for product in self.products.filled() {
            debug!(id = %product.id, name = %product.name, price = %product.price, "product");
        }
        info!(
            products = self.products.filled().count(),
            "product catalog submitted locally"
        );
        self.step_error = None;
    }

    /// Removes the user from their store and forgets everything about it.
    ///
    /// # Errors
    /// [`WizardError::Api`]; the snapshot and drafts are kept.
    pub async fn leave_store(&mut self) -> Result<(), WizardError> {
        self.saving = true;
        let result = self.api.leave_store().await;
        self.saving = false;

        match result {
            Ok(()) => {
                info!(
                    store_id = ?self.snapshot.as_ref().map(|progress| progress.id),
                    "left store"
                );
                self.cache.clear_club_info();
                self.cache.clear_active_store_id();
                self.snapshot = None;
                self.store_type = None;
                self.reset_drafts();
                self.go_to_step(1);
                Ok(())
            }
            Err(err) => Err(self.fail(WizardError::api(err, LEAVE_FALLBACK))),
        }
    }

    // ---- draft editing ----

    /// Sets the store name draft; trimmed only when the store is created.
    pub fn set_store_name(&mut self, name: impl Into<String>) {
        self.store_name = name.into();
    }

    /// Sets one member slot; `false` when the slot does not exist.
    pub fn set_member(&mut self, index: usize, email: impl Into<String>) -> bool {
        let Some(slot) = self.members.get_mut(index) else {
            return false;
        };
        *slot = email.into();
        true
    }

    /// Appends an empty member slot.
    pub fn add_member(&mut self) {
        self.members.push(String::new());
    }

    /// Removes a member slot, keeping at least the minimum number of slots.
    pub fn remove_member(&mut self, index: usize) -> bool {
        if self.members.len() <= MIN_MEMBERS || index >= self.members.len() {
            return false;
        }
        self.members.remove(index);
        true
    }

    /// Replaces the member slots, padding up to the minimum.
    pub fn set_members<I, T>(&mut self, emails: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.members = emails.into_iter().map(Into::into).collect();
        pad_members(&mut self.members);
    }

    /// Edits a club-info field; club stores also write the draft to the cache.
    pub fn set_club_info_field(&mut self, field: ClubInfoField, value: impl Into<String>) {
        self.club_info.set_field(field, value);
        self.persist_club_draft();
    }

    /// Sets or clears the club application file; the cached draft keeps
    /// its name, not the bytes.
    pub fn attach_club_application(&mut self, file: Option<Attachment>) {
        self.club_info.attach_application(file);
        self.persist_club_draft();
    }

    /// Edits the booth layout description.
    pub fn set_layout_description(&mut self, description: impl Into<String>) {
        self.layout.description = description.into();
    }

    /// Sets or clears the booth layout file.
    pub fn attach_layout_file(&mut self, file: Option<Attachment>) {
        self.layout.file = file;
    }

    /// Appends an empty product row and returns its row id.
    pub fn add_product(&mut self) -> String {
        self.products.add()
    }

    /// Removes a product row; the last row is never removed.
    pub fn remove_product(&mut self, id: &str) -> bool {
        self.products.remove(id)
    }

    /// Edits a field of a product row; `false` for an unknown row.
    pub fn update_product(
        &mut self,
        id: &str,
        field: ProductField,
        value: impl Into<String>,
    ) -> bool {
        self.products.update(id, field, value)
    }

    /// Sets or clears the image of a product row; `false` for an unknown row.
    pub fn attach_product_file(&mut self, id: &str, file: Option<Attachment>) -> bool {
        self.products.attach(id, file)
    }

    /// Dismisses the step error.
    pub fn clear_error(&mut self) {
        self.step_error = None;
    }

    // ---- accessors ----

    pub const fn store_type(&self) -> Option<StoreType> {
        self.store_type
    }

    pub const fn snapshot(&self) -> Option<&StoreProgress> {
        self.snapshot.as_ref()
    }

    pub fn step_error(&self) -> Option<&str> {
        self.step_error.as_deref()
    }

    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub const fn club_info(&self) -> &ClubInfoDraft {
        &self.club_info
    }

    pub const fn layout(&self) -> &LayoutDraft {
        &self.layout
    }

    pub const fn products(&self) -> &ProductsDraft {
        &self.products
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn cache(&self) -> &DraftCache<S> {
        &self.cache
    }

    // ---- internals ----

    fn server_state(&self) -> Option<StoreState> {
        self.snapshot.as_ref().map(StoreProgress::state)
    }

    fn is_store_created(&self) -> bool {
        self.snapshot.as_ref().is_some_and(StoreProgress::is_created)
    }

    /// Replaces the snapshot and reseeds every draft from it.
    fn adopt(&mut self, progress: StoreProgress) {
        self.store_type = Some(progress.store_type);
        self.store_name.clone_from(&progress.store_name);
        self.members = progress
            .member_emails
            .iter()
            .map(|member| member.email.clone())
            .collect();
        pad_members(&mut self.members);

        if let Some(info) = progress.club_info() {
            self.club_info = ClubInfoDraft::from_snapshot(info);
        }
        if let Some(layout) = progress.layout() {
            self.layout.seed(layout);
        }
        if let Some(products) = progress.products() {
            self.products = ProductsDraft::from_snapshot(products);
        }

        self.cache.set_active_store_id(progress.id);
        self.snapshot = Some(progress);
    }

    fn restore_cached_club_info(&mut self) {
        if self.store_type != Some(StoreType::Club) {
            return;
        }
        if let Some(cached) = self.cache.load_club_info() {
            debug!("restored cached club info draft");
            self.club_info.restore(cached);
        }
    }

    fn persist_club_draft(&self) {
        if self.store_type == Some(StoreType::Club) {
            self.cache.save_club_info(&self.club_info.to_cached());
        }
    }

    fn reset_drafts(&mut self) {
        self.store_name.clear();
        self.members = empty_members();
        self.club_info = ClubInfoDraft::default();
        self.layout = LayoutDraft::default();
        self.products = ProductsDraft::default();
    }

    fn fail(&mut self, err: WizardError) -> WizardError {
        match &err {
            WizardError::Api { source, .. } => error!(error = %source, "store request failed"),
            other => debug!(error = %other, "wizard step rejected"),
        }
        self.step_error = Some(err.to_string());
        err
    }
}

fn empty_members() -> Vec<String> {
    vec![String::new(); MIN_MEMBERS]
}

fn pad_members(members: &mut Vec<String>) {
    if members.len() < MIN_MEMBERS {
        members.resize(MIN_MEMBERS, String::new());
    }
}
