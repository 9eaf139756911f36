//! Nisit (student) profile.
//!
//! A user needs a registered profile before anyone can add them as a store
//! member. Fields are checked locally before registering or updating.

use shared::models::{MediaPurpose, NisitInfo, UpdateNisitInfoRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{Attachment, StoreApi};
use crate::errors::{ApiError, WizardError};
use crate::wizard::validation::is_valid_email;

const LOAD_FALLBACK: &str = "Failed to load profile";
const REGISTER_FALLBACK: &str = "Failed to register profile";
const UPDATE_FALLBACK: &str = "Failed to update profile";
const UPLOAD_FALLBACK: &str = "Nisit card upload failed";

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ProfileError {
    #[error("Please enter your {0}.")]
    Required(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Nisit ID must be 10 digits.")]
    InvalidNisitId,
    #[error("Nothing to update.")]
    NoChanges,
}

fn check_nisit_id(nisit_id: &str) -> Result<(), ProfileError> {
    if nisit_id.len() == 10 && nisit_id.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ProfileError::InvalidNisitId)
    }
}

/// Checks a full profile and returns it trimmed.
///
/// # Errors
/// The first field that failed, in form order.
pub fn validate_profile(info: &NisitInfo) -> Result<NisitInfo, ProfileError> {
    let trimmed = NisitInfo {
        first_name: info.first_name.trim().to_string(),
        last_name: info.last_name.trim().to_string(),
        nisit_id: info.nisit_id.trim().to_string(),
        email: info.email.trim().to_string(),
        phone: info.phone.trim().to_string(),
        nisit_card_media_id: info.nisit_card_media_id.clone(),
    };
    let required = [
        ("first name", &trimmed.first_name),
        ("last name", &trimmed.last_name),
        ("nisit ID", &trimmed.nisit_id),
        ("email", &trimmed.email),
        ("phone number", &trimmed.phone),
    ];
    if let Some((label, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ProfileError::Required(*label));
    }
    check_nisit_id(&trimmed.nisit_id)?;
    if !is_valid_email(&trimmed.email) {
        return Err(ProfileError::InvalidEmail);
    }
    Ok(trimmed)
}

/// Checks the fields present in a partial update.
///
/// # Errors
/// [`ProfileError::NoChanges`] for an empty update, or the first bad field.
pub fn validate_update(request: &UpdateNisitInfoRequest) -> Result<(), ProfileError> {
    if request.is_empty() {
        return Err(ProfileError::NoChanges);
    }
    let present = [
        ("first name", &request.first_name),
        ("last name", &request.last_name),
        ("phone number", &request.phone),
    ];
    for (label, value) in present {
        if value.as_deref().is_some_and(|value| value.trim().is_empty()) {
            return Err(ProfileError::Required(label));
        }
    }
    if let Some(nisit_id) = &request.nisit_id {
        check_nisit_id(nisit_id.trim())?;
    }
    if request
        .email
        .as_deref()
        .is_some_and(|email| !is_valid_email(email.trim()))
    {
        return Err(ProfileError::InvalidEmail);
    }
    Ok(())
}

/// Loaded profile plus the last failure.
pub struct ProfileForm<A> {
    api: A,
    info: Option<NisitInfo>,
    error: Option<String>,
}

impl<A: StoreApi> ProfileForm<A> {
    pub const fn new(api: A) -> Self {
        Self {
            api,
            info: None,
            error: None,
        }
    }

    /// Loads the profile; `Ok(false)` when the user has not registered yet.
    ///
    /// # Errors
    /// [`WizardError::Api`] for any failure other than not found.
    pub async fn load(&mut self) -> Result<bool, WizardError> {
        self.error = None;
        match self.api.nisit_info().await {
            Ok(info) => {
                self.info = Some(info);
                Ok(true)
            }
            Err(ApiError::NotFound) => {
                self.info = None;
                Ok(false)
            }
            Err(err) => Err(self.fail(err, LOAD_FALLBACK)),
        }
    }

    /// Registers a new profile.
    ///
    /// # Errors
    /// [`WizardError::Validation`] without a request, otherwise [`WizardError::Api`].
    pub async fn register(&mut self, info: &NisitInfo) -> Result<(), WizardError> {
        let info = validate_profile(info).map_err(|err| self.reject(&err))?;
        self.error = None;
        match self.api.register_nisit(&info).await {
            Ok(saved) => {
                info!(nisit_id = %saved.nisit_id, "nisit profile registered");
                self.info = Some(saved);
                Ok(())
            }
            Err(err) => Err(self.fail(err, REGISTER_FALLBACK)),
        }
    }

    /// Sends the changed fields.
    ///
    /// # Errors
    /// [`WizardError::Validation`] without a request, otherwise [`WizardError::Api`].
    pub async fn update(&mut self, request: &UpdateNisitInfoRequest) -> Result<(), WizardError> {
        validate_update(request).map_err(|err| self.reject(&err))?;
        self.error = None;
        match self.api.update_nisit_info(request).await {
            Ok(saved) => {
                info!("nisit profile updated");
                self.info = Some(saved);
                Ok(())
            }
            Err(err) => Err(self.fail(err, UPDATE_FALLBACK)),
        }
    }

    /// Uploads a student card image and returns its media id.
    ///
    /// # Errors
    /// [`WizardError::Api`].
    pub async fn upload_card(&mut self, file: &Attachment) -> Result<String, WizardError> {
        self.error = None;
        match self.api.upload_media(MediaPurpose::NisitCard, file).await {
            Ok(media) => Ok(media.id),
            Err(err) => Err(self.fail(err, UPLOAD_FALLBACK)),
        }
    }

    pub const fn info(&self) -> Option<&NisitInfo> {
        self.info.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    fn reject(&mut self, err: &ProfileError) -> WizardError {
        let message = err.to_string();
        self.error = Some(message.clone());
        WizardError::Validation(message)
    }

    fn fail(&mut self, err: ApiError, fallback: &str) -> WizardError {
        warn!(error = %err, "nisit profile request failed");
        let err = WizardError::api(err, fallback);
        self.error = Some(err.to_string());
        err
    }
}
