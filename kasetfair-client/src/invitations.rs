//! Invitations to other users' stores, shown on the home page.

use shared::models::Invitation;
use tracing::{debug, warn};

use crate::api::StoreApi;
use crate::errors::WizardError;

const LOAD_FALLBACK: &str = "Failed to load invitations";

#[derive(Debug, Default)]
pub struct InvitationList {
    invitations: Vec<Invitation>,
    error: Option<String>,
}

impl InvitationList {
    /// Reloads the list. A failure empties it and keeps the message.
    ///
    /// # Errors
    /// [`WizardError::Api`].
    pub async fn refresh(&mut self, api: &impl StoreApi) -> Result<(), WizardError> {
        self.error = None;
        match api.list_invitations().await {
            Ok(invitations) => {
                debug!(count = invitations.len(), "invitations loaded");
                self.invitations = invitations;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load invitations");
                self.invitations.clear();
                let err = WizardError::api(err, LOAD_FALLBACK);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
