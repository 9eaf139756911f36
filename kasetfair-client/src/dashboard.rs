//! Store validation dashboard.

use shared::models::{StoreValidateResponse, ValidationSection};
use tracing::error;

use crate::api::StoreApi;
use crate::errors::WizardError;

const VALIDATION_FALLBACK: &str = "Unable to load store validation";

/// Management page that fixes a failing validation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagementArea {
    /// Members and basic store information.
    Info,
    /// Layout and promotional files.
    Layout,
    Goods,
}

impl ManagementArea {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Info => "/store/info",
            Self::Layout => "/store/layout",
            Self::Goods => "/store/goods",
        }
    }
}

/// Maps a section key to its management area; unknown keys go to [`ManagementArea::Info`].
#[must_use]
pub fn route_for_section(section_key: &str) -> ManagementArea {
    match section_key {
        "storeDetail" => ManagementArea::Layout,
        "goods" => ManagementArea::Goods,
        _ => ManagementArea::Info,
    }
}

/// Percentage of passing items across all sections, rounded half up.
/// Zero when there are no items at all.
#[must_use]
pub fn progress_percent(sections: &[ValidationSection]) -> u8 {
    let total: usize = sections.iter().map(|section| section.items.len()).sum();
    if total == 0 {
        return 0;
    }
    let passed = sections
        .iter()
        .flat_map(|section| &section.items)
        .filter(|item| item.ok)
        .count();
    let rounded = (passed * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Validation report plus the values derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDashboard {
    report: StoreValidateResponse,
}

impl ValidationDashboard {
    #[must_use]
    pub const fn new(report: StoreValidateResponse) -> Self {
        Self { report }
    }

    #[must_use]
    pub const fn report(&self) -> &StoreValidateResponse {
        &self.report
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        progress_percent(&self.report.sections)
    }

    /// Readiness as the server reports it, whatever the progress says.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.report.is_valid
    }

    /// Sections that still fail, with where to fix them.
    pub fn failing_sections(&self) -> impl Iterator<Item = (&ValidationSection, ManagementArea)> {
        self.report
            .sections
            .iter()
            .filter(|section| !section.ok)
            .map(|section| (section, route_for_section(&section.key)))
    }

    #[must_use]
    pub fn needs_attention(&self, area: ManagementArea) -> bool {
        !self.report.is_valid && self.failing_sections().any(|(_, routed)| routed == area)
    }
}

/// Fetches the validation report for the user's store.
///
/// # Errors
/// [`WizardError::Api`] with the extracted message.
pub async fn load_dashboard<A: StoreApi>(api: &A) -> Result<ValidationDashboard, WizardError> {
    match api.validate_store().await {
        Ok(report) => Ok(ValidationDashboard::new(report)),
        Err(err) => {
            error!(error = %err, "failed to fetch store validation");
            Err(WizardError::api(err, VALIDATION_FALLBACK))
        }
    }
}
