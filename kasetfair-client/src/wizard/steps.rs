//! Step layout of the registration wizard and the clamping rules that tie
//! navigation to the server-reported state.

use shared::models::{StoreState, StoreType};

/// What a wizard step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    CreateStore,
    ClubInfo,
    StoreDetails,
    Products,
}

/// One step of the wizard; ids are 1-based and contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: usize,
    pub label: &'static str,
    pub kind: StepKind,
}

const NISIT_STEPS: [StepDefinition; 3] = [
    StepDefinition {
        id: 1,
        label: "Create store",
        kind: StepKind::CreateStore,
    },
    StepDefinition {
        id: 2,
        label: "Store details",
        kind: StepKind::StoreDetails,
    },
    StepDefinition {
        id: 3,
        label: "Products",
        kind: StepKind::Products,
    },
];

const CLUB_STEPS: [StepDefinition; 4] = [
    StepDefinition {
        id: 1,
        label: "Create store",
        kind: StepKind::CreateStore,
    },
    StepDefinition {
        id: 2,
        label: "Club info",
        kind: StepKind::ClubInfo,
    },
    StepDefinition {
        id: 3,
        label: "Store details",
        kind: StepKind::StoreDetails,
    },
    StepDefinition {
        id: 4,
        label: "Products",
        kind: StepKind::Products,
    },
];

#[must_use]
pub const fn steps_for_type(store_type: StoreType) -> &'static [StepDefinition] {
    match store_type {
        StoreType::Nisit => &NISIT_STEPS,
        StoreType::Club => &CLUB_STEPS,
    }
}

#[must_use]
pub const fn layout_step_index(store_type: StoreType) -> usize {
    match store_type {
        StoreType::Nisit => 2,
        StoreType::Club => 3,
    }
}

#[must_use]
pub const fn product_step_index(store_type: StoreType) -> usize {
    match store_type {
        StoreType::Nisit => 3,
        StoreType::Club => 4,
    }
}

/// Step a user should land on when the server reports `state`.
#[must_use]
pub const fn preferred_step_for_state(store_type: StoreType, state: StoreState) -> usize {
    match state {
        StoreState::CreateStore => 1,
        StoreState::ClubInfo => match store_type {
            StoreType::Club => 2,
            // not a valid Nisit state; land on the next step Nisit stores have
            StoreType::Nisit => layout_step_index(store_type),
        },
        StoreState::StoreDetails => layout_step_index(store_type),
        StoreState::ProductDetails | StoreState::Submitted | StoreState::Pending => {
            product_step_index(store_type)
        }
    }
}

/// Highest step the last known server state lets a user reach.
#[must_use]
pub const fn max_step_for_state(store_type: StoreType, state: Option<StoreState>) -> usize {
    match state {
        Some(state) => preferred_step_for_state(store_type, state),
        None => 1,
    }
}

/// Clamps a requested step into `[1, ceiling]`. Without a store type only
/// step 1 exists.
#[must_use]
pub fn clamp_step_to_state(
    step: usize,
    store_type: Option<StoreType>,
    state: Option<StoreState>,
) -> usize {
    store_type.map_or(1, |store_type| {
        step.clamp(1, max_step_for_state(store_type, state))
    })
}

#[must_use]
pub fn step_kind_at(store_type: StoreType, step: usize) -> Option<StepKind> {
    steps_for_type(store_type)
        .iter()
        .find(|definition| definition.id == step)
        .map(|definition| definition.kind)
}

/// Position of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// Derived entry of the step indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepIndicator {
    pub id: usize,
    pub label: &'static str,
    pub status: StepStatus,
}

#[must_use]
pub fn step_indicator(store_type: StoreType, current_step: usize) -> Vec<StepIndicator> {
    steps_for_type(store_type)
        .iter()
        .map(|step| StepIndicator {
            id: step.id,
            label: step.label,
            status: match step.id.cmp(&current_step) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Current,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            },
        })
        .collect()
}
