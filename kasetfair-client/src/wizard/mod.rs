pub mod club_info;
pub mod controller;
pub mod products;
pub mod steps;
pub mod store_details;
pub mod validation;


pub use club_info::{ClubInfoDraft, ClubInfoField};
pub use controller::{WizardController, WizardOptions};
pub use products::{ProductDraft, ProductField, ProductsDraft};
pub use steps::{StepDefinition, StepIndicator, StepKind, StepStatus};
pub use store_details::LayoutDraft;
pub use validation::{MIN_MEMBERS, ValidationError};
