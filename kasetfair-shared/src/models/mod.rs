pub mod errors;
pub mod goods;
pub mod invitation;
pub mod media;
pub mod nisit;
pub mod question;
pub mod store;
pub mod validation;

pub use errors::ErrorBody;
pub use goods::{CreateGoodRequest, Good, GoodsType, UpdateGoodRequest};
pub use invitation::Invitation;
pub use media::{MediaLink, MediaPurpose, MediaResponse};
pub use nisit::{NisitInfo, UpdateNisitInfoRequest};
pub use question::{
    AnswerInput, AnswerValue, QuestionOption, QuestionTemplate, QuestionType, StoreAnswer,
    StoreQuestionAnswer, UpsertAnswersRequest,
};
pub use store::{
    Catalogue, ClubInfo, CreateStoreRequest, LayoutInfo, MemberEmailStatus, ProductSummary,
    Scalar, SnapshotError, StoreProgress, StoreSnapshotDto, StoreStage, StoreState, StoreType,
    UpdateClubInfoRequest,
};
pub use validation::{StoreValidateResponse, ValidatedStore, ValidationItem, ValidationSection};
