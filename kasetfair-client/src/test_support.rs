//! Scripted [`StoreApi`] and fixtures for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use shared::models::{
    CreateGoodRequest, CreateStoreRequest, ErrorBody, Good, Invitation, MediaLink, MediaPurpose,
    MediaResponse, NisitInfo, StoreProgress, StoreQuestionAnswer, StoreSnapshotDto, StoreState,
    StoreType, StoreValidateResponse, UpdateClubInfoRequest, UpdateGoodRequest,
    UpdateNisitInfoRequest, UpsertAnswersRequest,
};

use crate::api::{Attachment, StoreApi};
use crate::errors::{ApiError, ApiResult};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    StoreStatus,
    CreateStore(CreateStoreRequest),
    UpdateClubInfo(UpdateClubInfoRequest),
    LeaveStore,
    ValidateStore,
    ListGoods,
    CreateGood(CreateGoodRequest),
    UpdateGood(String, UpdateGoodRequest),
    DeleteGood(String),
    UploadMedia(MediaPurpose, String),
    MediaLink(String),
    StoreQuestions,
    UpsertStoreAnswers(i64, UpsertAnswersRequest),
    ListInvitations,
    NisitInfo,
    RegisterNisit(NisitInfo),
    UpdateNisitInfo(UpdateNisitInfoRequest),
}

type Queue<T> = RefCell<VecDeque<ApiResult<T>>>;

/// Answers each endpoint from its own queue and records every call.
/// An unscripted call panics.
#[derive(Default)]
pub struct FakeStoreApi {
    calls: RefCell<Vec<Call>>,
    status: Queue<StoreProgress>,
    create: Queue<StoreProgress>,
    club_info: Queue<StoreProgress>,
    leave: Queue<()>,
    validate: Queue<StoreValidateResponse>,
    list_goods: Queue<Vec<Good>>,
    create_good: Queue<Good>,
    update_good: Queue<Good>,
    delete_good: Queue<()>,
    upload: Queue<MediaResponse>,
    media_link: Queue<MediaLink>,
    questions: Queue<Vec<StoreQuestionAnswer>>,
    answers: Queue<Vec<StoreQuestionAnswer>>,
    invitations: Queue<Vec<Invitation>>,
    nisit_info: Queue<NisitInfo>,
    register_nisit: Queue<NisitInfo>,
    update_nisit: Queue<NisitInfo>,
}

fn next<T>(queue: &Queue<T>, endpoint: &str) -> ApiResult<T> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| panic!("unscripted call to {endpoint}"))
}

impl FakeStoreApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn push_status(&self, result: ApiResult<StoreProgress>) {
        self.status.borrow_mut().push_back(result);
    }

    pub fn push_create(&self, result: ApiResult<StoreProgress>) {
        self.create.borrow_mut().push_back(result);
    }

    pub fn push_club_info(&self, result: ApiResult<StoreProgress>) {
        self.club_info.borrow_mut().push_back(result);
    }

    pub fn push_leave(&self, result: ApiResult<()>) {
        self.leave.borrow_mut().push_back(result);
    }

    pub fn push_validate(&self, result: ApiResult<StoreValidateResponse>) {
        self.validate.borrow_mut().push_back(result);
    }

    pub fn push_list_goods(&self, result: ApiResult<Vec<Good>>) {
        self.list_goods.borrow_mut().push_back(result);
    }

    pub fn push_create_good(&self, result: ApiResult<Good>) {
        self.create_good.borrow_mut().push_back(result);
    }

    pub fn push_update_good(&self, result: ApiResult<Good>) {
        self.update_good.borrow_mut().push_back(result);
    }

    pub fn push_delete_good(&self, result: ApiResult<()>) {
        self.delete_good.borrow_mut().push_back(result);
    }

    pub fn push_upload(&self, result: ApiResult<MediaResponse>) {
        self.upload.borrow_mut().push_back(result);
    }

    pub fn push_media_link(&self, result: ApiResult<MediaLink>) {
        self.media_link.borrow_mut().push_back(result);
    }

    pub fn push_questions(&self, result: ApiResult<Vec<StoreQuestionAnswer>>) {
        self.questions.borrow_mut().push_back(result);
    }

    pub fn push_answers(&self, result: ApiResult<Vec<StoreQuestionAnswer>>) {
        self.answers.borrow_mut().push_back(result);
    }

    pub fn push_invitations(&self, result: ApiResult<Vec<Invitation>>) {
        self.invitations.borrow_mut().push_back(result);
    }

    pub fn push_nisit_info(&self, result: ApiResult<NisitInfo>) {
        self.nisit_info.borrow_mut().push_back(result);
    }

    pub fn push_register_nisit(&self, result: ApiResult<NisitInfo>) {
        self.register_nisit.borrow_mut().push_back(result);
    }

    pub fn push_update_nisit(&self, result: ApiResult<NisitInfo>) {
        self.update_nisit.borrow_mut().push_back(result);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl StoreApi for FakeStoreApi {
    async fn store_status(&self) -> ApiResult<StoreProgress> {
        self.record(Call::StoreStatus);
        next(&self.status, "store_status")
    }

    async fn create_store(&self, request: &CreateStoreRequest) -> ApiResult<StoreProgress> {
        self.record(Call::CreateStore(request.clone()));
        next(&self.create, "create_store")
    }

    async fn update_club_info(
        &self,
        request: &UpdateClubInfoRequest,
    ) -> ApiResult<StoreProgress> {
        self.record(Call::UpdateClubInfo(request.clone()));
        next(&self.club_info, "update_club_info")
    }

    async fn leave_store(&self) -> ApiResult<()> {
        self.record(Call::LeaveStore);
        next(&self.leave, "leave_store")
    }

    async fn validate_store(&self) -> ApiResult<StoreValidateResponse> {
        self.record(Call::ValidateStore);
        next(&self.validate, "validate_store")
    }

    async fn list_goods(&self) -> ApiResult<Vec<Good>> {
        self.record(Call::ListGoods);
        next(&self.list_goods, "list_goods")
    }

    async fn create_good(&self, request: &CreateGoodRequest) -> ApiResult<Good> {
        self.record(Call::CreateGood(request.clone()));
        next(&self.create_good, "create_good")
    }

    async fn update_good(&self, good_id: &str, request: &UpdateGoodRequest) -> ApiResult<Good> {
        self.record(Call::UpdateGood(good_id.to_string(), request.clone()));
        next(&self.update_good, "update_good")
    }

    async fn delete_good(&self, good_id: &str) -> ApiResult<()> {
        self.record(Call::DeleteGood(good_id.to_string()));
        next(&self.delete_good, "delete_good")
    }

    async fn upload_media(
        &self,
        purpose: MediaPurpose,
        file: &Attachment,
    ) -> ApiResult<MediaResponse> {
        self.record(Call::UploadMedia(purpose, file.file_name.clone()));
        next(&self.upload, "upload_media")
    }

    async fn media_link(&self, media_id: &str) -> ApiResult<MediaLink> {
        self.record(Call::MediaLink(media_id.to_string()));
        next(&self.media_link, "media_link")
    }

    async fn store_questions(&self) -> ApiResult<Vec<StoreQuestionAnswer>> {
        self.record(Call::StoreQuestions);
        next(&self.questions, "store_questions")
    }

    async fn upsert_store_answers(
        &self,
        store_id: i64,
        request: &UpsertAnswersRequest,
    ) -> ApiResult<Vec<StoreQuestionAnswer>> {
        self.record(Call::UpsertStoreAnswers(store_id, request.clone()));
        next(&self.answers, "upsert_store_answers")
    }

    async fn list_invitations(&self) -> ApiResult<Vec<Invitation>> {
        self.record(Call::ListInvitations);
        next(&self.invitations, "list_invitations")
    }

    async fn nisit_info(&self) -> ApiResult<NisitInfo> {
        self.record(Call::NisitInfo);
        next(&self.nisit_info, "nisit_info")
    }

    async fn register_nisit(&self, info: &NisitInfo) -> ApiResult<NisitInfo> {
        self.record(Call::RegisterNisit(info.clone()));
        next(&self.register_nisit, "register_nisit")
    }

    async fn update_nisit_info(&self, request: &UpdateNisitInfoRequest) -> ApiResult<NisitInfo> {
        self.record(Call::UpdateNisitInfo(request.clone()));
        next(&self.update_nisit, "update_nisit_info")
    }
}

/// Question list with one question of each kind and no answers.
pub fn questions() -> Vec<StoreQuestionAnswer> {
    serde_json::from_value(json!([
        {"template": {"id": 1, "label": "Tables needed", "type": "TEXT"}},
        {"template": {
            "id": 2,
            "label": "Power",
            "type": "SINGLE_SELECT",
            "options": [{"value": "none", "label": "None"}, {"value": "one", "label": "One outlet"}]
        }},
        {"template": {
            "id": 3,
            "label": "Equipment",
            "type": "MULTI_SELECT",
            "options": [
                {"value": "gas", "label": "Gas stove"},
                {"value": "ice", "label": "Ice box"},
                {"value": "fan", "label": "Fan"}
            ]
        }}
    ]))
    .unwrap()
}

pub fn nisit_info() -> NisitInfo {
    NisitInfo {
        first_name: "Somchai".to_string(),
        last_name: "Jaidee".to_string(),
        nisit_id: "6510500000".to_string(),
        email: "somchai.j@ku.th".to_string(),
        phone: "0812345678".to_string(),
        nisit_card_media_id: None,
    }
}

/// Non-success response, with an `error` body when `message` is given.
pub fn status_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status {
        status: StatusCode::from_u16(status).unwrap(),
        body: message.map(ErrorBody::new),
    }
}

/// Snapshot with three joined members and nothing else.
pub fn progress(id: i64, store_type: StoreType, state: StoreState) -> StoreProgress {
    progress_from(json!({
        "id": id,
        "storeName": "Drinks",
        "type": store_type,
        "state": state,
        "memberEmails": [
            {"email": "a@ku.th", "status": "Joined"},
            {"email": "b@ku.th", "status": "Joined"},
            {"email": "c@ku.th", "status": "Invited"}
        ]
    }))
}

/// Snapshot from a raw wire value, converted the way the client does.
pub fn progress_from(value: serde_json::Value) -> StoreProgress {
    let dto: StoreSnapshotDto = serde_json::from_value(value).unwrap();
    StoreProgress::try_from(dto).unwrap()
}

pub fn good(id: &str, name: &str, price: &str) -> Good {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "type": "Food",
        "price": price,
        "storeId": 1,
        "createdAt": "2025-01-05T10:00:00Z",
        "updatedAt": "2025-01-05T10:00:00Z"
    }))
    .unwrap()
}
