use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
use shared::config::client::ClientConfig;
use serde_json::Value;
use shared::models::{
    CreateGoodRequest, CreateStoreRequest, ErrorBody, Good, Invitation, MediaLink, MediaPurpose,
    MediaResponse, NisitInfo, StoreProgress, StoreQuestionAnswer, StoreSnapshotDto,
    StoreValidateResponse, UpdateClubInfoRequest, UpdateGoodRequest, UpdateNisitInfoRequest,
    UpsertAnswersRequest,
};
use tracing::{debug, instrument, warn};

use crate::errors::{ApiError, ApiResult};

const STORE_STATUS_PATH: &str = "store/status";
const STORE_CREATE_PATH: &str = "store/create";
const STORE_CLUB_INFO_PATH: &str = "store/club-info";
const STORE_LEAVE_PATH: &str = "store/leave";
const STORE_VALIDATE_PATH: &str = "store/validate";
const STORE_GOODS_PATH: &str = "store/goods";
const STORE_QUESTIONS_PATH: &str = "store/questions";
const INVITATIONS_PATH: &str = "shops/invitations";
const NISIT_REGISTER_PATH: &str = "nisit/register";
const NISIT_INFO_PATH: &str = "nisit/info";
const MEDIA_PATH: &str = "media";

/// A file picked by the user, held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Remote store API as the wizard sees it.
///
/// Every snapshot-returning call yields a fully validated [`StoreProgress`].
#[async_trait(?Send)]
pub trait StoreApi {
    /// `GET /store/status`; [`ApiError::NotFound`] when the user has no store.
    async fn store_status(&self) -> ApiResult<StoreProgress>;

    /// `POST /store/create`
    async fn create_store(&self, request: &CreateStoreRequest) -> ApiResult<StoreProgress>;

    /// `PATCH /store/club-info`
    async fn update_club_info(&self, request: &UpdateClubInfoRequest)
    -> ApiResult<StoreProgress>;

    /// `POST /store/leave`
    async fn leave_store(&self) -> ApiResult<()>;

    /// `GET /store/validate`
    async fn validate_store(&self) -> ApiResult<StoreValidateResponse>;

    async fn list_goods(&self) -> ApiResult<Vec<Good>>;

    async fn create_good(&self, request: &CreateGoodRequest) -> ApiResult<Good>;

    async fn update_good(&self, good_id: &str, request: &UpdateGoodRequest) -> ApiResult<Good>;

    async fn delete_good(&self, good_id: &str) -> ApiResult<()>;

    /// Uploads a file and returns its opaque media id.
    async fn upload_media(
        &self,
        purpose: MediaPurpose,
        file: &Attachment,
    ) -> ApiResult<MediaResponse>;

    async fn media_link(&self, media_id: &str) -> ApiResult<MediaLink>;

    /// `GET /store/questions`: every question template with the current answer.
    async fn store_questions(&self) -> ApiResult<Vec<StoreQuestionAnswer>>;

    /// `PUT /store/{store_id}/questions/answers`; returns the refreshed list.
    async fn upsert_store_answers(
        &self,
        store_id: i64,
        request: &UpsertAnswersRequest,
    ) -> ApiResult<Vec<StoreQuestionAnswer>>;

    /// `GET /shops/invitations`; a body that is not a list counts as empty.
    async fn list_invitations(&self) -> ApiResult<Vec<Invitation>>;

    /// `GET /nisit/info`; [`ApiError::NotFound`] before registration.
    async fn nisit_info(&self) -> ApiResult<NisitInfo>;

    /// `POST /nisit/register`
    async fn register_nisit(&self, info: &NisitInfo) -> ApiResult<NisitInfo>;

    /// `PATCH /nisit/info`
    async fn update_nisit_info(&self, request: &UpdateNisitInfoRequest) -> ApiResult<NisitInfo>;
}

/// HTTP implementation of [`StoreApi`].
#[derive(Clone, Debug)]
pub struct KasetFairClient {
    base_url: String,
    client: Client,
}

impl KasetFairClient {
    /// Create a new API client with the provided base URL.
    ///
    /// # Panics
    /// Panics if the TLS backend cannot be initialized, like [`Client::new`].
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client around a preconfigured `reqwest` client, e.g. one
    /// carrying the session cookie jar.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &ClientConfig, client: Client) -> Self {
        Self::with_client(config.api_base_url.as_str(), client)
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "store API rejected the session; sign in again");
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorBody>(&text).ok();
        Err(ApiError::Status { status, body })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_snapshot(&self, request: RequestBuilder) -> ApiResult<StoreProgress> {
        let dto: StoreSnapshotDto = self.send_json(request).await?;
        Ok(StoreProgress::try_from(dto)?)
    }
}

#[async_trait(?Send)]
impl StoreApi for KasetFairClient {
    #[instrument(skip(self))]
    async fn store_status(&self) -> ApiResult<StoreProgress> {
        let request = self.client.get(self.api_url(STORE_STATUS_PATH));
        match self.send_snapshot(request).await {
            Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Err(ApiError::NotFound),
            other => other,
        }
    }

    #[instrument(skip(self, request), fields(store_name = %request.store_name))]
    async fn create_store(&self, request: &CreateStoreRequest) -> ApiResult<StoreProgress> {
        let builder = self.client.post(self.api_url(STORE_CREATE_PATH)).json(request);
        self.send_snapshot(builder).await
    }

    #[instrument(skip(self, request))]
    async fn update_club_info(
        &self,
        request: &UpdateClubInfoRequest,
    ) -> ApiResult<StoreProgress> {
        let builder = self
            .client
            .patch(self.api_url(STORE_CLUB_INFO_PATH))
            .json(request);
        self.send_snapshot(builder).await
    }

    #[instrument(skip(self))]
    async fn leave_store(&self) -> ApiResult<()> {
        self.send(self.client.post(self.api_url(STORE_LEAVE_PATH)))
            .await
            .map(drop)
    }

    #[instrument(skip(self))]
    async fn validate_store(&self) -> ApiResult<StoreValidateResponse> {
        self.send_json(self.client.get(self.api_url(STORE_VALIDATE_PATH)))
            .await
    }

    #[instrument(skip(self))]
    async fn list_goods(&self) -> ApiResult<Vec<Good>> {
        self.send_json(self.client.get(self.api_url(STORE_GOODS_PATH)))
            .await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_good(&self, request: &CreateGoodRequest) -> ApiResult<Good> {
        let builder = self.client.post(self.api_url(STORE_GOODS_PATH)).json(request);
        self.send_json(builder).await
    }

    #[instrument(skip(self, request))]
    async fn update_good(&self, good_id: &str, request: &UpdateGoodRequest) -> ApiResult<Good> {
        let url = self.api_url(&format!("{STORE_GOODS_PATH}/{good_id}"));
        self.send_json(self.client.patch(url).json(request)).await
    }

    #[instrument(skip(self))]
    async fn delete_good(&self, good_id: &str) -> ApiResult<()> {
        let url = self.api_url(&format!("{STORE_GOODS_PATH}/{good_id}"));
        self.send(self.client.delete(url)).await.map(drop)
    }

    #[instrument(skip(self, file), fields(file_name = %file.file_name, len = file.bytes.len()))]
    async fn upload_media(
        &self,
        purpose: MediaPurpose,
        file: &Attachment,
    ) -> ApiResult<MediaResponse> {
        let mut part = multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type)?;
        }
        let form = multipart::Form::new()
            .text("purpose", purpose.as_ref().to_string())
            .part("file", part);
        let builder = self.client.post(self.api_url(MEDIA_PATH)).multipart(form);
        self.send_json(builder).await
    }

    #[instrument(skip(self))]
    async fn media_link(&self, media_id: &str) -> ApiResult<MediaLink> {
        let url = self.api_url(&format!("{MEDIA_PATH}/{media_id}"));
        self.send_json(self.client.get(url)).await
    }

    #[instrument(skip(self))]
    async fn store_questions(&self) -> ApiResult<Vec<StoreQuestionAnswer>> {
        self.send_json(self.client.get(self.api_url(STORE_QUESTIONS_PATH)))
            .await
    }

    #[instrument(skip(self, request), fields(answers = request.answers.len()))]
    async fn upsert_store_answers(
        &self,
        store_id: i64,
        request: &UpsertAnswersRequest,
    ) -> ApiResult<Vec<StoreQuestionAnswer>> {
        let url = self.api_url(&format!("store/{store_id}/questions/answers"));
        self.send_json(self.client.put(url).json(request)).await
    }

    #[instrument(skip(self))]
    async fn list_invitations(&self) -> ApiResult<Vec<Invitation>> {
        let body: Value = self
            .send_json(self.client.get(self.api_url(INVITATIONS_PATH)))
            .await?;
        if !body.is_array() {
            debug!("invitations response is not a list; treating it as empty");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    async fn nisit_info(&self) -> ApiResult<NisitInfo> {
        let request = self.client.get(self.api_url(NISIT_INFO_PATH));
        match self.send_json(request).await {
            Err(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Err(ApiError::NotFound),
            other => other,
        }
    }

    #[instrument(skip(self, info), fields(nisit_id = %info.nisit_id))]
    async fn register_nisit(&self, info: &NisitInfo) -> ApiResult<NisitInfo> {
        let builder = self.client.post(self.api_url(NISIT_REGISTER_PATH)).json(info);
        self.send_json(builder).await
    }

    #[instrument(skip(self, request))]
    async fn update_nisit_info(&self, request: &UpdateNisitInfoRequest) -> ApiResult<NisitInfo> {
        let builder = self.client.patch(self.api_url(NISIT_INFO_PATH)).json(request);
        self.send_json(builder).await
    }
}
