//! Store environment questionnaire.
//!
//! Answers are edited locally per question and sent together; the saved
//! list returned by the API replaces both the questions and the drafts.

use std::collections::HashMap;

use shared::models::{
    AnswerInput, AnswerValue, QuestionType, StoreQuestionAnswer, UpsertAnswersRequest,
};
use tracing::{debug, info, warn};

use crate::api::StoreApi;
use crate::errors::{ApiError, WizardError};

const LOAD_FALLBACK: &str = "Failed to load store questions";
const SAVE_FALLBACK: &str = "Failed to save answers";
const SAVED: &str = "Answers saved successfully.";
const UNKNOWN_QUESTION: &str = "This question is no longer in the form.";
const UNKNOWN_OPTION: &str = "Please choose one of the listed options.";

/// Local answer for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerDraft {
    pub text: String,
    pub value: String,
    pub values: Vec<String>,
}

impl From<Option<&AnswerValue>> for AnswerDraft {
    fn from(answer: Option<&AnswerValue>) -> Self {
        let Some(answer) = answer else {
            return Self::default();
        };
        Self {
            text: answer.text.clone().unwrap_or_default(),
            value: answer.value.clone().unwrap_or_default(),
            values: answer.values.clone().unwrap_or_default(),
        }
    }
}

impl AnswerDraft {
    /// Wire answer carrying only the field the question type reads.
    #[must_use]
    pub fn to_input(&self, id: i64, question_type: QuestionType) -> AnswerInput {
        let value = match question_type {
            QuestionType::Text => AnswerValue {
                text: Some(self.text.clone()),
                ..AnswerValue::default()
            },
            QuestionType::SingleSelect => AnswerValue {
                value: Some(self.value.clone()),
                ..AnswerValue::default()
            },
            QuestionType::MultiSelect | QuestionType::Other => AnswerValue {
                values: Some(self.values.clone()),
                ..AnswerValue::default()
            },
        };
        AnswerInput { id, value }
    }
}

pub struct QuestionnaireForm<A> {
    api: A,
    questions: Vec<StoreQuestionAnswer>,
    drafts: HashMap<i64, AnswerDraft>,
    error: Option<String>,
    success: Option<String>,
    saving: bool,
}

impl<A: StoreApi> QuestionnaireForm<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            questions: Vec::new(),
            drafts: HashMap::new(),
            error: None,
            success: None,
            saving: false,
        }
    }

    /// Loads the questions and resets every draft to the stored answer.
    ///
    /// # Errors
    /// [`WizardError::Api`]; the form keeps what it had.
    pub async fn load(&mut self) -> Result<(), WizardError> {
        self.error = None;
        self.success = None;
        match self.api.store_questions().await {
            Ok(questions) => {
                debug!(count = questions.len(), "store questions loaded");
                self.replace(questions);
                Ok(())
            }
            Err(err) => Err(self.fail(err, LOAD_FALLBACK)),
        }
    }

    pub fn set_text(&mut self, question_id: i64, text: impl Into<String>) -> bool {
        let Some(draft) = self.draft_mut(question_id) else {
            return false;
        };
        draft.text = text.into();
        true
    }

    /// Picks the single option of a select question.
    ///
    /// # Errors
    /// [`WizardError::Validation`] for an unknown question or option.
    pub fn select(&mut self, question_id: i64, value: &str) -> Result<(), WizardError> {
        self.check_option(question_id, value)?;
        if let Some(draft) = self.draft_mut(question_id) {
            draft.value = value.to_string();
        }
        Ok(())
    }

    /// Adds the option when absent, removes it when present.
    ///
    /// # Errors
    /// [`WizardError::Validation`] for an unknown question or option.
    pub fn toggle(&mut self, question_id: i64, value: &str) -> Result<(), WizardError> {
        self.check_option(question_id, value)?;
        if let Some(draft) = self.draft_mut(question_id) {
            if let Some(index) = draft.values.iter().position(|chosen| chosen == value) {
                draft.values.remove(index);
            } else {
                draft.values.push(value.to_string());
            }
        }
        Ok(())
    }

    /// Upsert body covering every question in display order.
    #[must_use]
    pub fn request(&self) -> UpsertAnswersRequest {
        let answers = self
            .questions
            .iter()
            .map(|question| {
                let id = question.template.id;
                self.drafts
                    .get(&id)
                    .cloned()
                    .unwrap_or_default()
                    .to_input(id, question.template.question_type)
            })
            .collect();
        UpsertAnswersRequest { answers }
    }

    /// Sends all answers for the store.
    ///
    /// # Errors
    /// [`WizardError::InvalidTransition`] while a save is running, otherwise
    /// [`WizardError::Api`]; drafts are kept for a retry.
    pub async fn save(&mut self, store_id: i64) -> Result<(), WizardError> {
        if self.saving {
            return Err(WizardError::InvalidTransition(
                "Answers are already being saved.".to_string(),
            ));
        }
        self.error = None;
        self.success = None;
        let request = self.request();

        self.saving = true;
        let result = self.api.upsert_store_answers(store_id, &request).await;
        self.saving = false;

        match result {
            Ok(questions) => {
                info!(store_id, answers = request.answers.len(), "store answers saved");
                self.replace(questions);
                self.success = Some(SAVED.to_string());
                Ok(())
            }
            Err(err) => Err(self.fail(err, SAVE_FALLBACK)),
        }
    }

    pub fn questions(&self) -> &[StoreQuestionAnswer] {
        &self.questions
    }

    pub fn draft(&self, question_id: i64) -> Option<&AnswerDraft> {
        self.drafts.get(&question_id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    fn replace(&mut self, questions: Vec<StoreQuestionAnswer>) {
        self.drafts = questions
            .iter()
            .map(|question| {
                let stored = question.answer.as_ref().map(|answer| &answer.value);
                (question.template.id, AnswerDraft::from(stored))
            })
            .collect();
        self.questions = questions;
    }

    fn draft_mut(&mut self, question_id: i64) -> Option<&mut AnswerDraft> {
        self.drafts.get_mut(&question_id)
    }

    fn check_option(&self, question_id: i64, value: &str) -> Result<(), WizardError> {
        let question = self
            .questions
            .iter()
            .find(|question| question.template.id == question_id)
            .ok_or_else(|| WizardError::Validation(UNKNOWN_QUESTION.to_string()))?;
        if question.template.has_option(value) {
            Ok(())
        } else {
            Err(WizardError::Validation(UNKNOWN_OPTION.to_string()))
        }
    }

    fn fail(&mut self, err: ApiError, fallback: &str) -> WizardError {
        warn!(error = %err, "store questions request failed");
        let err = WizardError::api(err, fallback);
        self.error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeStoreApi, questions, status_error};
    use serde_json::json;

    async fn loaded(items: Vec<StoreQuestionAnswer>) -> QuestionnaireForm<FakeStoreApi> {
        let api = FakeStoreApi::default();
        api.push_questions(Ok(items));
        let mut form = QuestionnaireForm::new(api);
        form.load().await.unwrap();
        form
    }

    #[tokio::test]
    async fn test_load_seeds_drafts_from_stored_answers() {
        let mut items = questions();
        items[0].answer = serde_json::from_value(json!({"value": {"text": "Two"}})).unwrap();
        let form = loaded(items).await;

        assert_eq!(form.questions().len(), 3);
        assert_eq!(form.draft(1).unwrap().text, "Two");
        assert_eq!(form.draft(3), Some(&AnswerDraft::default()));
    }

    #[tokio::test]
    async fn test_load_failure_uses_fallback() {
        let api = FakeStoreApi::default();
        api.push_questions(Err(status_error(500, None)));
        let mut form = QuestionnaireForm::new(api);

        let err = form.load().await.unwrap_err();
        assert_eq!(err.to_string(), LOAD_FALLBACK);
        assert_eq!(form.error(), Some(LOAD_FALLBACK));
        assert!(form.questions().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let mut form = loaded(questions()).await;

        form.toggle(3, "gas").unwrap();
        form.toggle(3, "fan").unwrap();
        form.toggle(3, "gas").unwrap();
        assert_eq!(form.draft(3).unwrap().values, vec!["fan".to_string()]);

        let err = form.toggle(3, "oven").unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_OPTION);
        assert!(form.select(42, "one").is_err());
    }

    #[tokio::test]
    async fn test_request_sends_one_shape_per_type() {
        let mut form = loaded(questions()).await;
        assert!(form.set_text(1, "Two tables"));
        form.select(2, "one").unwrap();
        form.toggle(3, "ice").unwrap();

        assert_eq!(
            serde_json::to_value(form.request()).unwrap(),
            json!({"answers": [
                {"id": 1, "text": "Two tables"},
                {"id": 2, "value": "one"},
                {"id": 3, "values": ["ice"]}
            ]})
        );
    }

    #[tokio::test]
    async fn test_save_replaces_answers_and_reports_success() {
        let mut form = loaded(questions()).await;
        form.set_text(1, "Two tables");
        let mut saved = questions();
        saved[0].answer = serde_json::from_value(json!({"value": {"text": "2 tables"}})).unwrap();
        form.api().push_answers(Ok(saved));

        form.save(9).await.unwrap();

        assert_eq!(form.success(), Some(SAVED));
        assert_eq!(form.draft(1).unwrap().text, "2 tables");
        assert!(matches!(
            form.api().calls().last(),
            Some(Call::UpsertStoreAnswers(9, _))
        ));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_drafts() {
        let mut form = loaded(questions()).await;
        form.set_text(1, "Two tables");
        form.api()
            .push_answers(Err(status_error(400, Some("Store is locked"))));

        let err = form.save(9).await.unwrap_err();
        assert_eq!(err.to_string(), "Store is locked");
        assert_eq!(form.error(), Some("Store is locked"));
        assert_eq!(form.success(), None);
        assert_eq!(form.draft(1).unwrap().text, "Two tables");
        assert!(!form.is_saving());
    }
}
