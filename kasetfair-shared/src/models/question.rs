//! Store environment questionnaire.
//!
//! Each question comes with its template and the store's current answer.
//! The answer shape depends on the template type: free text, one chosen
//! option, or a set of chosen options.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Text,
    SingleSelect,
    MultiSelect,
    /// Any type this client does not know; answered like a multi-select.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    pub id: i64,
    #[serde(default)]
    pub key: Option<String>,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl QuestionTemplate {
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// Stored answer content; only the field matching the question type is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAnswer {
    #[serde(default)]
    pub value: AnswerValue,
}

/// Response item of the questions endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreQuestionAnswer {
    pub template: QuestionTemplate,
    #[serde(default)]
    pub answer: Option<StoreAnswer>,
}

/// One answer in an upsert; `id` is the template id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerInput {
    pub id: i64,
    #[serde(flatten)]
    pub value: AnswerValue,
}

/// Body of the answers upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertAnswersRequest {
    pub answers: Vec<AnswerInput>,
}
