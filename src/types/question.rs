use serde::{Deserialize, Serialize};

use handle_errors::Error;

use crate::types::category::CategoryId;
use crate::types::lenient;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub text: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct QuestionId(pub i32);

/// 검증을 통과한 새 질문. id는 저장소가 붙인다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// `POST /questions` 본문 그대로. 어떤 필드든 빠져 있을 수 있다.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuestionPayload {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_int")]
    pub difficulty: Option<i32>,
    #[serde(default, deserialize_with = "lenient::option_int")]
    pub category: Option<i32>,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::MissingField(field)),
    }
}

impl TryFrom<QuestionPayload> for NewQuestion {
    type Error = Error;

    fn try_from(payload: QuestionPayload) -> Result<Self, Self::Error> {
        Ok(NewQuestion {
            text: required_text(payload.question, "question")?,
            answer: required_text(payload.answer, "answer")?,
            difficulty: payload.difficulty.ok_or(Error::MissingField("difficulty"))?,
            category: payload
                .category
                .map(CategoryId)
                .ok_or(Error::MissingField("category"))?,
        })
    }
}
