use serde::Deserialize;
use std::collections::BTreeSet;

use crate::types::category::CategoryId;
use crate::types::lenient;
use crate::types::question::QuestionId;

/// 0은 "모든 카테고리"를 뜻한다.
pub const ANY_CATEGORY: i32 = 0;

/// `POST /quizzes` 본문. 세션 상태는 서버에 없으므로 클라이언트가
/// 지금까지 본 질문 id를 매번 다시 보낸다.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuizRequest {
    /// 정수 목록이 아니면 본문 역직렬화 단계에서 거절된다.
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "lenient::option_int")]
    pub id: Option<i32>,
}

impl QuizRequest {
    pub fn previous_ids(&self) -> BTreeSet<QuestionId> {
        self.previous_questions
            .iter()
            .flatten()
            .map(|id| QuestionId(*id))
            .collect()
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.quiz_category
            .as_ref()
            .and_then(|category| category.id)
            .filter(|id| *id != ANY_CATEGORY)
            .map(CategoryId)
    }
}

/// 다음 퀴즈 질문을 고르는 방식
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuizOrder {
    /// 남은 후보 중 id가 가장 작은 질문
    #[default]
    LowestId,
    /// 남은 후보 전체에서 균등하게 하나
    Random,
}
