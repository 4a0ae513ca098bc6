use std::collections::BTreeSet;

use crate::types::category::CategoryId;
use crate::types::question::{Question, QuestionId};

/// 질문 조회 조건. 목록으로 넘기면 모두 AND로 묶인다.
/// 저장소는 이 목록을 자기 쿼리 언어로 옮기거나 `matches_all`로 메모리에서 거른다.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionFilter {
    InCategory(CategoryId),
    Excluding(BTreeSet<QuestionId>),
    /// 대소문자를 무시하는 부분 문자열 검색
    TextContains(String),
}

impl QuestionFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            QuestionFilter::InCategory(category) => question.category == *category,
            QuestionFilter::Excluding(ids) => !ids.contains(&question.id),
            QuestionFilter::TextContains(term) => question
                .text
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

pub fn matches_all(filters: &[QuestionFilter], question: &Question) -> bool {
    filters.iter().all(|filter| filter.matches(question))
}
