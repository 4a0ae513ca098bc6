use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use tracing::{Level, event, instrument};

use handle_errors::Error;

use crate::store::QuestionStore;
use crate::types::{
    category::CategoryId,
    filter::QuestionFilter,
    question::{Question, QuestionId},
    quiz::QuizOrder,
};

/// 퀴즈 후보 조건. 카테고리 제한과 이미 본 질문 제외를 이 순서로 쌓는다.
pub fn quiz_filters(
    previous_ids: &BTreeSet<QuestionId>,
    category: Option<CategoryId>,
) -> Vec<QuestionFilter> {
    let mut filters = Vec::new();
    if let Some(category) = category {
        filters.push(QuestionFilter::InCategory(category));
    }
    if !previous_ids.is_empty() {
        filters.push(QuestionFilter::Excluding(previous_ids.clone()));
    }
    filters
}

fn pick_random(candidates: Vec<Question>) -> Option<Question> {
    candidates.choose(&mut rand::thread_rng()).cloned()
}

/// 다음 퀴즈 질문을 고른다. 남은 후보가 없으면 `Ok(None)`이고, 클라이언트는
/// 이를 퀴즈 종료로 본다. 저장소 실패는 `None`으로 바꾸지 않고 그대로 올린다.
#[instrument(skip(store))]
pub async fn next_question<S>(
    store: &S,
    previous_ids: &BTreeSet<QuestionId>,
    category: Option<CategoryId>,
    order: QuizOrder,
) -> Result<Option<Question>, Error>
where
    S: QuestionStore + ?Sized,
{
    let filters = quiz_filters(previous_ids, category);

    let question = match order {
        QuizOrder::LowestId => store.first_question(&filters).await?,
        QuizOrder::Random => pick_random(store.find_questions(&filters).await?),
    };

    match &question {
        Some(question) => event!(Level::INFO, id = question.id.0, "next quiz question"),
        None => event!(Level::INFO, seen = previous_ids.len(), "quiz exhausted"),
    }

    Ok(question)
}
