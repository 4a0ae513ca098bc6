//! 질문 목록, 검색, 생성, 삭제.
//!
//! 여기 있는 함수는 HTTP를 모른다. 저장소에서 읽은 결과를 페이지로 자르고
//! 카테고리 이름을 붙여서 평범한 구조체로 돌려준다. 실패는 모두
//! `handle_errors::Error`로 올라가고, 비어 있는 것이 정상인 결과(검색 결과 없음,
//! 빈 카테고리)는 에러가 아니다.
use tracing::{Level, event, instrument};

use handle_errors::Error;

use crate::store::{CategoryStore, QuestionStore};
use crate::types::{
    category::{CategoryId, CategoryIndex, build_index},
    pagination::{Page, paginate},
    question::{NewQuestion, Question, QuestionId, QuestionPayload},
};

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryIndex,
    pub current_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    /// 필터링하지 않은 전체 질문 수
    pub total_questions: usize,
    pub current_category: Option<String>,
}

fn label_of(index: &CategoryIndex, category: Option<CategoryId>) -> Option<String> {
    category
        .and_then(|id| index.label(id))
        .map(str::to_owned)
}

#[instrument(skip(store))]
pub async fn list_categories<S>(store: &S) -> Result<CategoryIndex, Error>
where
    S: CategoryStore + ?Sized,
{
    let categories = store.get_categories().await?;
    Ok(build_index(&categories))
}

/// 전체 목록. 범위를 벗어난 빈 페이지는 `PageNotFound`이다.
#[instrument(skip(store))]
pub async fn list_questions<S>(
    store: &S,
    page: Page,
    default_category: Option<CategoryId>,
) -> Result<QuestionListing, Error>
where
    S: QuestionStore + CategoryStore + ?Sized,
{
    let categories = list_categories(store).await?;
    let questions = store.get_questions().await?;
    let total_questions = questions.len();
    let questions = paginate(page, questions);

    if questions.is_empty() {
        event!(Level::INFO, page = page.0, total_questions, "page past the end");
        return Err(Error::PageNotFound(page.0));
    }

    let current_category = label_of(
        &categories,
        default_category.or_else(|| questions.first().map(|q| q.category)),
    );

    Ok(QuestionListing {
        questions,
        total_questions,
        categories,
        current_category,
    })
}

/// 질문 본문에서 대소문자를 무시하고 검색한다. 검색어가 비었으면 저장소에 가지 않는다.
#[instrument(skip(store))]
pub async fn search_questions<S>(
    store: &S,
    search_term: Option<&str>,
    page: Page,
) -> Result<SearchResult, Error>
where
    S: QuestionStore + CategoryStore + ?Sized,
{
    let term = match search_term {
        Some(term) if !term.is_empty() => term,
        _ => return Err(Error::MissingParameters),
    };

    let matches = store.search_questions(term).await?;
    let total_questions = matches.len();
    let questions = paginate(page, matches);

    let current_category = match questions.first() {
        Some(first) => {
            let categories = list_categories(store).await?;
            label_of(&categories, Some(first.category))
        }
        None => None,
    };

    Ok(SearchResult {
        questions,
        total_questions,
        current_category,
    })
}

/// 한 카테고리의 질문. 비어 있어도 성공이고, 총 개수는 저장소 전체 기준이다.
#[instrument(skip(store))]
pub async fn questions_in_category<S>(
    store: &S,
    category_id: CategoryId,
    page: Page,
) -> Result<CategoryQuestions, Error>
where
    S: QuestionStore + CategoryStore + ?Sized,
{
    let questions = paginate(page, store.get_questions_by_category(category_id).await?);
    let total_questions = store.count_questions().await?;
    let categories = list_categories(store).await?;

    Ok(CategoryQuestions {
        questions,
        total_questions,
        current_category: label_of(&categories, Some(category_id)),
    })
}

#[instrument(skip(store))]
pub async fn create_question<S>(store: &S, payload: QuestionPayload) -> Result<Question, Error>
where
    S: QuestionStore + ?Sized,
{
    let new_question = NewQuestion::try_from(payload)?;
    let question = store.add_question(new_question).await?;
    event!(Level::INFO, id = question.id.0, "question created");
    Ok(question)
}

#[instrument(skip(store))]
pub async fn delete_question<S>(store: &S, question_id: QuestionId) -> Result<QuestionId, Error>
where
    S: QuestionStore + ?Sized,
{
    if store.get_question(question_id).await?.is_none() {
        return Err(Error::QuestionNotFound(question_id.0));
    }

    // 조회와 삭제 사이에 다른 요청이 먼저 지웠을 수도 있다.
    if store.delete_question(question_id).await? {
        event!(Level::INFO, id = question_id.0, "question deleted");
        Ok(question_id)
    } else {
        Err(Error::QuestionNotFound(question_id.0))
    }
}
