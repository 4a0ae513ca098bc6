use async_trait::async_trait;
use std::sync::Arc;

use handle_errors::Error;

use crate::types::{
    category::{Category, CategoryId},
    filter::QuestionFilter,
    question::{NewQuestion, Question, QuestionId},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// 질문 저장소. 목록은 항상 id 오름차순으로 돌려준다.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error>;

    /// 지운 행이 없으면 `Ok(false)`
    async fn delete_question(&self, question_id: QuestionId) -> Result<bool, Error>;

    async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>, Error>;

    async fn find_questions(&self, filters: &[QuestionFilter]) -> Result<Vec<Question>, Error>;

    async fn first_question(&self, filters: &[QuestionFilter])
    -> Result<Option<Question>, Error>;

    async fn count_questions(&self) -> Result<usize, Error> {
        Ok(self.find_questions(&[]).await?.len())
    }

    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        self.find_questions(&[]).await
    }

    async fn get_questions_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Question>, Error> {
        self.find_questions(&[QuestionFilter::InCategory(category_id)])
            .await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, Error> {
        self.find_questions(&[QuestionFilter::TextContains(term.to_owned())])
            .await
    }
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_categories(&self) -> Result<Vec<Category>, Error>;
}

pub trait TriviaStore: QuestionStore + CategoryStore {}

impl<T: QuestionStore + CategoryStore> TriviaStore for T {}

/// 경로 핸들러에 넘기는 저장소 핸들
pub type SharedStore = Arc<dyn TriviaStore>;
