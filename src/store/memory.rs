use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::store::{CategoryStore, QuestionStore};
use crate::types::{
    category::{Category, CategoryId},
    filter::{QuestionFilter, matches_all},
    question::{NewQuestion, Question, QuestionId},
};

#[derive(Debug)]
struct Questions {
    rows: BTreeMap<QuestionId, Question>,
    next_id: i32, // 지운 id는 다시 쓰지 않는다.
}

#[derive(Deserialize)]
struct Seed {
    categories: Vec<Category>,
    questions: Vec<Question>,
}

/// 프로세스 메모리에만 있는 저장소. `--in-memory` 실행과 테스트에서 쓴다.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    questions: Arc<RwLock<Questions>>,
    categories: Arc<RwLock<BTreeMap<CategoryId, Category>>>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_id = questions.iter().map(|q| q.id.0).max().unwrap_or(0) + 1;
        MemoryStore {
            questions: Arc::new(RwLock::new(Questions {
                rows: questions.into_iter().map(|q| (q.id, q)).collect(),
                next_id,
            })),
            categories: Arc::new(RwLock::new(
                categories.into_iter().map(|c| (c.id, c)).collect(),
            )),
        }
    }

    /// `{"categories": [...], "questions": [...]}` 형식의 JSON에서 채운다.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let seed: Seed = serde_json::from_str(json).map_err(Error::SeedError)?;
        Ok(Self::new(seed.categories, seed.questions))
    }

    /// 기본 trivia 데이터(카테고리 6개, 질문 19개)를 채운 저장소
    pub fn seeded() -> Result<Self, Error> {
        Self::from_json(include_str!("../../seed/trivia.json"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        // questions.category 외래 키와 같은 제약
        if !self
            .categories
            .read()
            .await
            .contains_key(&new_question.category)
        {
            tracing::event!(
                tracing::Level::ERROR,
                category = new_question.category.0,
                "unknown category"
            );
            return Err(Error::DatabaseQueryError(sqlx::Error::RowNotFound));
        }

        let mut questions = self.questions.write().await;
        let question = Question {
            id: QuestionId(questions.next_id),
            text: new_question.text,
            answer: new_question.answer,
            category: new_question.category,
            difficulty: new_question.difficulty,
        };
        questions.next_id += 1;
        questions.rows.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, question_id: QuestionId) -> Result<bool, Error> {
        Ok(self
            .questions
            .write()
            .await
            .rows
            .remove(&question_id)
            .is_some())
    }

    async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>, Error> {
        Ok(self.questions.read().await.rows.get(&question_id).cloned())
    }

    async fn find_questions(&self, filters: &[QuestionFilter]) -> Result<Vec<Question>, Error> {
        Ok(self
            .questions
            .read()
            .await
            .rows
            .values()
            .filter(|question| matches_all(filters, question))
            .cloned()
            .collect())
    }

    async fn first_question(
        &self,
        filters: &[QuestionFilter],
    ) -> Result<Option<Question>, Error> {
        Ok(self
            .questions
            .read()
            .await
            .rows
            .values()
            .find(|question| matches_all(filters, question))
            .cloned())
    }

    async fn count_questions(&self) -> Result<usize, Error> {
        Ok(self.questions.read().await.rows.len())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.categories.read().await.values().cloned().collect())
    }
}
