use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::Postgres;

use handle_errors::Error;

use crate::store::{CategoryStore, QuestionStore};
use crate::types::{
    category::{Category, CategoryId},
    filter::QuestionFilter,
    question::{NewQuestion, Question, QuestionId},
};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

fn to_count(total: i64) -> Result<usize, Error> {
    usize::try_from(total).map_err(|error| {
        tracing::event!(tracing::Level::ERROR, total, "{:?}", error);
        Error::DatabaseQueryError(sqlx::Error::Decode(Box::new(error)))
    })
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

impl PgStore {
    pub async fn new(db_url: &str) -> Result<Self, Error> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
            .map_err(Error::DatabaseQueryError)?;

        Ok(PgStore {
            connection: db_pool,
        })
    }

    pub async fn run_migrations(&self) -> Result<(), Error> {
        sqlx::migrate!()
            .run(&self.connection)
            .await
            .map_err(Error::MigrationError)
    }
}

fn to_question(row: PgRow) -> Question {
    Question {
        id: QuestionId(row.get("id")),
        text: row.get("question"),
        answer: row.get("answer"),
        category: CategoryId(row.get("category")),
        difficulty: row.get("difficulty"),
    }
}

/// ILIKE 패턴 문자를 이스케이프해서 검색어를 글자 그대로 찾게 한다.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 조건 목록을 `WHERE ... AND ...` 절로 옮긴다. 자리표시자 번호는 목록 순서를 따른다.
fn where_clause(filters: &[QuestionFilter]) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let conditions: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(index, filter)| {
            let n = index + 1;
            match filter {
                QuestionFilter::InCategory(_) => format!("category = ${}", n),
                QuestionFilter::Excluding(_) => format!("NOT (id = ANY(${}))", n),
                QuestionFilter::TextContains(_) => format!("question ILIKE ${}", n),
            }
        })
        .collect();

    format!(" WHERE {}", conditions.join(" AND "))
}

fn bind_filters<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    filters: &[QuestionFilter],
) -> Query<'q, Postgres, PgArguments> {
    for filter in filters {
        query = match filter {
            QuestionFilter::InCategory(category) => query.bind(category.0),
            QuestionFilter::Excluding(ids) => {
                query.bind(ids.iter().map(|id| id.0).collect::<Vec<i32>>())
            }
            QuestionFilter::TextContains(term) => query.bind(format!("%{}%", escape_like(term))),
        };
    }
    query
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        match sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, category, difficulty",
        )
        .bind(new_question.text)
        .bind(new_question.answer)
        .bind(new_question.difficulty)
        .bind(new_question.category.0)
        .map(to_question)
        .fetch_one(&self.connection)
        .await
        {
            Ok(question) => Ok(question),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn delete_question(&self, question_id: QuestionId) -> Result<bool, Error> {
        match sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id.0)
            .execute(&self.connection)
            .await
        {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>, Error> {
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        match sqlx::query(&sql)
            .bind(question_id.0)
            .map(to_question)
            .fetch_optional(&self.connection)
            .await
        {
            Ok(question) => Ok(question),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn find_questions(&self, filters: &[QuestionFilter]) -> Result<Vec<Question>, Error> {
        let sql = format!(
            "SELECT {} FROM questions{} ORDER BY id",
            QUESTION_COLUMNS,
            where_clause(filters)
        );
        match bind_filters(sqlx::query(&sql), filters)
            .map(to_question)
            .fetch_all(&self.connection)
            .await
        {
            Ok(questions) => Ok(questions),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn first_question(
        &self,
        filters: &[QuestionFilter],
    ) -> Result<Option<Question>, Error> {
        let sql = format!(
            "SELECT {} FROM questions{} ORDER BY id LIMIT 1",
            QUESTION_COLUMNS,
            where_clause(filters)
        );
        match bind_filters(sqlx::query(&sql), filters)
            .map(to_question)
            .fetch_optional(&self.connection)
            .await
        {
            Ok(question) => Ok(question),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn count_questions(&self) -> Result<usize, Error> {
        match sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .map(|row: PgRow| row.get::<i64, _>("total"))
            .fetch_one(&self.connection)
            .await
        {
            Ok(total) => to_count(total),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        match sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .map(|row: PgRow| Category {
                id: CategoryId(row.get("id")),
                kind: row.get("type"),
            })
            .fetch_all(&self.connection)
            .await
        {
            Ok(categories) => Ok(categories),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }
}
