use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use warp::http::StatusCode;

use handle_errors::Error;
use trivia_api::build_routes;
use trivia_api::routes::RouteOptions;
use trivia_api::store::{CategoryStore, MemoryStore, QuestionStore, SharedStore};
use trivia_api::types::category::{Category, CategoryId};
use trivia_api::types::filter::QuestionFilter;
use trivia_api::types::question::{NewQuestion, Question, QuestionId};

/// 읽기는 시드 저장소로, 쓰기는 항상 DB 에러로 끝나는 저장소
#[derive(Clone)]
struct BrokenWrites(MemoryStore);

fn db_error() -> Error {
    Error::DatabaseQueryError(sqlx::Error::PoolClosed)
}

#[async_trait]
impl QuestionStore for BrokenWrites {
    async fn add_question(&self, _new_question: NewQuestion) -> Result<Question, Error> {
        Err(db_error())
    }

    async fn delete_question(&self, _question_id: QuestionId) -> Result<bool, Error> {
        Err(db_error())
    }

    async fn get_question(&self, question_id: QuestionId) -> Result<Option<Question>, Error> {
        self.0.get_question(question_id).await
    }

    async fn find_questions(&self, _filters: &[QuestionFilter]) -> Result<Vec<Question>, Error> {
        Err(db_error())
    }

    async fn first_question(
        &self,
        _filters: &[QuestionFilter],
    ) -> Result<Option<Question>, Error> {
        Err(db_error())
    }
}

#[async_trait]
impl CategoryStore for BrokenWrites {
    async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        self.0.get_categories().await
    }
}

fn seeded() -> SharedStore {
    Arc::new(MemoryStore::seeded().unwrap())
}

fn broken() -> SharedStore {
    Arc::new(BrokenWrites(MemoryStore::seeded().unwrap()))
}

async fn send(
    store: SharedStore,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let routes = build_routes(store, RouteOptions::default());
    let mut request = warp::test::request().method(method).path(path);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.reply(&routes).await;
    let body = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
    (response.status(), body)
}

fn new_question() -> Value {
    json!({
        "question": "Test question",
        "answer": "Test answer",
        "difficulty": 5,
        "category": 1,
    })
}

#[tokio::test]
async fn get_categories() {
    let (status, body) = send(seeded(), "GET", "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["categories"],
        json!({
            "1": "Science",
            "2": "Art",
            "3": "Geography",
            "4": "History",
            "5": "Entertainment",
            "6": "Sports",
        })
    );
    assert_eq!(body["total_categories"], 6);
}

#[tokio::test]
async fn get_questions_first_page() {
    let (status, body) = send(seeded(), "GET", "/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["questions"][0],
        json!({
            "answer": "Apollo 13",
            "category": 5,
            "difficulty": 4,
            "id": 2,
            "question": "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        })
    );
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["current_category"], "Entertainment");
}

#[tokio::test]
async fn configured_default_category_labels_the_listing() {
    let routes = build_routes(
        seeded(),
        RouteOptions {
            default_category: Some(CategoryId(1)),
            ..RouteOptions::default()
        },
    );
    let response = warp::test::request()
        .method("GET")
        .path("/questions?page=2")
        .reply(&routes)
        .await;
    let body: Value = serde_json::from_slice(response.body()).unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body["current_category"], "Science");
    assert_eq!(body["questions"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn get_questions_past_the_end_is_404() {
    let (status, body) = send(seeded(), "GET", "/questions?page=1000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn garbage_page_falls_back_to_first_page() {
    let (status, body) = send(seeded(), "GET", "/questions?page=abc", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["id"], 2);
}

#[tokio::test]
async fn delete_question() {
    let store = seeded();
    let (status, body) = send(store.clone(), "POST", "/questions", Some(new_question())).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["created"].as_i64().unwrap();

    let (status, body) = send(store.clone(), "DELETE", &format!("/questions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], id);
    assert_eq!(body["message"], "Question was successfully deleted.");

    let gone = store.get_question(QuestionId(id as i32)).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn delete_unknown_question_is_404() {
    let (status, body) = send(seeded(), "DELETE", "/questions/1000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn delete_with_failing_store_is_422() {
    let (status, body) = send(broken(), "DELETE", "/questions/2", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
async fn create_question() {
    let store = seeded();
    let (status, body) = send(store.clone(), "POST", "/questions", Some(new_question())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["created"].as_i64().unwrap();
    assert_eq!(id, 24);

    let created = store.get_question(QuestionId(24)).await.unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&created).unwrap(),
        json!({
            "answer": "Test answer",
            "category": 1,
            "difficulty": 5,
            "id": 24,
            "question": "Test question",
        })
    );
}

#[tokio::test]
async fn create_accepts_string_category_and_difficulty() {
    let body = json!({
        "question": "Test question",
        "answer": "Test answer",
        "difficulty": "2",
        "category": "3",
    });
    let (status, _) = send(seeded(), "POST", "/questions", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_with_failing_store_is_422() {
    let (status, body) = send(broken(), "POST", "/questions", Some(new_question())).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
async fn create_with_unknown_category_is_422() {
    let mut body = new_question();
    body["category"] = json!(999);
    let store = seeded();
    let (status, body) = send(store.clone(), "POST", "/questions", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");

    let (_, listing) = send(store, "GET", "/categories/999/questions", None).await;
    assert_eq!(listing["questions"], json!([]));
}

#[tokio::test]
async fn create_with_missing_fields_is_400() {
    let (status, body) = send(seeded(), "POST", "/questions", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "bad request");
}

#[tokio::test]
async fn search_questions() {
    let store = seeded();
    send(store.clone(), "POST", "/questions", Some(new_question())).await;

    let (status, body) = send(
        store,
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "test"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"][0]["question"], "Test question");
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["current_category"], "Science");
}

#[tokio::test]
async fn search_without_matches_is_empty_success() {
    let (status, body) = send(
        seeded(),
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "test"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["total_questions"], 0);
    assert_eq!(body["current_category"], Value::Null);
}

#[tokio::test]
async fn search_without_term_is_400() {
    let (status, body) = send(seeded(), "POST", "/questions/search", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bad request");
}

#[tokio::test]
async fn empty_search_term_is_rejected_before_the_store() {
    for body in [json!({}), json!({"searchTerm": ""})] {
        let (status, body) = send(broken(), "POST", "/questions/search", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn search_with_failing_store_is_422() {
    let (status, _) = send(
        broken(),
        "POST",
        "/questions/search",
        Some(json!({"searchTerm": "title"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_questions_by_category() {
    let (status, body) = send(seeded(), "GET", "/categories/1/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["questions"][0],
        json!({
            "answer": "The Liver",
            "category": 1,
            "difficulty": 4,
            "id": 20,
            "question": "What is the heaviest organ in the human body?",
        })
    );
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["current_category"], "Science");
}

#[tokio::test]
async fn get_questions_by_empty_category() {
    let (status, body) = send(seeded(), "GET", "/categories/99999/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn quiz_returns_lowest_id_in_category() {
    let (status, body) = send(
        seeded(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": null, "quiz_category": {"id": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["question"],
        json!({
            "answer": "The Liver",
            "category": 1,
            "difficulty": 4,
            "id": 20,
            "question": "What is the heaviest organ in the human body?",
        })
    );
}

#[tokio::test]
async fn quiz_skips_previous_questions() {
    let (status, body) = send(
        seeded(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": [20], "quiz_category": {"type": "Science", "id": "1"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 21);
}

#[tokio::test]
async fn quiz_with_everything_seen_returns_null() {
    let previous: Vec<i32> = (1..24).collect();
    let (status, body) = send(
        seeded(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": previous, "quiz_category": {"id": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], Value::Null);
}

#[tokio::test]
async fn quiz_with_any_category_starts_at_lowest_id() {
    let (status, body) = send(
        seeded(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": [], "quiz_category": {"type": "click", "id": 0}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 2);
}

#[tokio::test]
async fn quiz_rejects_non_integer_previous_questions() {
    let (status, body) = send(
        seeded(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": ["1; DROP TABLE questions"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn quiz_with_failing_store_is_422_not_null() {
    let (status, body) = send(
        broken(),
        "POST",
        "/quizzes",
        Some(json!({"previous_questions": [], "quiz_category": {"id": 1}})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, body) = send(seeded(), "GET", "/nothing-here", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn wrong_method_is_405() {
    let (status, body) = send(seeded(), "PATCH", "/categories", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "method not allowed");
}
