use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::routes::RouteOptions;
use crate::store::SharedStore;
use crate::trivia;
use crate::types::category::CategoryIndex;
use crate::types::pagination::extract_page;
use crate::types::question::{Question, QuestionId, QuestionPayload};

#[derive(Serialize, Debug)]
struct QuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: CategoryIndex,
    current_category: Option<String>,
}

#[derive(Serialize, Debug)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize, Debug)]
struct CreatedResponse {
    success: bool,
    created: i32,
}

#[derive(Serialize, Debug)]
struct DeletedResponse {
    success: bool,
    deleted: i32,
    message: &'static str,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[instrument(skip(store))]
pub async fn get_questions(
    params: HashMap<String, String>,
    store: SharedStore,
    options: RouteOptions,
) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, "querying questions");
    let page = extract_page(&params);
    match trivia::list_questions(&*store, page, options.default_category).await {
        Ok(listing) => Ok(warp::reply::json(&QuestionsResponse {
            success: true,
            questions: listing.questions,
            total_questions: listing.total_questions,
            categories: listing.categories,
            current_category: listing.current_category,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn add_question(
    store: SharedStore,
    payload: QuestionPayload,
) -> Result<impl warp::Reply, warp::Rejection> {
    match trivia::create_question(&*store, payload).await {
        Ok(question) => Ok(warp::reply::json(&CreatedResponse {
            success: true,
            created: question.id.0,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn search_questions(
    params: HashMap<String, String>,
    store: SharedStore,
    request: SearchRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let page = extract_page(&params);
    match trivia::search_questions(&*store, request.search_term.as_deref(), page).await {
        Ok(result) => Ok(warp::reply::json(&SearchResponse {
            success: true,
            questions: result.questions,
            total_questions: result.total_questions,
            current_category: result.current_category,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn delete_question(
    id: i32,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    match trivia::delete_question(&*store, QuestionId(id)).await {
        Ok(deleted) => Ok(warp::reply::json(&DeletedResponse {
            success: true,
            deleted: deleted.0,
            message: "Question was successfully deleted.",
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}
