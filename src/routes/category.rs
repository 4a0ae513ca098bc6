use serde::Serialize;
use std::collections::HashMap;
use tracing::{Level, event, instrument};

use crate::store::SharedStore;
use crate::trivia;
use crate::types::category::{CategoryId, CategoryIndex};
use crate::types::pagination::extract_page;
use crate::types::question::Question;

#[derive(Serialize, Debug)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryIndex,
    total_categories: usize,
}

#[derive(Serialize, Debug)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[instrument(skip(store))]
pub async fn get_categories(store: SharedStore) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, "querying categories");
    match trivia::list_categories(&*store).await {
        Ok(categories) => Ok(warp::reply::json(&CategoriesResponse {
            success: true,
            total_categories: categories.len(),
            categories,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn get_category_questions(
    category_id: i32,
    params: HashMap<String, String>,
    store: SharedStore,
) -> Result<impl warp::Reply, warp::Rejection> {
    let page = extract_page(&params);
    match trivia::questions_in_category(&*store, CategoryId(category_id), page).await {
        Ok(result) => Ok(warp::reply::json(&CategoryQuestionsResponse {
            success: true,
            questions: result.questions,
            total_questions: result.total_questions,
            current_category: result.current_category,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}
