#![warn(clippy::all)]

use warp::{Filter, http::Method};

use handle_errors::return_error;

pub mod config;
pub mod quiz;
pub mod routes;
pub mod store;
pub mod trivia;
pub mod types;

use crate::routes::RouteOptions;
use crate::store::SharedStore;

/// 모든 경로를 하나의 필터로 묶는다. 실패는 `return_error`가 JSON 봉투로 바꾼다.
pub fn build_routes(
    store: SharedStore,
    options: RouteOptions,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());
    let options_filter = warp::any().map(move || options);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type", "Authorization"])
        .allow_methods(&[Method::PUT, Method::DELETE, Method::POST, Method::GET]);

    // 경로를 먼저 검사해야 없는 경로가 405 대신 404가 된다.
    let get_categories = warp::path("categories")
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(routes::category::get_categories);

    let get_category_questions = warp::path("categories")
        .and(warp::path::param::<i32>())
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and_then(routes::category::get_category_questions);

    let get_questions = warp::path("questions")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and(options_filter.clone())
        .and_then(routes::question::get_questions)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "get_questions request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    let add_question = warp::path("questions")
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::add_question);

    let search_questions = warp::path("questions")
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::query())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(routes::question::search_questions);

    let delete_question = warp::path("questions")
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(store_filter.clone())
        .and_then(routes::question::delete_question);

    let play_quiz = warp::path("quizzes")
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(options_filter.clone())
        .and(warp::body::json())
        .and_then(routes::quiz::play_quiz)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "play_quiz request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    get_categories
        .or(get_category_questions)
        .or(get_questions)
        .or(add_question)
        .or(search_questions)
        .or(delete_question)
        .or(play_quiz)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error)
}
