use serde::Serialize;
use tracing::instrument;

use crate::quiz;
use crate::routes::RouteOptions;
use crate::store::SharedStore;
use crate::types::question::Question;
use crate::types::quiz::QuizRequest;

#[derive(Serialize, Debug)]
struct QuizResponse {
    success: bool,
    /// 더 낼 질문이 없으면 `null`
    question: Option<Question>,
}

#[instrument(skip(store))]
pub async fn play_quiz(
    store: SharedStore,
    options: RouteOptions,
    request: QuizRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let previous_ids = request.previous_ids();
    match quiz::next_question(&*store, &previous_ids, request.category(), options.quiz_order).await
    {
        Ok(question) => Ok(warp::reply::json(&QuizResponse {
            success: true,
            question,
        })),
        Err(e) => Err(warp::reject::custom(e)),
    }
}
