use crate::types::{category::CategoryId, quiz::QuizOrder};

pub mod category;
pub mod question;
pub mod quiz;

/// 설정에서 온, 요청마다 바뀌지 않는 값
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteOptions {
    pub default_category: Option<CategoryId>,
    pub quiz_order: QuizOrder,
}
