use std::collections::HashMap;

/// 페이지가 있는 모든 경로가 같은 크기를 쓴다.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// 쿼리 매개변수 `page`에서 추출한 1부터 시작하는 페이지 번호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

/// 매개변수를 쿼리에서 추출하기
/// # 예제 쿼리
/// /questions?page=2
/// `page`가 없거나 숫자가 아니면 첫 페이지로 본다.
/// # 사용 예
/// ```rust
/// use std::collections::HashMap;
/// use trivia_api::types::pagination::{extract_page, Page};
///
/// let mut query = HashMap::new();
/// query.insert("page".to_string(), "2".to_string());
/// assert_eq!(extract_page(&query), Page(2));
///
/// query.insert("page".to_string(), "two".to_string());
/// assert_eq!(extract_page(&query), Page(1));
/// ```
pub fn extract_page(params: &HashMap<String, String>) -> Page {
    params
        .get("page")
        .and_then(|page| page.trim().parse::<i64>().ok())
        .map(Page)
        .unwrap_or_default()
}

/// 정렬된 목록에서 한 페이지를 잘라낸다.
/// 범위를 벗어난 페이지(0 이하 포함)는 빈 목록이 된다.
pub fn paginate<T>(page: Page, items: Vec<T>) -> Vec<T> {
    if page.0 < 1 {
        return Vec::new();
    }

    let start = usize::try_from(page.0 - 1)
        .ok()
        .and_then(|index| index.checked_mul(QUESTIONS_PER_PAGE));

    match start {
        Some(start) => items
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect(),
        None => Vec::new(),
    }
}
