use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct CategoryId(pub i32);

/// 카테고리 id -> 이름. JSON으로는 `{"1": "Science", ...}` 형태가 된다.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct CategoryIndex(BTreeMap<i32, String>);

impl CategoryIndex {
    pub fn label(&self, id: CategoryId) -> Option<&str> {
        self.0.get(&id.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 요청마다 저장소에서 읽은 카테고리 목록으로 새로 만든다. 캐시하지 않는다.
pub fn build_index(categories: &[Category]) -> CategoryIndex {
    CategoryIndex(
        categories
            .iter()
            .map(|category| (category.id.0, category.kind.clone()))
            .collect(),
    )
}
