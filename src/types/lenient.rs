//! 프런트엔드는 select 값 때문에 숫자를 문자열로 보내기도 한다.
//! `"1"`과 `1`을 모두 받아들이되, 숫자가 아닌 값은 거절한다.
use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i32),
    Str(String),
}

pub fn option_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(value)) => Ok(Some(value)),
        Some(IntOrString::Str(value)) if value.trim().is_empty() => Ok(None),
        Some(IntOrString::Str(value)) => value
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(D::Error::custom),
    }
}
