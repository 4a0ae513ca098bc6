use serde::Serialize;
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{InvalidQuery, MethodNotAllowed, Reject},
};

use config::ConfigError;

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    MissingParameters,
    MissingField(&'static str),
    QuestionNotFound(i32),
    PageNotFound(i64),
    DatabaseQueryError(sqlx::Error), // 저장소에서 올라온 에러는 전부 여기로 모은다.
    MigrationError(sqlx::migrate::MigrateError),
    ConfigError(ConfigError),
    SeedError(serde_json::Error),
}

/// 경계 계층이 알아듣는 세 가지 실패 신호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    NotFound,
    Unprocessable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingParameters | Error::MissingField(_) => ErrorKind::BadInput,
            Error::QuestionNotFound(_) | Error::PageNotFound(_) => ErrorKind::NotFound,
            Error::DatabaseQueryError(_)
            | Error::MigrationError(_)
            | Error::ConfigError(_)
            | Error::SeedError(_) => ErrorKind::Unprocessable,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &*self {
            Error::MissingParameters => {
                write!(f, "Missing parameters")
            }
            Error::MissingField(field) => {
                write!(f, "Missing required field: {}", field)
            }
            Error::QuestionNotFound(id) => {
                write!(f, "Question {} not found", id)
            }
            Error::PageNotFound(page) => {
                write!(f, "Page {} is out of range", page)
            }
            Error::DatabaseQueryError(_) => {
                write!(f, "Cannot update, invalid data.")
            }
            Error::MigrationError(_) => {
                write!(f, "Cannot migrate data")
            }
            Error::ConfigError(err) => {
                write!(f, "Cannot read configuration: {}", err)
            }
            Error::SeedError(err) => {
                write!(f, "Cannot read seed data: {}", err)
            }
        }
    }
}

impl Reject for Error {}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    success: bool,
    error: u16,
    message: &'static str,
}

fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "internal server error",
    }
}

/// 클라이언트는 실패를 항상 `success: false` 봉투로 받는다.
fn envelope(status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: message_for(status),
        }),
        status,
    )
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(crate::Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error: {:?}", e);
        Ok(envelope(StatusCode::UNPROCESSABLE_ENTITY))
    } else if let Some(error) = r.find::<Error>() {
        let kind = error.kind();
        event!(Level::ERROR, kind = ?kind, "{}", error);
        Ok(envelope(kind.status()))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::ERROR, "Cannot deserialize request body: {}", error);
        Ok(envelope(StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<InvalidQuery>() {
        event!(Level::ERROR, "Cannot parse query string: {}", error);
        Ok(envelope(StatusCode::BAD_REQUEST))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(envelope(StatusCode::FORBIDDEN))
    } else if r.is_not_found() {
        event!(Level::WARN, "Requested route was not found");
        Ok(envelope(StatusCode::NOT_FOUND))
    } else if r.find::<MethodNotAllowed>().is_some() {
        event!(Level::WARN, "Method not allowed on this route");
        Ok(envelope(StatusCode::METHOD_NOT_ALLOWED))
    } else {
        event!(Level::ERROR, "Unhandled rejection: {:?}", r);
        Ok(envelope(StatusCode::INTERNAL_SERVER_ERROR))
    }
}
