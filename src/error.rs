use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use failure::Fail;
use serde::Serialize;

/// Every failure a request can end in. The display string is the fixed
/// message sent to clients; underlying causes are only logged.
#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[fail(display = "Bad request.")]
    BadRequest,
    #[fail(display = "Resource not found.")]
    NotFound,
    #[fail(display = "Method not allowed.")]
    MethodNotAllowed,
    #[fail(display = "Unprocessable.")]
    Unprocessable,
    #[fail(display = "Internal server error.")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        })
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        log::error!("database error: {}", e);
        ApiError::Internal
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(e: r2d2::Error) -> Self {
        log::error!("unable to get database connection: {}", e);
        ApiError::Internal
    }
}

impl From<BlockingError<ApiError>> for ApiError {
    fn from(e: BlockingError<ApiError>) -> Self {
        match e {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => {
                log::error!("blocking task canceled");
                ApiError::Internal
            }
        }
    }
}

/// Maps a failed lookup to `missing`, anything else to an internal error.
pub fn or_missing<T>(result: diesel::QueryResult<T>, missing: ApiError) -> Result<T, ApiError> {
    match result {
        Err(diesel::result::Error::NotFound) => Err(missing),
        other => Ok(other?),
    }
}
