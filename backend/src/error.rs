use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use thiserror::Error;
use tracing::error;

use poll_shared::{ErrorCode, ErrorResponse};

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub poll_shared::Error);

impl ApiError {
    pub fn status(&self) -> Status {
        match self.0.code {
            ErrorCode::Validation => Status::BadRequest,
            ErrorCode::NotFound => Status::NotFound,
            ErrorCode::Conflict => Status::Conflict,
            ErrorCode::Storage => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("{} {} failed: {}", req.method(), req.uri(), self.0);
        }

        let body: ErrorResponse = self.0.to_response();
        let json = serde_json::to_string(&body).map_err(|_| Status::InternalServerError)?;

        rocket::Response::build_from(json.respond_to(req)?)
            .status(status)
            .header(ContentType::JSON)
            .ok()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
