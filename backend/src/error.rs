use rocket::http::Status;
use rocket::response::{content::RawHtml, Responder};
use serde::Serialize;
use thiserror::Error;
use shared::ValidationError;
use twitter_client::TwitterError;
use crate::pages;

#[derive(Error, Debug, Serialize)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::InvalidInput(_) => Status::BadRequest,
            ApiError::Upstream(_) => Status::BadGateway,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<TwitterError> for ApiError {
    fn from(err: TwitterError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = match &self {
            ApiError::InvalidInput(_) => pages::render_invalid_input(),
            other => pages::render_error(status, &other.to_string()),
        };

        rocket::Response::build_from(RawHtml(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
