//! Success side of the service result envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful service outcome. Together with `AppError` it forms the
/// `{ code, data | message }` envelope returned by every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Ok(T),
    Created(T),
    NoContent,
}

impl<T> Reply<T> {
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Ok(_) => StatusCode::OK,
            Reply::Created(_) => StatusCode::CREATED,
            Reply::NoContent => StatusCode::NO_CONTENT,
        }
    }

    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Reply::Ok(data) | Reply::Created(data) => Some(data),
            Reply::NoContent => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Reply::Ok(data) | Reply::Created(data) => Some(data),
            Reply::NoContent => None,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.into_data() {
            Some(data) => (status, Json(data)).into_response(),
            None => status.into_response(),
        }
    }
}
