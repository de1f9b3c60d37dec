use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::error::FieldError;

#[derive(Debug, Serialize, ToSchema)]
pub struct Meta {
    pub status: u16,
}

/// Success envelope: `{ ok: true, meta: { status }, data }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub meta: Meta,
    pub data: T,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, status: StatusCode) -> Self {
        Self {
            ok: true,
            meta: Meta {
                status: status.as_u16(),
            },
            data,
        }
    }
}

/// Failure envelope: `{ ok: false, status, message, errors? }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub ok: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiErrorResponse {
    pub fn error(status: StatusCode, message: &str, errors: Vec<FieldError>) -> Self {
        Self {
            ok: false,
            status: status.as_u16(),
            message: message.to_string(),
            errors,
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> ApiSuccess<T> {
    pub fn ok(data: T) -> Self {
        Self(data, StatusCode::OK)
    }

    pub fn created(data: T) -> Self {
        Self(data, StatusCode::CREATED)
    }
}

impl<T> IntoResponse for ApiSuccess<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (data, status) = (self.0, self.1);
        (status, Json(ApiResponse::success(data, status))).into_response()
    }
}
