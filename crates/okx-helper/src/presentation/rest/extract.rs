use axum::extract::{FromRequest, FromRequestParts};

use super::ApiError;

/// `Json` whose rejection is reported as a `validation_error` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejection is reported as a `validation_error` body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
