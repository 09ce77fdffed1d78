use axum::extract::FromRequestParts;

use super::error::ApiError;

/// `Query` whose rejections render as JSON `ApiError`s
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
