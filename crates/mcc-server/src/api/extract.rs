//! Extractors whose rejections use the API error body.

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// JSON body extractor; malformed or unknown-field payloads become 400s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with the same rejection shape.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
