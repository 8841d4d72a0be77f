//! Extractors whose rejections use the JSON failure envelope instead of
//! axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts, Json, Query};

use crate::error::AppError;

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
