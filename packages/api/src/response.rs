// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::error;

use drafter_gateway::GatewayError;
use drafter_store::{StoreError, StoreResult};

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

fn store_error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a store error into an error response, logging the context
pub fn store_error_response(err: StoreError, context: &str) -> Response {
    error!("{}: {}", context, err);

    let status = store_error_status(&err);
    // Internal details stay out of the response body
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        context.to_string()
    } else {
        err.to_string()
    };

    (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
}

/// Convert a gateway error into an error response, logging the context
pub fn gateway_error_response(err: GatewayError, context: &str) -> Response {
    error!("{}: {}", context, err);

    let status = match err {
        GatewayError::NoApiKey => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };

    (status, ResponseJson(ApiResponse::<()>::error(err.to_string()))).into_response()
}

/// 200 with the payload on success; mapped error response otherwise
pub fn ok_or_error<T: Serialize>(result: StoreResult<T>, context: &str) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(err) => store_error_response(err, context),
    }
}

/// 201 with the payload on success; mapped error response otherwise
pub fn created_or_error<T: Serialize>(result: StoreResult<T>, context: &str) -> Response {
    match result {
        Ok(data) => (StatusCode::CREATED, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(err) => store_error_response(err, context),
    }
}

/// 400 with a validation message
pub fn validation_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        ResponseJson(ApiResponse::<()>::error(message.to_string())),
    )
        .into_response()
}
