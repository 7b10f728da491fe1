use std::{borrow::Cow, collections::BTreeMap};

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{header, Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Field name to a message describing what is wrong with it.
pub type Validation = BTreeMap<String, String>;

pub const INVALID_REQUEST: &str = "invalid request";
pub const UNKNOWN_ROUTE: &str = "resource does not exist";
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Error type for the application.
///
/// Every failure that reaches a handler's return value ends up as one of
/// these, and is rendered by [`IntoResponse`] into an [`ErrorResponse`].
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	/// One or more fields of the request are invalid.
	#[error("validation error: {0:?}")]
	Validation(Validation),
	/// The requested resource does not exist. The message is sent to the client.
	#[error("not found: {0}")]
	NotFound(&'static str),
	/// The path exists, but not with the request's method.
	#[error("method not allowed")]
	MethodNotAllowed,
	/// Anything else. The reason is logged, never sent.
	#[error("unclassified error: {0}")]
	Unclassified(String),
}

impl AppError {
	/// A validation error for a single field.
	pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation(Validation::from([(field.into(), message.into())]))
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Unclassified(..) => StatusCode::BAD_REQUEST,
			Self::NotFound(..) => StatusCode::NOT_FOUND,
			Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
		}
	}

	pub fn message(&self) -> &'static str {
		match self {
			Self::Validation(..) | Self::Unclassified(..) => INVALID_REQUEST,
			Self::NotFound(message) => message,
			Self::MethodNotAllowed => METHOD_NOT_ALLOWED,
		}
	}
}

/// The body of every error response.
///
/// `validation` is always present, and empty unless specific fields
/// were rejected.
#[derive(Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
	/// The HTTP status code, as a string.
	pub code: String,
	/// A human-readable summary of the error.
	pub message: Cow<'static, str>,
	/// Field-specific error messages.
	pub validation: Validation,
}

impl From<AppError> for ErrorResponse {
	fn from(error: AppError) -> Self {
		let code = error.status().as_u16().to_string();
		let message = Cow::Borrowed(error.message());
		let validation = match error {
			AppError::Validation(validation) => validation,
			AppError::NotFound(..) | AppError::MethodNotAllowed | AppError::Unclassified(..) => {
				Validation::new()
			}
		};

		Self {
			code,
			message,
			validation,
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		match &self {
			Self::Unclassified(reason) => tracing::warn!(%reason, "unclassified error"),
			error => tracing::debug!(%error, "request rejected"),
		}

		(self.status(), Json(ErrorResponse::from(self))).into_response()
	}
}

impl OperationOutput for AppError {
	type Inner = ErrorResponse;
}

impl From<validator::ValidationErrors> for AppError {
	fn from(errors: validator::ValidationErrors) -> Self {
		Self::Validation(
			errors
				.field_errors()
				.into_iter()
				.filter_map(|(field, errors)| {
					let error = errors.first()?;
					let message = error
						.message
						.as_ref()
						.unwrap_or(&error.code)
						.to_string();

					Some((field.to_string(), message))
				})
				.collect(),
		)
	}
}

impl From<axum_jsonschema::JsonSchemaRejection> for AppError {
	fn from(rejection: axum_jsonschema::JsonSchemaRejection) -> Self {
		Self::Unclassified(format!("json rejection: {rejection:?}"))
	}
}

impl From<rejection::QueryRejection> for AppError {
	fn from(rejection: rejection::QueryRejection) -> Self {
		Self::Unclassified(rejection.body_text())
	}
}

impl From<rejection::PathRejection> for AppError {
	fn from(rejection: rejection::PathRejection) -> Self {
		Self::Unclassified(rejection.body_text())
	}
}

/// Renders a panic inside a handler like any other unclassified failure.
pub fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response<Body> {
	let reason = panic
		.downcast_ref::<&str>()
		.map(|reason| (*reason).to_owned())
		.or_else(|| panic.downcast_ref::<String>().cloned())
		.unwrap_or_else(|| "unknown panic".into());

	AppError::Unclassified(format!("handler panicked: {reason}")).into_response()
}

/// Fallback for requests that match no route.
pub async fn not_found() -> AppError {
	AppError::NotFound(UNKNOWN_ROUTE)
}

/// Replaces the router's empty `405` responses with an error body,
/// keeping the `Allow` header.
pub async fn method_not_allowed(response: Response<Body>) -> Response<Body> {
	if response.status() != StatusCode::METHOD_NOT_ALLOWED {
		return response;
	}

	let mut rendered = AppError::MethodNotAllowed.into_response();

	if let Some(allow) = response.headers().get(header::ALLOW) {
		rendered.headers_mut().insert(header::ALLOW, allow.clone());
	}

	rendered
}
