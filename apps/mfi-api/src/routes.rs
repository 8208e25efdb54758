use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use mfi_domain::NativeResultSet;
use mfi_service::{AdminResponse, DirectSearchRequest, DirectSearchResponse, Error, InjectRequest};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search/inject", post(inject))
		.route("/v1/search", post(direct_search))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/test_connection", post(test_connection))
		.route("/v1/admin/flush_cache", post(flush_cache))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn inject(
	State(state): State<AppState>,
	Json(payload): Json<InjectRequest>,
) -> Json<NativeResultSet> {
	Json(state.service.inject(payload.results, &payload.phrase).await)
}

async fn direct_search(
	State(state): State<AppState>,
	Json(payload): Json<DirectSearchRequest>,
) -> Result<Json<DirectSearchResponse>, ApiError> {
	let data = state.service.direct_search(&payload.phrase).await?;
	Ok(Json(DirectSearchResponse { success: true, data }))
}

async fn test_connection(State(state): State<AppState>) -> Result<Json<AdminResponse>, ApiError> {
	let response = state.service.test_connection().await?;
	Ok(Json(response))
}

async fn flush_cache(State(state): State<AppState>) -> Response {
	let response = state.service.flush_cache();
	let status = if response.success { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
	(status, Json(response)).into_response()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::EmptyQuery => ApiError::new(
				StatusCode::BAD_REQUEST,
				"empty_query",
				err.to_string(),
				Some(vec!["phrase".to_string()]),
			),
			Error::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			Error::Disabled =>
				ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "disabled", err.to_string(), None),
			Error::Provider { message } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "provider_error", message, None),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };
		(self.status, Json(body)).into_response()
	}
}
