use mfi_domain::QueryError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Empty search phrase.")]
	EmptyQuery,
	#[error("Marqo integration is disabled.")]
	Disabled,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("{message}")]
	Provider { message: String },
}
impl From<QueryError> for Error {
	fn from(err: QueryError) -> Self {
		match err {
			QueryError::EmptyPhrase => Self::EmptyQuery,
			QueryError::ZeroLimit => Self::InvalidRequest { message: err.to_string() },
		}
	}
}

impl From<mfi_providers::Error> for Error {
	fn from(err: mfi_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
