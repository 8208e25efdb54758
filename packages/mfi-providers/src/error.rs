pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	Network { message: String },
	#[error("{message}")]
	Decode { message: String },
	#[error("{message}")]
	Connection { message: String },
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}
