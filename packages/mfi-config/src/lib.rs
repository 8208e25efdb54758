mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Marqo, Service};

use std::{fs, path::Path};

pub const MIN_RESULT_LIMIT: u32 = 1;
pub const MAX_RESULT_LIMIT: u32 = 100;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("service.log_level", &cfg.service.log_level),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !(MIN_RESULT_LIMIT..=MAX_RESULT_LIMIT).contains(&cfg.marqo.result_limit) {
		return Err(Error::Validation {
			message: format!(
				"marqo.result_limit must be in the range {MIN_RESULT_LIMIT}-{MAX_RESULT_LIMIT}."
			),
		});
	}
	if cfg.marqo.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "marqo.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if cfg.marqo.enabled {
		for (label, value) in [
			("marqo.api_key", &cfg.marqo.api_key),
			("marqo.endpoint", &cfg.marqo.endpoint),
			("marqo.index", &cfg.marqo.index),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{label} must be non-empty when marqo.enabled is true."),
				});
			}
		}

		if !cfg.marqo.endpoint.starts_with("http://") && !cfg.marqo.endpoint.starts_with("https://")
		{
			return Err(Error::Validation {
				message: "marqo.endpoint must start with http:// or https://.".to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.marqo.api_key = cfg.marqo.api_key.trim().to_string();
	cfg.marqo.index = cfg.marqo.index.trim().to_string();
	cfg.marqo.endpoint = cfg.marqo.endpoint.trim().trim_end_matches('/').to_string();
}
