use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub marqo: Marqo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Connection and caching settings for the Marqo integration.
#[derive(Debug, Clone, Deserialize)]
pub struct Marqo {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default)]
	pub api_key: String,
	/// Base URL of the Marqo API, without the `/indexes` suffix.
	#[serde(default)]
	pub endpoint: String,
	#[serde(default)]
	pub index: String,
	#[serde(default = "default_result_limit")]
	pub result_limit: u32,
	/// Zero disables caching entirely.
	#[serde(default = "default_cache_ttl_seconds")]
	pub cache_ttl_seconds: u64,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}
impl Default for Marqo {
	fn default() -> Self {
		Self {
			enabled: false,
			api_key: String::new(),
			endpoint: String::new(),
			index: String::new(),
			result_limit: default_result_limit(),
			cache_ttl_seconds: default_cache_ttl_seconds(),
			timeout_ms: default_timeout_ms(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_result_limit() -> u32 {
	10
}

fn default_cache_ttl_seconds() -> u64 {
	3_600
}

fn default_timeout_ms() -> u64 {
	15_000
}
